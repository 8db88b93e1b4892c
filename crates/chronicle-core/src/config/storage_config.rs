use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. `None` selects the in-memory backend (tests).
    pub db_path: Option<PathBuf>,
    /// Read connections in the pool; writes always go through the single
    /// write connection.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
