//! Configuration structs with serde defaults backed by the [`defaults`]
//! constants module. Loaded from TOML; every field falls back to its default
//! when omitted.

pub mod defaults;

mod search_config;
mod storage_config;

pub use search_config::SearchConfig;
pub use storage_config::StorageConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ChronicleError, ChronicleResult};

/// Top-level configuration for a Chronicle deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

impl ChronicleConfig {
    /// Parse a TOML document. Unknown keys are ignored, missing sections
    /// fall back to defaults.
    pub fn from_toml_str(raw: &str) -> ChronicleResult<Self> {
        toml::from_str(raw).map_err(|e| ChronicleError::Config {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> ChronicleResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ChronicleError::Config {
            reason: format!("read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = ChronicleConfig::from_toml_str("").unwrap();
        assert_eq!(config.search.top_k, defaults::DEFAULT_TOP_K);
        assert_eq!(config.search.rrf_k, defaults::DEFAULT_RRF_K);
        assert_eq!(config.storage.read_pool_size, defaults::DEFAULT_READ_POOL_SIZE);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = ChronicleConfig::from_toml_str("[search]\ntop_k = 20\n").unwrap();
        assert_eq!(config.search.top_k, 20);
        assert_eq!(config.search.rrf_k, defaults::DEFAULT_RRF_K);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ChronicleConfig::from_toml_str("[search\ntop_k = ").unwrap_err();
        assert!(matches!(err, ChronicleError::Config { .. }));
    }
}
