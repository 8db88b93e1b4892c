use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named unit of work. Owns zero-or-more summaries through a permanent
/// historical edge and exactly one through the distinguished "latest" edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique, immutable identifier (caller-supplied or generated UUID v4).
    pub id: String,
    /// Display label, mutable on every upsert.
    pub name: String,
    /// The originating intent, mutable on every upsert.
    pub question: String,
    /// Set on every write; monotonically non-decreasing.
    pub updated_at: DateTime<Utc>,
}

/// What an upsert hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertReceipt {
    pub project_id: String,
    pub project_name: String,
    pub summary_id: String,
}
