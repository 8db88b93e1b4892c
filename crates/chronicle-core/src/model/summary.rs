use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time textual snapshot of a project.
///
/// Summaries form a singly-linked backward chain per project
/// (most-recent-first) through `predecessor_id`. The chain is append-only:
/// once set, a predecessor link is never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Unique, immutable identifier.
    pub id: String,
    /// Owning project (the permanent historical edge).
    pub project_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// The summary this one superseded, if any.
    pub predecessor_id: Option<String>,
}

/// Write-path payload for creating a summary. Carries the embedding, which is
/// stored for vector search but never read back onto [`Summary`].
#[derive(Debug, Clone)]
pub struct NewSummary {
    pub id: String,
    pub project_id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// Projection returned when resuming a project: the project's intent plus its
/// current summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestSummary {
    pub project_id: String,
    pub question: String,
    pub summary_id: String,
    pub text: String,
}
