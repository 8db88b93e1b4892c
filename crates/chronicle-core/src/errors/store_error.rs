/// Storage-layer errors for graph store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("transaction failed: {reason}")]
    TransactionFailed { reason: String },

    /// Predecessor links are append-only; rewriting one is a protocol bug.
    #[error("predecessor link already set for summary {summary_id}")]
    PredecessorAlreadySet { summary_id: String },
}
