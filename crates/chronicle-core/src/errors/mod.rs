//! Error taxonomy: per-subsystem enums wrapped by [`ChronicleError`].
//!
//! Absence (lookup by id yields nothing) is modelled as `Option`, never as an
//! error variant. Write operations either fully succeed or surface a
//! [`StoreError`] with the transaction rolled back.

mod retrieval_error;
mod store_error;

pub use retrieval_error::RetrievalError;
pub use store_error::StoreError;

/// Workspace-level error type. Library crates return this everywhere.
#[derive(Debug, thiserror::Error)]
pub enum ChronicleError {
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("config error: {reason}")]
    Config { reason: String },

    /// The caller's cancellation signal fired at a suspension point.
    #[error("operation cancelled before completion")]
    Cancelled,
}

pub type ChronicleResult<T> = Result<T, ChronicleError>;

impl ChronicleError {
    /// Shorthand for a validation failure.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
