//! # chronicle-storage
//!
//! SQLite-backed reference implementation of the abstract graph store.
//! Projects and summaries are nodes; the "latest" edge, the historical edge,
//! and the predecessor link are relational encodings of the graph
//! relationships. Full-text search is FTS5; vector search is a brute-force
//! cosine scan over stored embeddings.
//!
//! The engine crates depend only on the `GraphStore`/`GraphTx` traits, so a
//! property-graph backend can replace this crate without touching them.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use chronicle_core::errors::{ChronicleError, StoreError};

/// Map an underlying SQLite failure into the workspace error type.
pub(crate) fn to_store_err(message: impl Into<String>) -> ChronicleError {
    StoreError::Sqlite {
        message: message.into(),
    }
    .into()
}
