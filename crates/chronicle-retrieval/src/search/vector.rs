//! Vector search adapter: wraps the store's nearest-neighbour query.
//!
//! The query embedding is produced by an external embedding function; this
//! adapter never computes it.

use chronicle_core::cancel::CancelToken;
use chronicle_core::errors::{ChronicleError, ChronicleResult, RetrievalError};
use chronicle_core::model::SearchHit;
use chronicle_core::traits::GraphStore;

/// Nearest-neighbour search by the backend's similarity metric, truncated to
/// `top_k`, then filtered to scores ≥ `min_score`.
pub fn search(
    store: &dyn GraphStore,
    query_embedding: &[f32],
    top_k: usize,
    min_score: f64,
    cancel: &CancelToken,
) -> ChronicleResult<Vec<SearchHit>> {
    let hits = store
        .vector_query(query_embedding, top_k, cancel)
        .map_err(|e| match e {
            ChronicleError::Cancelled => ChronicleError::Cancelled,
            other => RetrievalError::VectorFailed {
                reason: other.to_string(),
            }
            .into(),
        })?;

    Ok(hits
        .into_iter()
        .filter(|hit| hit.score >= min_score)
        .collect())
}
