//! Lexical search adapter: wraps the store's full-text query.

use chronicle_core::cancel::CancelToken;
use chronicle_core::errors::{ChronicleError, ChronicleResult, RetrievalError};
use chronicle_core::model::SearchHit;
use chronicle_core::traits::GraphStore;

/// Full-text search, ordered by relevance descending. Results below
/// `min_score` are dropped; `top_k` bounds the count after filtering.
pub fn search(
    store: &dyn GraphStore,
    query: &str,
    top_k: usize,
    min_score: f64,
    cancel: &CancelToken,
) -> ChronicleResult<Vec<SearchHit>> {
    let hits = store
        .fulltext_query(query, top_k, cancel)
        .map_err(|e| match e {
            ChronicleError::Cancelled => ChronicleError::Cancelled,
            other => RetrievalError::LexicalFailed {
                reason: other.to_string(),
            }
            .into(),
        })?;

    Ok(hits
        .into_iter()
        .filter(|hit| hit.score >= min_score)
        .take(top_k)
        .collect())
}
