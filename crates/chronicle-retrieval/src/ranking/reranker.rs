//! Pairwise reranking via the external relevance scorer.
//!
//! One scoring call per candidate, so this is applied only to the fused,
//! already-reduced candidate set, never to the full corpus.

use tracing::debug;

use chronicle_core::cancel::CancelToken;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::model::ProjectMatch;
use chronicle_core::traits::PairScorer;

/// Re-score each candidate against the query, sort by relevance descending,
/// and truncate to `top_k`. Empty input returns empty without invoking the
/// scorer. Ties keep the incoming (fused) order.
pub fn rerank(
    scorer: &dyn PairScorer,
    query: &str,
    mut candidates: Vec<ProjectMatch>,
    top_k: usize,
    cancel: &CancelToken,
) -> ChronicleResult<Vec<ProjectMatch>> {
    if candidates.is_empty() {
        return Ok(candidates);
    }

    cancel.checkpoint()?;
    let documents: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    let scores = scorer.score_batch(query, &documents)?;

    for (candidate, score) in candidates.iter_mut().zip(scores) {
        candidate.score = Some(score);
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(top_k);

    debug!(
        scorer = scorer.name(),
        kept = candidates.len(),
        "reranked candidates"
    );

    Ok(candidates)
}
