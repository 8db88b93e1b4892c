//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines multiple ranked lists into a single fused ranking without
//! requiring score normalization across different retrieval methods. An item
//! present in only one list receives only that list's contribution; absence
//! from the other carries no penalty.

use std::collections::HashMap;

use chronicle_core::model::{FusedHit, SearchHit};

struct Accumulated {
    score: f64,
    /// Insertion order across the input lists, walked in the order given.
    /// Breaks score ties deterministically.
    first_seen: usize,
}

/// Fuse ranked result lists using Reciprocal Rank Fusion.
///
/// `rrf_k` is the smoothing constant (default 60). Higher values reduce the
/// influence of high-ranking items from any single list. Ranks are 1-based:
/// rank 1 is each list's highest-scoring item.
///
/// Output is sorted by fused score descending, ties broken by first-seen
/// order, and truncated to `top_k`.
pub fn fuse(lists: &[&[SearchHit]], rrf_k: u32, top_k: usize) -> Vec<FusedHit> {
    let mut scores: HashMap<String, Accumulated> = HashMap::new();

    for list in lists {
        for (index, hit) in list.iter().enumerate() {
            let rank = index + 1;
            let contribution = 1.0 / (rrf_k as f64 + rank as f64);
            let next_seen = scores.len();
            scores
                .entry(hit.summary_id.clone())
                .or_insert(Accumulated {
                    score: 0.0,
                    first_seen: next_seen,
                })
                .score += contribution;
        }
    }

    let mut fused: Vec<(String, Accumulated)> = scores.into_iter().collect();
    fused.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.first_seen.cmp(&b.1.first_seen))
    });
    fused.truncate(top_k);

    fused
        .into_iter()
        .map(|(summary_id, acc)| FusedHit {
            summary_id,
            score: acc.score,
        })
        .collect()
}
