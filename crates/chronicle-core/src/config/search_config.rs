use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Final result count for hybrid search.
    pub top_k: usize,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Adapter over-fetch multiplier applied before fusion.
    pub fuse_overfetch: usize,
    /// Candidate-pool multiplier handed to the reranking stage.
    pub rerank_overfetch: usize,
    /// Result count for direct vector-only search.
    pub semantic_top_k: usize,
    /// Similarity floor for direct vector-only search.
    pub semantic_min_score: f64,
    /// Result count for direct full-text search.
    pub lexical_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            fuse_overfetch: defaults::DEFAULT_FUSE_OVERFETCH,
            rerank_overfetch: defaults::DEFAULT_RERANK_OVERFETCH,
            semantic_top_k: defaults::DEFAULT_SEMANTIC_TOP_K,
            semantic_min_score: defaults::DEFAULT_SEMANTIC_MIN_SCORE,
            lexical_top_k: defaults::DEFAULT_LEXICAL_TOP_K,
        }
    }
}
