//! Default tuning constants. The over-fetch multipliers and `top_k` carry
//! over from the system this replaces; they are deliberate config knobs, not
//! derived values.

/// Result count for the hybrid search operations.
pub const DEFAULT_TOP_K: usize = 197;

/// RRF smoothing constant. Higher values dampen the influence of rank
/// differences far down the list.
pub const DEFAULT_RRF_K: u32 = 60;

/// Each adapter is asked for `fuse_overfetch * top_k` candidates before
/// fusion; over-fetching before truncation improves fusion recall.
pub const DEFAULT_FUSE_OVERFETCH: usize = 2;

/// The reranker receives `rerank_overfetch * top_k` fused candidates.
pub const DEFAULT_RERANK_OVERFETCH: usize = 3;

/// Result count for the direct vector-only search.
pub const DEFAULT_SEMANTIC_TOP_K: usize = 9;

/// Similarity floor for the direct vector-only search. Fusion ignores it
/// (rank position is all that matters there).
pub const DEFAULT_SEMANTIC_MIN_SCORE: f64 = 0.35;

/// Result count for the direct full-text search.
pub const DEFAULT_LEXICAL_TOP_K: usize = 10;

/// Read connections in the storage pool.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
