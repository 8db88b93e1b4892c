//! # chronicle-retrieval
//!
//! The read path: lexical and vector search adapters, Reciprocal Rank
//! Fusion, candidate hydration, and the optional pairwise reranking stage.
//!
//! A query enters [`engine::RetrievalEngine`], which invokes both adapters
//! independently, fuses their ranked lists by rank position (scores from the
//! two backends are not comparable in magnitude), resolves the fused ids
//! back to project payloads, and optionally reranks with an external
//! pairwise scorer.

pub mod engine;
pub mod ranking;
pub mod search;

pub use engine::RetrievalEngine;
