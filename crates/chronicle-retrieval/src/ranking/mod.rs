//! Precision reranking over the fused candidate set.

pub mod reranker;

pub use reranker::rerank;
