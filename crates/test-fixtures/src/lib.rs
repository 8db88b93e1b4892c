//! Deterministic model stubs and corpus helpers for tests across crates.
//!
//! The embedder and scorer here are pure functions of their input, so tests
//! that exercise the fusion and reranking pipelines are fully reproducible
//! without any real model.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chronicle_core::errors::ChronicleResult;
use chronicle_core::traits::{Embedder, PairScorer};

/// Embedding dimensionality used by [`DeterministicEmbedder`].
pub const FIXTURE_DIMENSIONS: usize = 64;

/// Hashed bag-of-words embedder: each lowercased token increments one bucket
/// chosen by a fixed-key hash. Texts sharing tokens get correlated vectors,
/// so cosine similarity tracks word overlap.
#[derive(Debug, Default)]
pub struct DeterministicEmbedder;

impl Embedder for DeterministicEmbedder {
    fn embed(&self, text: &str) -> ChronicleResult<Vec<f32>> {
        let mut vector = vec![0.0f32; FIXTURE_DIMENSIONS];
        for token in tokens(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() as usize) % FIXTURE_DIMENSIONS;
            vector[bucket] += 1.0;
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        FIXTURE_DIMENSIONS
    }

    fn name(&self) -> &str {
        "fixture-bow"
    }
}

/// Vocabulary embedder: one dimension per known word, unknown words ignored.
/// Collision-free, so tests can reason exactly about which texts overlap.
#[derive(Debug)]
pub struct VocabEmbedder {
    vocab: Vec<String>,
}

impl VocabEmbedder {
    pub fn new(vocab: &[&str]) -> Self {
        Self {
            vocab: vocab.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl Embedder for VocabEmbedder {
    fn embed(&self, text: &str) -> ChronicleResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.vocab.len()];
        for token in tokens(text) {
            if let Some(index) = self.vocab.iter().position(|w| *w == token) {
                vector[index] += 1.0;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }

    fn name(&self) -> &str {
        "fixture-vocab"
    }
}

/// Pairwise scorer: fraction of query tokens present in the document.
#[derive(Debug, Default)]
pub struct TokenOverlapScorer;

impl PairScorer for TokenOverlapScorer {
    fn score(&self, query: &str, document: &str) -> ChronicleResult<f64> {
        let query_tokens: Vec<String> = tokens(query).collect();
        if query_tokens.is_empty() {
            return Ok(0.0);
        }
        let document_tokens: HashSet<String> = tokens(document).collect();
        let shared = query_tokens
            .iter()
            .filter(|t| document_tokens.contains(*t))
            .count();
        Ok(shared as f64 / query_tokens.len() as f64)
    }

    fn name(&self) -> &str {
        "fixture-overlap"
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// A small corpus of (name, question, summary) rows for end-to-end tests.
pub fn sample_projects() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "auth-service",
            "how do we rotate signing keys",
            "Implemented JWKS rotation with a 24 hour overlap window for signing keys",
        ),
        (
            "billing-pipeline",
            "why do invoices drift from usage",
            "Traced invoice drift to late usage events, added a reconciliation pass",
        ),
        (
            "search-quality",
            "which queries return empty results",
            "Sampled empty result queries, most fail on typos in product names",
        ),
        (
            "data-migration",
            "can we move to the new schema without downtime",
            "Dual write migration plan validated on staging with checksum parity",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedder_is_deterministic() {
        let embedder = DeterministicEmbedder;
        let a = embedder.embed("rotate signing keys").unwrap();
        let b = embedder.embed("rotate signing keys").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), FIXTURE_DIMENSIONS);
    }

    #[test]
    fn overlapping_texts_share_buckets() {
        let embedder = DeterministicEmbedder;
        let a = embedder.embed("invoice drift reconciliation").unwrap();
        let b = embedder.embed("invoice drift").unwrap();
        let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert!(dot > 0.0);
    }

    #[test]
    fn overlap_scorer_ranks_exact_match_highest() {
        let scorer = TokenOverlapScorer;
        let full = scorer.score("invoice drift", "invoice drift traced").unwrap();
        let partial = scorer.score("invoice drift", "drift racing").unwrap();
        let none = scorer.score("invoice drift", "signing keys").unwrap();
        assert!(full > partial);
        assert!(partial > none);
        assert_eq!(none, 0.0);
    }
}
