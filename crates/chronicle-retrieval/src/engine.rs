//! RetrievalEngine: orchestrates the hybrid read path.
//!
//! query → lexical + vector adapters (concurrently) → RRF fusion →
//! hydration → optional pairwise rerank.

use tracing::{debug, info, warn};

use chronicle_core::cancel::CancelToken;
use chronicle_core::config::SearchConfig;
use chronicle_core::errors::{ChronicleResult, RetrievalError};
use chronicle_core::model::{FusedHit, ProjectMatch, SearchHit};
use chronicle_core::traits::{Embedder, GraphStore, PairScorer};

use crate::ranking;
use crate::search::{lexical, rrf, vector};

/// The hybrid search engine. Holds explicitly injected collaborators; no
/// ambient global state.
pub struct RetrievalEngine<'a> {
    store: &'a dyn GraphStore,
    embedder: &'a dyn Embedder,
    scorer: Option<&'a dyn PairScorer>,
    config: SearchConfig,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(store: &'a dyn GraphStore, embedder: &'a dyn Embedder, config: SearchConfig) -> Self {
        Self {
            store,
            embedder,
            scorer: None,
            config,
        }
    }

    /// Attach a pairwise scorer, enabling [`hybrid_search_reranked`].
    ///
    /// [`hybrid_search_reranked`]: Self::hybrid_search_reranked
    pub fn with_scorer(mut self, scorer: &'a dyn PairScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Hybrid RRF search: fuse both adapters' rankings and hydrate the top
    /// `top_k` candidates.
    pub fn hybrid_search(
        &self,
        query_text: &str,
        top_k: usize,
        rrf_k: u32,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        let fused = self.fuse(query_text, top_k, rrf_k, cancel)?;
        let matches = self.hydrate(&fused, cancel)?;

        info!(
            query = %query_text,
            fused = fused.len(),
            returned = matches.len(),
            "hybrid search complete"
        );
        Ok(matches)
    }

    /// Hybrid search over an enlarged candidate pool, then rerank down to
    /// `top_k` with the pairwise scorer.
    pub fn hybrid_search_reranked(
        &self,
        query_text: &str,
        top_k: usize,
        rrf_k: u32,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        let scorer = self.scorer.ok_or_else(|| RetrievalError::ScoringFailed {
            reason: "no pair scorer configured".to_string(),
        })?;

        let pool_k = top_k.saturating_mul(self.config.rerank_overfetch).max(top_k);
        let fused = self.fuse(query_text, pool_k, rrf_k, cancel)?;
        let candidates = self.hydrate(&fused, cancel)?;

        let reranked = ranking::rerank(scorer, query_text, candidates, top_k, cancel)?;
        info!(
            query = %query_text,
            pool = pool_k,
            returned = reranked.len(),
            "reranked hybrid search complete"
        );
        Ok(reranked)
    }

    /// Direct vector-only search (no fusion), applying the caller's
    /// similarity floor.
    pub fn semantic_search(
        &self,
        query_text: &str,
        top_k: usize,
        min_score: f64,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>> {
        let embedding = self.embed_query(query_text)?;
        vector::search(self.store, &embedding, top_k, min_score, cancel)
    }

    /// Direct full-text search (no fusion).
    pub fn lexical_search(
        &self,
        query_text: &str,
        top_k: usize,
        min_score: f64,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>> {
        lexical::search(self.store, query_text, top_k, min_score, cancel)
    }

    /// Run both adapters and fuse. Each adapter is asked for an over-fetched
    /// pool with no score floor: only rank position matters to fusion. The
    /// adapters are independent, so they run concurrently; a failure of
    /// either fails the whole query, since fusing half the evidence would
    /// silently bias results.
    fn fuse(
        &self,
        query_text: &str,
        top_k: usize,
        rrf_k: u32,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<FusedHit>> {
        let embedding = self.embed_query(query_text)?;
        let fetch = top_k.saturating_mul(self.config.fuse_overfetch).max(top_k);

        cancel.checkpoint()?;
        let (lexical_hits, vector_hits) = rayon::join(
            || lexical::search(self.store, query_text, fetch, 0.0, cancel),
            || vector::search(self.store, &embedding, fetch, 0.0, cancel),
        );
        let lexical_hits = lexical_hits?;
        let vector_hits = vector_hits?;

        debug!(
            lexical = lexical_hits.len(),
            vector = vector_hits.len(),
            fetch,
            "adapter pools retrieved"
        );

        Ok(rrf::fuse(&[&lexical_hits, &vector_hits], rrf_k, top_k))
    }

    /// Resolve fused ids back to project payloads, preserving fused order.
    /// Candidates deleted between search and hydration are dropped, not
    /// errors.
    fn hydrate(
        &self,
        fused: &[FusedHit],
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        if fused.is_empty() {
            return Ok(Vec::new());
        }

        cancel.checkpoint()?;
        let ids: Vec<String> = fused.iter().map(|f| f.summary_id.clone()).collect();
        let rows = self.store.resolve_summaries(&ids)?;

        let mut by_id: std::collections::HashMap<String, ProjectMatch> = rows
            .into_iter()
            .map(|row| (row.summary_id.clone(), row))
            .collect();

        let mut matches = Vec::with_capacity(fused.len());
        for hit in fused {
            match by_id.remove(&hit.summary_id) {
                Some(row) => matches.push(row),
                None => {
                    warn!(summary_id = %hit.summary_id, "dropping unresolvable candidate");
                }
            }
        }
        Ok(matches)
    }

    fn embed_query(&self, query_text: &str) -> ChronicleResult<Vec<f32>> {
        self.embedder
            .embed(query_text)
            .map_err(|e| match e {
                chronicle_core::errors::ChronicleError::Cancelled => {
                    chronicle_core::errors::ChronicleError::Cancelled
                }
                other => RetrievalError::EmbeddingFailed {
                    reason: other.to_string(),
                }
                .into(),
            })
    }
}
