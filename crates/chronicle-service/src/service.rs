//! The exposed operations: upsert, lookups, hybrid search (plain and
//! reranked), direct lexical/semantic search, and delete.

use std::sync::Arc;

use tracing::instrument;

use chronicle_core::cancel::CancelToken;
use chronicle_core::config::ChronicleConfig;
use chronicle_core::errors::{ChronicleError, ChronicleResult};
use chronicle_core::model::{
    LatestSummary, Project, ProjectMatch, SearchHit, Summary, UpsertReceipt,
};
use chronicle_core::traits::{Embedder, GraphStore, PairScorer};
use chronicle_retrieval::RetrievalEngine;
use chronicle_versioning::{UpsertRequest, VersionChainManager};

/// Facade over the write path (version chain) and the read path (hybrid
/// retrieval). One instance per deployment; cheap to share behind an `Arc`.
pub struct ChronicleService {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn Embedder>,
    scorer: Option<Arc<dyn PairScorer>>,
    config: ChronicleConfig,
}

impl ChronicleService {
    pub fn new(
        store: Arc<dyn GraphStore>,
        embedder: Arc<dyn Embedder>,
        config: ChronicleConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            scorer: None,
            config,
        }
    }

    /// Attach the pairwise scorer used by [`hybrid_search_reranked`].
    ///
    /// [`hybrid_search_reranked`]: Self::hybrid_search_reranked
    pub fn with_scorer(mut self, scorer: Arc<dyn PairScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Create or update a project and append a new summary version. The
    /// embedding input is the question and summary joined by a newline, so
    /// retrieval sees both the intent and the content.
    #[instrument(skip_all, fields(name = %name))]
    pub fn upsert_project(
        &self,
        name: &str,
        question: &str,
        summary_text: &str,
        project_id: Option<&str>,
    ) -> ChronicleResult<UpsertReceipt> {
        if name.trim().is_empty() {
            return Err(ChronicleError::validation("project name must not be blank"));
        }
        if summary_text.trim().is_empty() {
            return Err(ChronicleError::validation("summary text must not be blank"));
        }

        let text_for_embedding = format!("{question}\n{summary_text}");
        let embedding = self.embedder.embed(&text_for_embedding)?;

        VersionChainManager::new(self.store.as_ref()).upsert(UpsertRequest {
            project_id,
            name,
            question,
            summary_text,
            embedding,
        })
    }

    /// The project owning a summary, or `None`.
    pub fn project_by_summary(&self, summary_id: &str) -> ChronicleResult<Option<Project>> {
        self.store.project_by_summary(summary_id)
    }

    /// A project's current summary, or `None`. Use this to resume a project.
    pub fn latest_summary(&self, project_id: &str) -> ChronicleResult<Option<LatestSummary>> {
        self.store.latest_summary(project_id)
    }

    /// A project's full summary history, most-recent-first. Empty for an
    /// unknown project.
    pub fn project_history(&self, project_id: &str) -> ChronicleResult<Vec<Summary>> {
        self.store.summaries_for_project(project_id)
    }

    /// Hybrid RRF search with the configured `top_k`/`rrf_k`.
    pub fn hybrid_search(
        &self,
        query_text: &str,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        let search = &self.config.search;
        self.hybrid_search_with(query_text, search.top_k, search.rrf_k, cancel)
    }

    /// Hybrid RRF search with explicit parameters.
    #[instrument(skip_all, fields(query = %query_text, top_k))]
    pub fn hybrid_search_with(
        &self,
        query_text: &str,
        top_k: usize,
        rrf_k: u32,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        self.validate_query(query_text, top_k)?;
        self.retrieval()
            .hybrid_search(query_text, top_k, rrf_k, cancel)
    }

    /// Hybrid search followed by pairwise reranking, with configured
    /// parameters.
    pub fn hybrid_search_reranked(
        &self,
        query_text: &str,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        let search = &self.config.search;
        self.hybrid_search_reranked_with(query_text, search.top_k, search.rrf_k, cancel)
    }

    /// Reranked hybrid search with explicit parameters.
    #[instrument(skip_all, fields(query = %query_text, top_k))]
    pub fn hybrid_search_reranked_with(
        &self,
        query_text: &str,
        top_k: usize,
        rrf_k: u32,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<ProjectMatch>> {
        self.validate_query(query_text, top_k)?;
        self.retrieval()
            .hybrid_search_reranked(query_text, top_k, rrf_k, cancel)
    }

    /// Direct vector-only search with the configured similarity floor.
    pub fn semantic_search(
        &self,
        query_text: &str,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>> {
        let search = &self.config.search;
        self.validate_query(query_text, search.semantic_top_k)?;
        self.retrieval().semantic_search(
            query_text,
            search.semantic_top_k,
            search.semantic_min_score,
            cancel,
        )
    }

    /// Direct full-text search.
    pub fn lexical_search(
        &self,
        query_text: &str,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>> {
        let search = &self.config.search;
        self.validate_query(query_text, search.lexical_top_k)?;
        self.retrieval()
            .lexical_search(query_text, search.lexical_top_k, 0.0, cancel)
    }

    /// Delete a project and its whole history. Idempotent; returns whether
    /// anything was deleted.
    #[instrument(skip_all, fields(project_id = %project_id))]
    pub fn delete_project(&self, project_id: &str) -> ChronicleResult<bool> {
        VersionChainManager::new(self.store.as_ref()).delete(project_id)
    }

    fn retrieval(&self) -> RetrievalEngine<'_> {
        let engine = RetrievalEngine::new(
            self.store.as_ref(),
            self.embedder.as_ref(),
            self.config.search.clone(),
        );
        match &self.scorer {
            Some(scorer) => engine.with_scorer(scorer.as_ref()),
            None => engine,
        }
    }

    fn validate_query(&self, query_text: &str, top_k: usize) -> ChronicleResult<()> {
        if query_text.trim().is_empty() {
            return Err(ChronicleError::validation("query text must not be blank"));
        }
        if top_k == 0 {
            return Err(ChronicleError::validation("top_k must be positive"));
        }
        Ok(())
    }
}
