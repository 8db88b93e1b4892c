use crate::cancel::CancelToken;
use crate::errors::ChronicleResult;
use crate::model::{LatestSummary, NewSummary, Project, ProjectMatch, SearchHit, Summary};
use chrono::{DateTime, Utc};

/// Individual graph mutations, applied within one atomic unit of work.
///
/// Obtained through [`GraphStore::with_write`]; every method either applies
/// or the whole unit rolls back.
pub trait GraphTx {
    /// Create the project if absent, else update `name`, `question`, and
    /// `updated_at`. `updated_at` must never regress on an existing row.
    fn upsert_project(
        &mut self,
        project_id: &str,
        name: &str,
        question: &str,
        updated_at: DateTime<Utc>,
    ) -> ChronicleResult<()>;

    /// Remove the "latest" edge for a project, returning the id of the
    /// summary it pointed at. The summary node and its historical edge are
    /// untouched. `None` if the project had no latest summary.
    fn unlink_latest(&mut self, project_id: &str) -> ChronicleResult<Option<String>>;

    /// Create a summary node. Recording `project_id` on the node is the
    /// permanent historical edge; it is never removed while the project
    /// lives.
    fn create_summary(&mut self, summary: &NewSummary) -> ChronicleResult<()>;

    /// Establish the "latest" edge from a project to a summary.
    fn link_latest(&mut self, project_id: &str, summary_id: &str) -> ChronicleResult<()>;

    /// Record that `summary_id` superseded `predecessor_id`. Fails with
    /// [`StoreError::PredecessorAlreadySet`](crate::errors::StoreError) if a
    /// link already exists: history is append-only.
    fn link_predecessor(&mut self, summary_id: &str, predecessor_id: &str)
        -> ChronicleResult<()>;

    /// Delete a project and every summary and edge reachable from it.
    /// Returns whether the project existed; deleting a missing project is
    /// not an error.
    fn delete_project_cascade(&mut self, project_id: &str) -> ChronicleResult<bool>;
}

/// A write closure run inside one atomic unit of work.
pub type WriteOp<'a> = &'a mut dyn FnMut(&mut dyn GraphTx) -> ChronicleResult<()>;

/// Abstract interface over a property-graph backend.
///
/// The reference implementation lives in `chronicle-storage`; the engine
/// crates depend only on this trait so a different backend is a drop-in.
pub trait GraphStore: Send + Sync {
    /// Run `op` inside a single atomic unit of work: commit when it returns
    /// `Ok`, roll back (leaving no partial state) when it returns `Err`.
    /// Concurrent writes to the same project must be isolated such that two
    /// simultaneous "latest" edges can never be observed.
    fn with_write(&self, op: WriteOp<'_>) -> ChronicleResult<()>;

    /// The project owning the given summary, via the historical edge.
    fn project_by_summary(&self, summary_id: &str) -> ChronicleResult<Option<Project>>;

    /// The project's current summary, via the "latest" edge.
    fn latest_summary(&self, project_id: &str) -> ChronicleResult<Option<LatestSummary>>;

    /// Every summary ever attached to a project (the historical edge),
    /// most-recent-first. Empty for an unknown project.
    fn summaries_for_project(&self, project_id: &str) -> ChronicleResult<Vec<Summary>>;

    /// Batch hydration: resolve summary ids to their owning project and text
    /// payload. Ids with no resolvable payload are omitted, not errors; row
    /// order is unspecified.
    fn resolve_summaries(&self, summary_ids: &[String]) -> ChronicleResult<Vec<ProjectMatch>>;

    /// Full-text query over summary text, ordered by relevance descending,
    /// truncated to `limit`. A missing index or empty corpus yields an empty
    /// list, not an error.
    fn fulltext_query(
        &self,
        query: &str,
        limit: usize,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>>;

    /// Nearest-neighbour query over stored embeddings, ordered by cosine
    /// similarity descending, truncated to `limit`.
    fn vector_query(
        &self,
        embedding: &[f32],
        limit: usize,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>>;
}
