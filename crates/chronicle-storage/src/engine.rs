//! StorageEngine: owns the ConnectionPool and implements the abstract
//! `GraphStore`/`GraphTx` interfaces over SQLite.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use chronicle_core::cancel::CancelToken;
use chronicle_core::config::defaults::DEFAULT_READ_POOL_SIZE;
use chronicle_core::config::StorageConfig;
use chronicle_core::errors::{ChronicleResult, StoreError};
use chronicle_core::model::{LatestSummary, NewSummary, Project, ProjectMatch, SearchHit, Summary};
use chronicle_core::traits::{GraphStore, GraphTx, WriteOp};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The SQLite graph store. Owns the connection pool and provides the full
/// read + transactional-write interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> ChronicleResult<Self> {
        Self::open_with_pool(path, DEFAULT_READ_POOL_SIZE)
    }

    /// Open with an explicit read pool size.
    pub fn open_with_pool(path: &Path, read_pool_size: usize) -> ChronicleResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> ChronicleResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open from configuration: file-backed when a path is set, in-memory
    /// otherwise.
    pub fn from_config(config: &StorageConfig) -> ChronicleResult<Self> {
        match &config.db_path {
            Some(path) => Self::open_with_pool(path, config.read_pool_size),
            None => Self::open_in_memory(),
        }
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run migrations on the write connection.
    fn initialize(&self) -> ChronicleResult<()> {
        self.pool
            .writer
            .with_conn(|conn| migrations::run_migrations(conn))
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<T>(
        &self,
        f: impl FnOnce(&Connection) -> ChronicleResult<T>,
    ) -> ChronicleResult<T> {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }
}

impl GraphStore for StorageEngine {
    fn with_write(&self, op: WriteOp<'_>) -> ChronicleResult<()> {
        self.pool.writer.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| StoreError::TransactionFailed {
                    reason: format!("begin: {e}"),
                })?;

            let mut graph_tx = SqliteTx { conn: &*tx };
            match op(&mut graph_tx) {
                Ok(()) => tx.commit().map_err(|e| {
                    StoreError::TransactionFailed {
                        reason: format!("commit: {e}"),
                    }
                    .into()
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "write transaction rolled back");
                    let _ = tx.rollback();
                    Err(e)
                }
            }
        })
    }

    fn project_by_summary(&self, summary_id: &str) -> ChronicleResult<Option<Project>> {
        self.with_reader(|conn| queries::project_ops::project_by_summary(conn, summary_id))
    }

    fn latest_summary(&self, project_id: &str) -> ChronicleResult<Option<LatestSummary>> {
        self.with_reader(|conn| queries::summary_ops::latest_summary(conn, project_id))
    }

    fn summaries_for_project(&self, project_id: &str) -> ChronicleResult<Vec<Summary>> {
        self.with_reader(|conn| queries::summary_ops::summaries_for_project(conn, project_id))
    }

    fn resolve_summaries(&self, summary_ids: &[String]) -> ChronicleResult<Vec<ProjectMatch>> {
        self.with_reader(|conn| queries::summary_ops::resolve_summaries(conn, summary_ids))
    }

    fn fulltext_query(
        &self,
        query: &str,
        limit: usize,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>> {
        cancel.checkpoint()?;
        self.with_reader(|conn| queries::fulltext::fulltext_query(conn, query, limit))
    }

    fn vector_query(
        &self,
        embedding: &[f32],
        limit: usize,
        cancel: &CancelToken,
    ) -> ChronicleResult<Vec<SearchHit>> {
        cancel.checkpoint()?;
        self.with_reader(|conn| queries::vector_search::vector_query(conn, embedding, limit, cancel))
    }
}

/// One open write transaction, exposing the individual graph mutations.
struct SqliteTx<'a> {
    conn: &'a Connection,
}

impl GraphTx for SqliteTx<'_> {
    fn upsert_project(
        &mut self,
        project_id: &str,
        name: &str,
        question: &str,
        updated_at: DateTime<Utc>,
    ) -> ChronicleResult<()> {
        queries::project_ops::upsert_project(self.conn, project_id, name, question, updated_at)
    }

    fn unlink_latest(&mut self, project_id: &str) -> ChronicleResult<Option<String>> {
        queries::summary_ops::unlink_latest(self.conn, project_id)
    }

    fn create_summary(&mut self, summary: &NewSummary) -> ChronicleResult<()> {
        queries::summary_ops::insert_summary(self.conn, summary)
    }

    fn link_latest(&mut self, project_id: &str, summary_id: &str) -> ChronicleResult<()> {
        queries::summary_ops::link_latest(self.conn, project_id, summary_id)
    }

    fn link_predecessor(
        &mut self,
        summary_id: &str,
        predecessor_id: &str,
    ) -> ChronicleResult<()> {
        queries::summary_ops::link_predecessor(self.conn, summary_id, predecessor_id)
    }

    fn delete_project_cascade(&mut self, project_id: &str) -> ChronicleResult<bool> {
        queries::summary_ops::delete_project_cascade(self.conn, project_id)
    }
}
