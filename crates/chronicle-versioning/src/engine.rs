//! The atomic upsert protocol and cascade delete.
//!
//! An upsert runs five steps in one unit of work: upsert the project node,
//! detach the old "latest" edge (keeping the node and its historical edge),
//! create the new summary, attach the new "latest" edge, and link the new
//! summary back to the one it superseded. A reader never observes a project
//! with zero latest summaries once one exists, and never observes two.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use chronicle_core::errors::{ChronicleError, ChronicleResult};
use chronicle_core::model::{NewSummary, UpsertReceipt};
use chronicle_core::traits::GraphStore;

/// Inputs for appending a summary version. The embedding is computed by the
/// caller; this component never touches a model.
#[derive(Debug, Clone)]
pub struct UpsertRequest<'a> {
    /// Existing project to append to, or `None` to create a fresh one.
    pub project_id: Option<&'a str>,
    pub name: &'a str,
    pub question: &'a str,
    pub summary_text: &'a str,
    pub embedding: Vec<f32>,
}

/// Write-path engine. Invoked only on writes, independent of the read path.
pub struct VersionChainManager<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> VersionChainManager<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Append a new summary to a project's history, creating the project if
    /// needed. Atomic: either all five steps apply or none do.
    pub fn upsert(&self, request: UpsertRequest<'_>) -> ChronicleResult<UpsertReceipt> {
        if request.name.trim().is_empty() {
            return Err(ChronicleError::validation("project name must not be blank"));
        }
        if request.summary_text.trim().is_empty() {
            return Err(ChronicleError::validation("summary text must not be blank"));
        }

        let project_id = match request.project_id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        let summary_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let summary = NewSummary {
            id: summary_id.clone(),
            project_id: project_id.clone(),
            text: request.summary_text.to_string(),
            embedding: request.embedding.clone(),
            created_at: now,
        };

        let mut superseded: Option<String> = None;
        self.store.with_write(&mut |tx| {
            tx.upsert_project(&project_id, request.name, request.question, now)?;
            let previous = tx.unlink_latest(&project_id)?;
            tx.create_summary(&summary)?;
            tx.link_latest(&project_id, &summary.id)?;
            if let Some(prev_id) = &previous {
                tx.link_predecessor(&summary.id, prev_id)?;
            }
            superseded = previous;
            Ok(())
        })?;

        info!(
            project_id = %project_id,
            summary_id = %summary_id,
            superseded = superseded.as_deref().unwrap_or("none"),
            "appended summary version"
        );

        Ok(UpsertReceipt {
            project_id,
            project_name: request.name.to_string(),
            summary_id,
        })
    }

    /// Delete a project and its whole summary history. Idempotent: deleting
    /// a missing project returns `false` without error.
    pub fn delete(&self, project_id: &str) -> ChronicleResult<bool> {
        let mut existed = false;
        self.store.with_write(&mut |tx| {
            existed = tx.delete_project_cascade(project_id)?;
            Ok(())
        })?;

        info!(project_id = %project_id, existed, "deleted project");
        Ok(existed)
    }
}
