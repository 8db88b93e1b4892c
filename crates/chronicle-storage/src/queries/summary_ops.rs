//! Summary nodes and the edges that version them: the "latest" edge, the
//! historical edge (the `project_id` column), and the predecessor link.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use chronicle_core::errors::{ChronicleResult, StoreError};
use chronicle_core::model::{LatestSummary, NewSummary, ProjectMatch, Summary};

use crate::to_store_err;

/// Insert a summary node. Setting `project_id` here is the permanent
/// historical edge.
pub fn insert_summary(conn: &Connection, summary: &NewSummary) -> ChronicleResult<()> {
    let blob = super::vector_search::f32_vec_to_bytes(&summary.embedding);
    conn.execute(
        "INSERT INTO summaries (id, project_id, text, embedding, dimensions, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            summary.id,
            summary.project_id,
            summary.text,
            blob,
            summary.embedding.len() as i64,
            super::ts_to_sql(summary.created_at),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Remove the "latest" edge for a project, returning the summary it pointed
/// at. The summary node itself is untouched.
pub fn unlink_latest(conn: &Connection, project_id: &str) -> ChronicleResult<Option<String>> {
    let previous: Option<String> = conn
        .query_row(
            "SELECT summary_id FROM latest_summaries WHERE project_id = ?1",
            params![project_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;

    if previous.is_some() {
        conn.execute(
            "DELETE FROM latest_summaries WHERE project_id = ?1",
            params![project_id],
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    }

    Ok(previous)
}

/// Establish the "latest" edge. The table's primary key enforces at most one
/// per project; the version-chain protocol unlinks before relinking, so a
/// conflict here is a protocol violation and surfaces as an error.
pub fn link_latest(conn: &Connection, project_id: &str, summary_id: &str) -> ChronicleResult<()> {
    conn.execute(
        "INSERT INTO latest_summaries (project_id, summary_id) VALUES (?1, ?2)",
        params![project_id, summary_id],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Set the predecessor link. The guarded UPDATE enforces two invariants at
/// once: the link is append-only (never rewritten), and both summaries
/// belong to the same project (no cross-project chain splicing).
pub fn link_predecessor(
    conn: &Connection,
    summary_id: &str,
    predecessor_id: &str,
) -> ChronicleResult<()> {
    let updated = conn
        .execute(
            "UPDATE summaries SET predecessor_id = ?2
             WHERE id = ?1 AND predecessor_id IS NULL
               AND project_id = (SELECT project_id FROM summaries WHERE id = ?2)",
            params![summary_id, predecessor_id],
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    if updated == 1 {
        return Ok(());
    }

    let existing: Option<Option<String>> = conn
        .query_row(
            "SELECT predecessor_id FROM summaries WHERE id = ?1",
            params![summary_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;

    match existing {
        Some(Some(_)) => Err(StoreError::PredecessorAlreadySet {
            summary_id: summary_id.to_string(),
        }
        .into()),
        Some(None) => Err(to_store_err(format!(
            "predecessor {predecessor_id} is missing or belongs to another project"
        ))),
        None => Err(to_store_err(format!("summary {summary_id} not found"))),
    }
}

/// Delete a project and everything reachable from it. Edges are removed
/// explicitly, leaf-first, so the FTS triggers fire for every summary.
/// Returns whether the project existed.
pub fn delete_project_cascade(conn: &Connection, project_id: &str) -> ChronicleResult<bool> {
    conn.execute(
        "DELETE FROM latest_summaries WHERE project_id = ?1",
        params![project_id],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    conn.execute(
        "DELETE FROM summaries WHERE project_id = ?1",
        params![project_id],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    let deleted = conn
        .execute("DELETE FROM projects WHERE id = ?1", params![project_id])
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(deleted > 0)
}

/// The project's current summary, via the "latest" edge.
pub fn latest_summary(
    conn: &Connection,
    project_id: &str,
) -> ChronicleResult<Option<LatestSummary>> {
    conn.query_row(
        "SELECT p.id, p.question, s.id, s.text
         FROM projects p
         JOIN latest_summaries ls ON ls.project_id = p.id
         JOIN summaries s ON s.id = ls.summary_id
         WHERE p.id = ?1",
        params![project_id],
        |row| {
            Ok(LatestSummary {
                project_id: row.get(0)?,
                question: row.get(1)?,
                summary_id: row.get(2)?,
                text: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_store_err(e.to_string()))
}

/// Every summary attached to a project, most-recent-first. The rowid
/// tie-break keeps same-instant inserts in reverse insertion order.
pub fn summaries_for_project(
    conn: &Connection,
    project_id: &str,
) -> ChronicleResult<Vec<Summary>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, project_id, text, created_at, predecessor_id
             FROM summaries
             WHERE project_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![project_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut summaries = Vec::new();
    for row in rows {
        let (id, project_id, text, created_at, predecessor_id) =
            row.map_err(|e| to_store_err(e.to_string()))?;
        summaries.push(Summary {
            id,
            project_id,
            text,
            created_at: super::ts_from_sql(&created_at)?,
            predecessor_id,
        });
    }
    Ok(summaries)
}

/// Batch hydration: resolve summary ids to project + text payloads. Ids that
/// no longer resolve are simply absent from the result.
pub fn resolve_summaries(
    conn: &Connection,
    summary_ids: &[String],
) -> ChronicleResult<Vec<ProjectMatch>> {
    if summary_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; summary_ids.len()].join(", ");
    let sql = format!(
        "SELECT p.id, p.question, s.id, s.text
         FROM summaries s
         JOIN projects p ON p.id = s.project_id
         WHERE s.id IN ({placeholders})"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params_from_iter(summary_ids.iter()), |row| {
            Ok(ProjectMatch {
                project_id: row.get(0)?,
                question: row.get(1)?,
                summary_id: row.get(2)?,
                text: row.get(3)?,
                score: None,
            })
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut matches = Vec::with_capacity(summary_ids.len());
    for row in rows {
        matches.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(matches)
}
