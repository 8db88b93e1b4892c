//! Project node upsert and lookups.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use chronicle_core::errors::ChronicleResult;
use chronicle_core::model::Project;

use crate::to_store_err;

/// Create the project if absent, else update its mutable fields.
/// `MAX(updated_at, excluded.updated_at)` keeps the timestamp monotonically
/// non-decreasing even if the wall clock steps backwards.
pub fn upsert_project(
    conn: &Connection,
    project_id: &str,
    name: &str,
    question: &str,
    updated_at: DateTime<Utc>,
) -> ChronicleResult<()> {
    conn.execute(
        "INSERT INTO projects (id, name, question, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            question = excluded.question,
            updated_at = MAX(updated_at, excluded.updated_at)",
        params![project_id, name, question, super::ts_to_sql(updated_at)],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// The project owning a summary, via the historical edge.
pub fn project_by_summary(
    conn: &Connection,
    summary_id: &str,
) -> ChronicleResult<Option<Project>> {
    let mut stmt = conn
        .prepare(
            "SELECT p.id, p.name, p.question, p.updated_at
             FROM projects p
             JOIN summaries s ON s.project_id = p.id
             WHERE s.id = ?1",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let row = stmt
        .query_row(params![summary_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;

    row.map(|(id, name, question, updated_at)| {
        Ok(Project {
            id,
            name,
            question,
            updated_at: super::ts_from_sql(&updated_at)?,
        })
    })
    .transpose()
}
