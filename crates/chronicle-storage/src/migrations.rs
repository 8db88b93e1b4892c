//! Schema migrations, gated on `PRAGMA user_version`.

use rusqlite::Connection;

use chronicle_core::errors::{ChronicleResult, StoreError};

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Run all outstanding migrations.
pub fn run_migrations(conn: &Connection) -> ChronicleResult<()> {
    let version: u32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StoreError::MigrationFailed {
            version: 0,
            reason: e.to_string(),
        })?;

    if version < 1 {
        apply_v1(conn)?;
        set_version(conn, 1)?;
        tracing::debug!(version = 1, "applied schema migration");
    }

    Ok(())
}

fn set_version(conn: &Connection, version: u32) -> ChronicleResult<()> {
    conn.pragma_update(None, "user_version", version)
        .map_err(|e| {
            StoreError::MigrationFailed {
                version,
                reason: e.to_string(),
            }
            .into()
        })
}

/// v1: projects, summaries, the "latest" edge table, and the FTS5 index.
///
/// Graph mapping: `summaries.project_id` is the permanent historical edge,
/// `latest_summaries` holds the at-most-one "latest" edge per project, and
/// `summaries.predecessor_id` is the backward version chain. The predecessor
/// FK is deferred so a project's whole chain can be deleted in one statement.
fn apply_v1(conn: &Connection) -> ChronicleResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS projects (
            id         TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            question   TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS summaries (
            id             TEXT PRIMARY KEY,
            project_id     TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            text           TEXT NOT NULL,
            embedding      BLOB NOT NULL,
            dimensions     INTEGER NOT NULL,
            created_at     TEXT NOT NULL,
            predecessor_id TEXT REFERENCES summaries(id) DEFERRABLE INITIALLY DEFERRED
        );
        CREATE INDEX IF NOT EXISTS idx_summaries_project ON summaries(project_id);

        CREATE TABLE IF NOT EXISTS latest_summaries (
            project_id TEXT PRIMARY KEY REFERENCES projects(id) ON DELETE CASCADE,
            summary_id TEXT NOT NULL REFERENCES summaries(id)
        );

        CREATE VIRTUAL TABLE IF NOT EXISTS summary_fts USING fts5(
            text,
            content='summaries',
            content_rowid='rowid'
        );

        -- Summary text is immutable, so insert/delete triggers suffice.
        CREATE TRIGGER IF NOT EXISTS summaries_fts_insert
        AFTER INSERT ON summaries BEGIN
            INSERT INTO summary_fts(rowid, text) VALUES (new.rowid, new.text);
        END;

        CREATE TRIGGER IF NOT EXISTS summaries_fts_delete
        AFTER DELETE ON summaries BEGIN
            INSERT INTO summary_fts(summary_fts, rowid, text)
            VALUES ('delete', old.rowid, old.text);
        END;",
    )
    .map_err(|e| {
        StoreError::MigrationFailed {
            version: 1,
            reason: e.to_string(),
        }
        .into()
    })
}
