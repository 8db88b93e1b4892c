//! Startup pragma configuration applied to every connection.

use rusqlite::Connection;

use chronicle_core::errors::ChronicleResult;

use crate::to_store_err;

/// Apply standard pragmas: WAL journaling, relaxed sync, foreign keys,
/// and a busy timeout so concurrent openers back off instead of failing.
pub fn apply(conn: &Connection) -> ChronicleResult<()> {
    // journal_mode returns the resulting mode as a row, so query it.
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .map_err(|e| to_store_err(format!("journal_mode: {e}")))?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(|e| to_store_err(format!("synchronous: {e}")))?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| to_store_err(format!("foreign_keys: {e}")))?;
    conn.pragma_update(None, "busy_timeout", 5000)
        .map_err(|e| to_store_err(format!("busy_timeout: {e}")))?;
    Ok(())
}

/// Reduced set for read-only connections: no journal-mode change (the writer
/// already switched the database to WAL).
pub fn apply_read(conn: &Connection) -> ChronicleResult<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| to_store_err(format!("foreign_keys: {e}")))?;
    conn.pragma_update(None, "busy_timeout", 5000)
        .map_err(|e| to_store_err(format!("busy_timeout: {e}")))?;
    Ok(())
}
