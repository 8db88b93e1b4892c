//! The single write connection. All mutations are serialized through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use chronicle_core::errors::ChronicleResult;

use crate::to_store_err;

/// Owns the one connection allowed to write. SQLite serializes writers
/// anyway; funneling them through one connection avoids SQLITE_BUSY churn.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> ChronicleResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_store_err(e.to_string()))?;
        super::pragmas::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> ChronicleResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
        super::pragmas::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the write connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> ChronicleResult<T>,
    ) -> ChronicleResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_store_err("write connection mutex poisoned"))?;
        f(&conn)
    }
}
