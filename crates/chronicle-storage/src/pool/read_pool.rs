//! Round-robin pool of read-only connections.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use chronicle_core::errors::ChronicleResult;

use crate::to_store_err;

/// Read connections handed out round-robin. Readers never block the writer
/// under WAL.
pub struct ReadPool {
    conns: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path, size: usize) -> ChronicleResult<Self> {
        let size = size.max(1);
        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            super::pragmas::apply_read(&conn)?;
            conns.push(Mutex::new(conn));
        }
        Ok(Self {
            conns,
            cursor: AtomicUsize::new(0),
        })
    }

    /// In-memory pool. Each connection is its own isolated database; the
    /// engine never routes reads here in that mode.
    pub fn open_in_memory(size: usize) -> ChronicleResult<Self> {
        let size = size.max(1);
        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
            conns.push(Mutex::new(conn));
        }
        Ok(Self {
            conns,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next connection in round-robin order.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> ChronicleResult<T>,
    ) -> ChronicleResult<T> {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.conns.len();
        let conn = self.conns[idx]
            .lock()
            .map_err(|_| to_store_err("read connection mutex poisoned"))?;
        f(&conn)
    }
}
