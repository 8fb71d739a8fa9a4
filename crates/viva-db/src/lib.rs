pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use store::{Store, StoreError};

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// The dashboard's SQLite file. Every query takes the one connection lock,
/// so statements from concurrent requests run one at a time.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the file and bring the schema up to date.
    /// Foreign keys are enforced: rows for unknown users are rejected.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // readers (dashboard polls) don't block the writer
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Privacy store opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private in-memory database, used by tests and throwaway dev runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Privacy store lock poisoned: {}", e))?;
        f(&conn)
    }
}
