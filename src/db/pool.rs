//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        // Concurrent callers block on the write lock instead of failing
        // with SQLITE_BUSY, so conflicts surface as domain errors.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
