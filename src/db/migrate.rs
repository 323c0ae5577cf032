//! Schema migrations, keyed on `PRAGMA user_version`.
//! Each migration runs at most once; the version is bumped inside the same
//! batch so a crash cannot leave a half-applied step marked as done.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    r#"
    CREATE TABLE IF NOT EXISTS activity_sessions (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        date       TEXT NOT NULL,
        activity   TEXT NOT NULL,
        start_time INTEGER NOT NULL,
        stop_time  INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_sessions_date ON activity_sessions(date);
    CREATE INDEX IF NOT EXISTS idx_sessions_open
        ON activity_sessions(stop_time) WHERE stop_time IS NULL;
    "#,
)];

fn schema_version(conn: &Connection) -> AppResult<i64> {
    let v: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Apply every migration newer than the database's current version.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        let batch = format!(
            "BEGIN;\n{}\nPRAGMA user_version = {};\nCOMMIT;",
            sql, version
        );
        conn.execute_batch(&batch)
            .map_err(|e| AppError::Migration(format!("migration {} failed: {}", version, e)))?;
    }

    Ok(())
}
