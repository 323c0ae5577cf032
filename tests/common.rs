#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use timeit::db::initialize::init_db;
use timeit::db::pool::DbPool;

pub fn tim() -> Command {
    cargo_bin_cmd!("timeit")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timeit.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

pub fn open_pool(db_path: &str) -> DbPool {
    DbPool::new(db_path).expect("failed to open test database")
}

/// Create the schema directly through the library (no CLI round trip).
pub fn init_schema(db_path: &str) -> DbPool {
    let pool = open_pool(db_path);
    init_db(&pool.conn).expect("failed to initialize test database");
    pool
}

/// Insert a closed session row. Start/stop are epoch seconds.
pub fn seed_closed(pool: &DbPool, date: &str, activity: &str, start: i64, stop: i64) {
    pool.conn
        .execute(
            &format!(
                "INSERT INTO activity_sessions (date, activity, start_time, stop_time)
                 VALUES ('{}', '{}', {}, {})",
                date, activity, start, stop
            ),
            [],
        )
        .expect("failed to seed session row");
}

/// Count rows with a NULL stop_time.
pub fn open_row_count(pool: &DbPool) -> i64 {
    pool.conn
        .query_row(
            "SELECT COUNT(*) FROM activity_sessions WHERE stop_time IS NULL",
            [],
            |row| row.get(0),
        )
        .expect("failed to count open rows")
}
