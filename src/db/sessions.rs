//! Session store mutations.
//!
//! The whole system hangs on one invariant: at most one row of
//! `activity_sessions` has a NULL `stop_time`. Both mutations below enforce
//! it with a single atomic read-modify-write against SQLite, so correctness
//! does not depend on application-level locking or survive-restart state.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::session::ActivitySession;
use chrono::{Local, NaiveDate};
use rusqlite::{OptionalExtension, Row, TransactionBehavior, params};

/// Conditional insert: writes the new open row only when no open row exists.
/// The affected-row count reports which branch fired.
const START_SESSION: &str = "
    INSERT INTO activity_sessions (date, activity, start_time)
    SELECT ?1, ?2, ?3
    WHERE NOT EXISTS (SELECT 1 FROM activity_sessions WHERE stop_time IS NULL)";

/// Conditional update-with-return: closes the open row, if any, and reports
/// what it closed.
const END_SESSION: &str = "
    UPDATE activity_sessions
    SET stop_time = ?1
    WHERE stop_time IS NULL
    RETURNING date, activity";

const ACTIVE_SESSION: &str =
    "SELECT activity FROM activity_sessions WHERE stop_time IS NULL LIMIT 1";

/// Open a new session for `activity`, dated and timed now.
///
/// Fails with [`AppError::ActiveSession`] carrying the conflicting activity
/// name when a session is already open. The conflict check and the insert
/// are one statement inside an immediate transaction, so concurrent callers
/// cannot both observe "no open row".
pub fn start_session(pool: &mut DbPool, activity: &str) -> AppResult<()> {
    let now = Local::now();
    let tx = pool
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let inserted = tx.execute(
        START_SESSION,
        params![
            now.format("%Y-%m-%d").to_string(),
            activity,
            now.timestamp()
        ],
    )?;

    if inserted == 0 {
        // Nothing was written; the write lock guarantees the open row is
        // still there for us to name.
        let open: Option<String> = tx.query_row(ACTIVE_SESSION, [], |row| row.get(0)).optional()?;
        tx.rollback()?;
        return match open {
            Some(name) => Err(AppError::ActiveSession(name)),
            None => Err(AppError::Other(
                "open session disappeared inside transaction".to_string(),
            )),
        };
    }

    tx.commit()?;
    Ok(())
}

/// Close the currently open session and return its start date and activity.
///
/// Fails with [`AppError::NoActiveSession`] when nothing is open. A single
/// `UPDATE .. RETURNING` keeps find-and-close atomic.
pub fn end_session(pool: &mut DbPool) -> AppResult<(NaiveDate, String)> {
    let now = Local::now();

    let row: Option<(String, String)> = pool
        .conn
        .query_row(END_SESSION, params![now.timestamp()], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?;

    match row {
        Some((date_str, activity)) => {
            let date = parse_row_date(&date_str)?;
            Ok((date, activity))
        }
        None => Err(AppError::NoActiveSession),
    }
}

/// Name of the currently open session's activity, if any.
pub fn active_session(pool: &mut DbPool) -> AppResult<Option<String>> {
    let open = pool
        .conn
        .query_row(ACTIVE_SESSION, [], |row| row.get(0))
        .optional()?;
    Ok(open)
}

/// Load every row for one date, oldest first. Used by `db --info` style
/// inspection, not by the aggregate queries (those sum in SQL).
pub fn load_sessions_by_date(pool: &mut DbPool, date: &NaiveDate) -> AppResult<Vec<ActivitySession>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, date, activity, start_time, stop_time
         FROM activity_sessions
         WHERE date = ?1
         ORDER BY id ASC",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map([date_str], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> rusqlite::Result<ActivitySession> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(ActivitySession {
        id: row.get("id")?,
        date,
        activity: row.get("activity")?,
        start_time: row.get("start_time")?,
        stop_time: row.get("stop_time")?,
    })
}

fn parse_row_date(date_str: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(date_str.to_string()))
}
