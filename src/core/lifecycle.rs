//! Session lifecycle: start and end, with stable error semantics.
//! A second `start` without an intervening `end` (or an `end` with nothing
//! open) always gets a well-defined conflict error, never silent corruption.

use crate::db::pool::DbPool;
use crate::db::sessions;
use crate::errors::AppResult;
use chrono::NaiveDate;

pub const DEFAULT_ACTIVITY: &str = "programming";

/// Start a new session. An empty or whitespace-only name falls back to the
/// given default. Returns the activity name actually recorded.
pub fn start(pool: &mut DbPool, activity: &str, default_activity: &str) -> AppResult<String> {
    let name = match activity.trim() {
        "" => {
            if default_activity.trim().is_empty() {
                DEFAULT_ACTIVITY
            } else {
                default_activity.trim()
            }
        }
        trimmed => trimmed,
    };

    sessions::start_session(pool, name)?;
    Ok(name.to_string())
}

/// End the currently open session. Returns the date it was started on and
/// its activity name.
pub fn end(pool: &mut DbPool) -> AppResult<(NaiveDate, String)> {
    sessions::end_session(pool)
}
