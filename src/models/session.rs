//! Session row models.
//! Thin wrappers around rows of the `activity_sessions` table.

use chrono::NaiveDate;

/// One persisted session interval. `stop_time` is `None` while the session
/// is still running; at most one such row exists at any time.
#[derive(Debug, Clone)]
pub struct ActivitySession {
    pub id: i64,
    pub date: NaiveDate,
    pub activity: String,
    pub start_time: i64,
    pub stop_time: Option<i64>,
}

impl ActivitySession {
    pub fn is_open(&self) -> bool {
        self.stop_time.is_none()
    }
}
