//! Aggregated duration models produced by the store queries.

use chrono::NaiveDate;
use serde::Serialize;

/// Hours spent on one activity within some scope (a date, a month, a year).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSummary {
    pub activity: String,
    /// Fractional hours, rounded to 2 decimals at the query layer.
    pub hours: f64,
}

/// Per-day slice of a year: hours for one activity on one date.
#[derive(Debug, Clone)]
pub struct DailySlice {
    pub date: NaiveDate,
    pub activity: String,
    pub hours: f64,
}

/// Hours for one activity in one month (1-12) of a year.
#[derive(Debug, Clone)]
pub struct MonthlySlice {
    pub month: u32,
    pub activity: String,
    pub hours: f64,
}

/// Hours for one activity across one whole year.
#[derive(Debug, Clone)]
pub struct YearlySlice {
    pub year: i32,
    pub activity: String,
    pub hours: f64,
}
