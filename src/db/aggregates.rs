//! Aggregate queries over closed sessions.
//!
//! Hours are computed as `(stop_time - start_time) / 3600`, rounded to two
//! decimals in SQL. Open sessions are excluded everywhere: an interval only
//! counts once it has closed.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::summary::{DailySlice, DurationSummary, MonthlySlice, YearlySlice};
use chrono::{Datelike, Local, NaiveDate};

const HOURS: &str = "ROUND(SUM(stop_time - start_time) * 1.0 / 3600, 2)";

/// Hours per activity for one calendar date.
pub fn durations_for_date(pool: &mut DbPool, date: &NaiveDate) -> AppResult<Vec<DurationSummary>> {
    let mut stmt = pool.conn.prepare(&format!(
        "SELECT activity, {HOURS} AS hours
         FROM activity_sessions
         WHERE date = ?1 AND stop_time IS NOT NULL
         GROUP BY activity
         ORDER BY activity"
    ))?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map([date_str], |row| {
        Ok(DurationSummary {
            activity: row.get(0)?,
            hours: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Hours per (date, activity) for one year, ordered by date ascending.
pub fn durations_for_year(pool: &mut DbPool, year: i32) -> AppResult<Vec<DailySlice>> {
    let mut stmt = pool.conn.prepare(&format!(
        "SELECT date, activity, {HOURS} AS hours
         FROM activity_sessions
         WHERE strftime('%Y', date) = ?1 AND stop_time IS NOT NULL
         GROUP BY date, activity
         ORDER BY date"
    ))?;

    let rows = stmt.query_map([format!("{year:04}")], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, f64>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (date_str, activity, hours) = r?;
        // A row the store accepted but we cannot date fails the whole
        // query; silently dropping it would skew the aggregates.
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(date_str))?;
        out.push(DailySlice {
            date,
            activity,
            hours,
        });
    }
    Ok(out)
}

/// Hours per (month 1-12, activity) for one year.
pub fn monthly_for_year(pool: &mut DbPool, year: i32) -> AppResult<Vec<MonthlySlice>> {
    let mut stmt = pool.conn.prepare(&format!(
        "SELECT CAST(strftime('%m', date) AS INTEGER) AS month, activity, {HOURS} AS hours
         FROM activity_sessions
         WHERE strftime('%Y', date) = ?1 AND stop_time IS NOT NULL
         GROUP BY month, activity
         ORDER BY month, activity"
    ))?;

    let rows = stmt.query_map([format!("{year:04}")], |row| {
        Ok(MonthlySlice {
            month: row.get::<_, i64>(0)? as u32,
            activity: row.get(1)?,
            hours: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Hours per (year, activity) over the whole table, ordered by year ascending.
pub fn yearly_totals(pool: &mut DbPool) -> AppResult<Vec<YearlySlice>> {
    let mut stmt = pool.conn.prepare(&format!(
        "SELECT CAST(strftime('%Y', date) AS INTEGER) AS year, activity, {HOURS} AS hours
         FROM activity_sessions
         WHERE stop_time IS NOT NULL
         GROUP BY year, activity
         ORDER BY year, activity"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok(YearlySlice {
            year: row.get::<_, i64>(0)? as i32,
            activity: row.get(1)?,
            hours: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Oldest and latest years with recorded sessions; the current year when the
/// table is empty. Used to populate the dashboard's year selector.
pub fn year_range(pool: &mut DbPool) -> AppResult<(i32, i32)> {
    let (oldest, latest): (Option<i64>, Option<i64>) = pool.conn.query_row(
        "SELECT
            CAST(MIN(strftime('%Y', date)) AS INTEGER),
            CAST(MAX(strftime('%Y', date)) AS INTEGER)
         FROM activity_sessions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match (oldest, latest) {
        (Some(o), Some(l)) => Ok((o as i32, l as i32)),
        _ => {
            let current = Local::now().year();
            Ok((current, current))
        }
    }
}
