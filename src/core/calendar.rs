//! Calendar chart builder: lays one year of daily aggregates out as a
//! week-aligned grid (heatmap columns, Sunday first) with month labels.

use std::collections::BTreeMap;

use crate::errors::{AppError, AppResult};
use crate::models::chart::{CalendarGrid, DayAggregate, MonthLabel, Week};
use crate::models::summary::DailySlice;
use crate::utils::date::month_name;
use chrono::{Datelike, NaiveDate};

/// Horizontal pixels per week column, used for the month-label offsets.
const WEEK_COLUMN_PX: u32 = 14;

/// Discrete shade bucket for a day's total. Thresholds at 0, 2, 4 and 6
/// hours; a 2.0-hour day is already level 2, a 6.0-hour day level 4.
pub fn level(total_hours: f64) -> u8 {
    if total_hours == 0.0 {
        0
    } else if total_hours < 2.0 {
        1
    } else if total_hours < 4.0 {
        2
    } else if total_hours < 6.0 {
        3
    } else {
        4
    }
}

/// Fold one activity's hours into a day. The level is re-derived from the
/// running total on every fold, never patched incrementally.
pub fn accumulate(day: &mut DayAggregate, activity: &str, hours: f64) {
    *day.activities.entry(activity.to_string()).or_insert(0.0) += hours;
    day.total_hours += hours;
    day.level = level(day.total_hours);
}

/// Build the full grid for `year` from that year's per-(date, activity)
/// hours. Every real day of the year appears, zero-total days included; a
/// year with no sessions at all still yields a complete grid of level-0
/// days.
pub fn build_grid(year: i32, slices: &[DailySlice]) -> AppResult<CalendarGrid> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::InvalidYear(year.to_string()))?;
    let dec31 = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| AppError::InvalidYear(year.to_string()))?;

    let mut by_date: BTreeMap<NaiveDate, DayAggregate> = BTreeMap::new();
    for slice in slices {
        let day = by_date
            .entry(slice.date)
            .or_insert_with(|| DayAggregate::empty(slice.date));
        accumulate(day, &slice.activity, slice.hours);
    }

    let mut days: Vec<DayAggregate> = Vec::with_capacity(371);

    // Front padding lands Jan 1 in its weekday column (Sunday = 0).
    for _ in 0..jan1.weekday().num_days_from_sunday() {
        days.push(DayAggregate::placeholder());
    }

    // Inclusive upper bound: Dec 31 belongs to the grid, leap years too.
    let mut current = jan1;
    while current <= dec31 {
        days.push(
            by_date
                .remove(&current)
                .unwrap_or_else(|| DayAggregate::empty(current)),
        );
        current = current
            .succ_opt()
            .ok_or_else(|| AppError::InvalidYear(year.to_string()))?;
    }

    // Tail padding up to a whole number of weeks.
    while days.len() % 7 != 0 {
        days.push(DayAggregate::placeholder());
    }

    let weeks: Vec<Week> = days
        .chunks(7)
        .map(|chunk| Week {
            days: chunk.to_vec(),
        })
        .collect();

    let month_labels = collect_month_labels(&weeks);

    Ok(CalendarGrid {
        year: year.to_string(),
        weeks,
        month_labels,
    })
}

/// One label per month, in first-seen order while scanning the weeks; the
/// offset is the pixel position of the week where the month first appears.
fn collect_month_labels(weeks: &[Week]) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::with_capacity(12);
    let mut last_month: u32 = 0;

    for (week_index, week) in weeks.iter().enumerate() {
        for day in &week.days {
            let Some(date) = day.date else {
                continue;
            };
            if date.month() != last_month {
                last_month = date.month();
                labels.push(MonthLabel {
                    name: month_name(date.month()).to_string(),
                    pixel_offset: week_index as u32 * WEEK_COLUMN_PX,
                });
            }
        }
    }

    labels
}
