//! Aggregation engine: turns raw interval sums into the three standard
//! views (today, monthly-per-current-year, all-years).

use std::collections::{BTreeMap, BTreeSet};

use crate::db::aggregates;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::chart::{ActivitySeries, MonthlyChart, Stroke, TodayChart, YearlyChart};
use crate::models::summary::{DurationSummary, MonthlySlice, YearlySlice};
use chrono::Local;

pub const UNTRACKED_LABEL: &str = "unTracked";

/// Stroke defaults attached 1:1 with each year category of the yearly
/// chart. Purely presentational.
const STROKE_WIDTH: u32 = 3;
const STROKE_CURVE: &str = "smooth";

fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Per-activity hours for today, plus the synthetic `unTracked` bucket.
pub fn today(pool: &mut DbPool) -> AppResult<Vec<DurationSummary>> {
    let date = Local::now().date_naive();
    let tracked = aggregates::durations_for_date(pool, &date)?;
    Ok(with_untracked(tracked))
}

/// Append `unTracked = 24 - Σ tracked` to the entries. Days already summing
/// to 24 hours or more get no untracked entry; the remainder is never
/// emitted as zero or negative.
pub fn with_untracked(mut entries: Vec<DurationSummary>) -> Vec<DurationSummary> {
    let tracked: f64 = entries.iter().map(|e| e.hours).sum();
    let remainder = round2(24.0 - tracked);
    if remainder > 0.0 {
        entries.push(DurationSummary {
            activity: UNTRACKED_LABEL.to_string(),
            hours: remainder,
        });
    }
    entries
}

pub fn today_chart(entries: &[DurationSummary]) -> TodayChart {
    TodayChart {
        series: entries.iter().map(|e| e.hours).collect(),
        labels: entries.iter().map(|e| e.activity.clone()).collect(),
    }
}

/// Stacked-bar payload for one year: for every activity a fixed 12-element
/// sequence of hours, January at index 0, silent months at 0.
pub fn monthly_chart(pool: &mut DbPool, year: i32) -> AppResult<MonthlyChart> {
    let slices = aggregates::monthly_for_year(pool, year)?;
    Ok(build_monthly_chart(year, &slices))
}

pub fn build_monthly_chart(year: i32, slices: &[MonthlySlice]) -> MonthlyChart {
    let mut per_activity: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for slice in slices {
        let months = per_activity
            .entry(slice.activity.as_str())
            .or_insert_with(|| vec![0.0; 12]);
        if (1..=12).contains(&slice.month) {
            months[(slice.month - 1) as usize] = slice.hours;
        }
    }

    MonthlyChart {
        title: format!("Hours per month, {year}"),
        series: per_activity
            .into_iter()
            .map(|(name, data)| ActivitySeries {
                name: name.to_string(),
                data,
            })
            .collect(),
    }
}

/// Line-chart payload across all recorded years: one series per activity,
/// aligned to the sorted set of distinct years present in the data.
pub fn yearly_chart(pool: &mut DbPool) -> AppResult<YearlyChart> {
    let slices = aggregates::yearly_totals(pool)?;
    Ok(build_yearly_chart(&slices))
}

pub fn build_yearly_chart(slices: &[YearlySlice]) -> YearlyChart {
    let years: BTreeSet<i32> = slices.iter().map(|s| s.year).collect();
    let years: Vec<i32> = years.into_iter().collect();

    let index_of: BTreeMap<i32, usize> = years
        .iter()
        .enumerate()
        .map(|(i, &y)| (y, i))
        .collect();

    let mut per_activity: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for slice in slices {
        let data = per_activity
            .entry(slice.activity.as_str())
            .or_insert_with(|| vec![0.0; years.len()]);
        data[index_of[&slice.year]] = slice.hours;
    }

    YearlyChart {
        categories: years.iter().map(|y| y.to_string()).collect(),
        series: per_activity
            .into_iter()
            .map(|(name, data)| ActivitySeries {
                name: name.to_string(),
                data,
            })
            .collect(),
        stroke: Stroke {
            width: vec![STROKE_WIDTH; years.len()],
            curve: vec![STROKE_CURVE.to_string(); years.len()],
        },
    }
}
