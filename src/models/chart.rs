//! Chart-facing data structures.
//! These are plain data handed to the presentation layers (terminal table,
//! embedded JSON for the web dashboard); field names follow the JSON shape
//! the dashboard scripts consume.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// Aggregate of one calendar day. `date == None` marks a padding slot used
/// to align the first and last week of the year grid; real days with no
/// recorded time keep their date and carry a zero total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAggregate {
    pub date: Option<NaiveDate>,
    pub activities: BTreeMap<String, f64>,
    pub total_hours: f64,
    pub level: u8,
}

impl DayAggregate {
    pub fn placeholder() -> Self {
        Self {
            date: None,
            activities: BTreeMap::new(),
            total_hours: 0.0,
            level: 0,
        }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::placeholder()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.date.is_none()
    }
}

/// One column of the year grid: exactly 7 days, Sunday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Week {
    pub days: Vec<DayAggregate>,
}

/// Header label for the grid: month name plus the horizontal pixel offset
/// of the week in which the month first appears.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLabel {
    pub name: String,
    pub pixel_offset: u32,
}

/// Week-aligned layout of a whole year's daily aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub year: String,
    pub weeks: Vec<Week>,
    pub month_labels: Vec<MonthLabel>,
}

/// Pie chart payload for the today view.
#[derive(Debug, Clone, Serialize)]
pub struct TodayChart {
    pub series: Vec<f64>,
    pub labels: Vec<String>,
}

/// One activity's data series for the monthly and yearly charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySeries {
    pub name: String,
    pub data: Vec<f64>,
}

/// Stacked bar payload: hours per month of one year, one series per activity.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyChart {
    pub title: String,
    pub series: Vec<ActivitySeries>,
}

/// Line style attached 1:1 with each year category of the yearly chart.
/// Presentational defaults, not derived from the data.
#[derive(Debug, Clone, Serialize)]
pub struct Stroke {
    pub width: Vec<u32>,
    pub curve: Vec<String>,
}

/// Line chart payload: hours per year, one series per activity.
#[derive(Debug, Clone, Serialize)]
pub struct YearlyChart {
    pub categories: Vec<String>,
    pub series: Vec<ActivitySeries>,
    pub stroke: Stroke,
}
