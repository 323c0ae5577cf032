//! Per-year chart cache.
//!
//! Explicitly constructed and injected into whatever composes the handlers;
//! no process-wide globals. Grids are computed lazily on first access and
//! patched one day at a time when a session closes, so a close followed by a
//! read never serves stale data. A per-year generation counter guards the
//! compute-outside-the-lock window: a grid computed before a concurrent
//! close or invalidation is discarded instead of cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::calendar;
use crate::db::aggregates;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::chart::{CalendarGrid, DayAggregate};
use chrono::{Datelike, NaiveDate};

#[derive(Default)]
struct CacheState {
    grids: HashMap<i32, Arc<CalendarGrid>>,
    /// Bumped by every refresh or invalidation of a year, cached or not.
    generations: HashMap<i32, u64>,
}

impl CacheState {
    fn generation(&self, year: i32) -> u64 {
        self.generations.get(&year).copied().unwrap_or(0)
    }

    fn bump(&mut self, year: i32) {
        *self.generations.entry(year).or_insert(0) += 1;
    }
}

#[derive(Default)]
pub struct ChartCache {
    inner: Mutex<CacheState>,
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A poisoned map still holds valid grids; worst case it is stale,
        // and stale entries are overwritten on the next compute.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached grid for `year`, computing and storing it on a miss. The lock
    /// is not held across the store query, so misses for unrelated years do
    /// not serialize each other. A grid whose year was refreshed or
    /// invalidated while it was being computed is thrown away and computed
    /// again; it may predate the change.
    pub fn get_or_compute(&self, pool: &mut DbPool, year: i32) -> AppResult<Arc<CalendarGrid>> {
        loop {
            let generation_at_miss = {
                let state = self.lock();
                if let Some(grid) = state.grids.get(&year) {
                    return Ok(Arc::clone(grid));
                }
                state.generation(year)
            };

            let slices = aggregates::durations_for_year(pool, year)?;
            let grid = Arc::new(calendar::build_grid(year, &slices)?);

            let mut state = self.lock();
            if state.generation(year) == generation_at_miss {
                state.grids.insert(year, Arc::clone(&grid));
                return Ok(grid);
            }
        }
    }

    /// Drop the cached grid for `year`, if present.
    pub fn invalidate(&self, year: i32) {
        let mut state = self.lock();
        state.grids.remove(&year);
        state.bump(year);
    }

    /// Re-aggregate a single date and patch it into the cached grid of its
    /// year. Awaitable replacement for a fire-and-forget refresh: when this
    /// returns, the next read sees the closed session. The generation bump
    /// covers the uncached case too; a first compute racing this call
    /// cannot slip a pre-refresh grid into the cache.
    pub fn refresh_day(&self, pool: &mut DbPool, date: NaiveDate) -> AppResult<()> {
        let year = date.year();

        let cached = {
            let mut state = self.lock();
            state.bump(year);
            state.grids.contains_key(&year)
        };
        if !cached {
            return Ok(());
        }

        let entries = aggregates::durations_for_date(pool, &date)?;
        let mut day = DayAggregate::empty(date);
        for entry in &entries {
            calendar::accumulate(&mut day, &entry.activity, entry.hours);
        }

        let mut state = self.lock();
        if let Some(grid) = state.grids.get_mut(&year) {
            if let Some(slot) = day_slot(year, date) {
                let grid = Arc::make_mut(grid);
                if let Some(week) = grid.weeks.get_mut(slot / 7) {
                    if let Some(cell) = week.days.get_mut(slot % 7) {
                        *cell = day;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Flat index of `date` inside its year's padded day sequence.
fn day_slot(year: i32, date: NaiveDate) -> Option<usize> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let front_pad = jan1.weekday().num_days_from_sunday() as usize;
    Some(front_pad + date.ordinal0() as usize)
}
