//! Store aggregate queries and the per-year chart cache, against seeded
//! SQLite fixtures.

use std::sync::Arc;
use std::thread;

use timeit::core::cache::ChartCache;
use timeit::db::aggregates;
use timeit::errors::AppError;
use timeit::utils::date::parse_date;

mod common;
use common::{init_schema, open_pool, seed_closed, setup_test_db};

const T0: i64 = 1_700_000_000;

#[test]
fn test_durations_for_date_groups_and_rounds() {
    let db_path = setup_test_db("agg_for_date");
    let mut pool = init_schema(&db_path);

    // Two reading intervals (2h + 1.25h) and one writing interval (0.5h).
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 7200);
    seed_closed(&pool, "2024-03-15", "reading", T0 + 8000, T0 + 8000 + 4500);
    seed_closed(&pool, "2024-03-15", "writing", T0 + 20000, T0 + 20000 + 1800);
    seed_closed(&pool, "2024-03-16", "reading", T0 + 90000, T0 + 93600);

    let date = parse_date("2024-03-15").unwrap();
    let sums = aggregates::durations_for_date(&mut pool, &date).unwrap();

    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].activity, "reading");
    assert_eq!(sums[0].hours, 3.25);
    assert_eq!(sums[1].activity, "writing");
    assert_eq!(sums[1].hours, 0.5);
}

#[test]
fn test_open_sessions_are_excluded_from_aggregates() {
    let db_path = setup_test_db("agg_excludes_open");
    let mut pool = init_schema(&db_path);

    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 3600);
    pool.conn
        .execute(
            "INSERT INTO activity_sessions (date, activity, start_time)
             VALUES ('2024-03-15', 'reading', 1700100000)",
            [],
        )
        .unwrap();

    let date = parse_date("2024-03-15").unwrap();
    let sums = aggregates::durations_for_date(&mut pool, &date).unwrap();
    assert_eq!(sums.len(), 1);
    assert_eq!(sums[0].hours, 1.0);

    let year = aggregates::durations_for_year(&mut pool, 2024).unwrap();
    assert_eq!(year.len(), 1);
    assert_eq!(year[0].hours, 1.0);
}

#[test]
fn test_durations_for_year_ordered_by_date() {
    let db_path = setup_test_db("agg_for_year");
    let mut pool = init_schema(&db_path);

    seed_closed(&pool, "2024-09-01", "reading", T0, T0 + 3600);
    seed_closed(&pool, "2024-02-01", "reading", T0, T0 + 7200);
    seed_closed(&pool, "2023-12-31", "reading", T0, T0 + 7200);

    let slices = aggregates::durations_for_year(&mut pool, 2024).unwrap();
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].date, parse_date("2024-02-01").unwrap());
    assert_eq!(slices[1].date, parse_date("2024-09-01").unwrap());
}

#[test]
fn test_monthly_and_yearly_rollups() {
    let db_path = setup_test_db("agg_rollups");
    let mut pool = init_schema(&db_path);

    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 9000); // 2.5h
    seed_closed(&pool, "2024-03-20", "reading", T0, T0 + 1800); // 0.5h
    seed_closed(&pool, "2024-05-02", "writing", T0, T0 + 3600); // 1h
    seed_closed(&pool, "2023-01-01", "reading", T0, T0 + 3600); // other year

    let monthly = aggregates::monthly_for_year(&mut pool, 2024).unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!((monthly[0].month, monthly[0].hours), (3, 3.0));
    assert_eq!((monthly[1].month, monthly[1].hours), (5, 1.0));

    let yearly = aggregates::yearly_totals(&mut pool).unwrap();
    assert_eq!(yearly.len(), 3);
    assert_eq!(yearly[0].year, 2023);
    assert_eq!(yearly[1].year, 2024);
    assert_eq!(yearly[2].year, 2024);
}

#[test]
fn test_malformed_stored_date_fails_the_year_query() {
    let db_path = setup_test_db("agg_malformed_date");
    let mut pool = init_schema(&db_path);

    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 3600);
    // A date with a stray time component. SQLite's strftime still files it
    // under 2024, but it is not a plain calendar date.
    seed_closed(&pool, "2024-01-01 10:00", "reading", T0, T0 + 3600);

    let result = aggregates::durations_for_year(&mut pool, 2024);
    assert!(matches!(result, Err(AppError::InvalidDate(_))));
}

#[test]
fn test_year_range_defaults_to_current_year_when_empty() {
    let db_path = setup_test_db("agg_year_range_empty");
    let mut pool = init_schema(&db_path);

    let current = timeit::utils::date::current_year();
    assert_eq!(aggregates::year_range(&mut pool).unwrap(), (current, current));

    seed_closed(&pool, "2023-06-01", "reading", T0, T0 + 3600);
    seed_closed(&pool, "2025-06-01", "reading", T0, T0 + 3600);
    assert_eq!(aggregates::year_range(&mut pool).unwrap(), (2023, 2025));
}

#[test]
fn test_chart_cache_returns_same_grid_until_invalidated() {
    let db_path = setup_test_db("cache_hit");
    let mut pool = init_schema(&db_path);
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 9000);

    let cache = ChartCache::new();
    let first = cache.get_or_compute(&mut pool, 2024).unwrap();
    let second = cache.get_or_compute(&mut pool, 2024).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // New data is invisible until the cache entry is dropped or patched.
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 3600);
    let stale = cache.get_or_compute(&mut pool, 2024).unwrap();
    assert!(Arc::ptr_eq(&first, &stale));

    cache.invalidate(2024);
    let fresh = cache.get_or_compute(&mut pool, 2024).unwrap();
    assert!(!Arc::ptr_eq(&first, &fresh));
}

#[test]
fn test_refresh_day_patches_single_day_in_place() {
    let db_path = setup_test_db("cache_refresh_day");
    let mut pool = init_schema(&db_path);
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 9000); // 2.5h

    let cache = ChartCache::new();
    cache.get_or_compute(&mut pool, 2024).unwrap();

    seed_closed(&pool, "2024-03-15", "writing", T0, T0 + 5400); // +1.5h
    let date = parse_date("2024-03-15").unwrap();
    cache.refresh_day(&mut pool, date).unwrap();

    let grid = cache.get_or_compute(&mut pool, 2024).unwrap();
    let day = grid
        .weeks
        .iter()
        .flat_map(|w| w.days.iter())
        .find(|d| d.date == Some(date))
        .unwrap();

    assert_eq!(day.total_hours, 4.0);
    assert_eq!(day.level, 3);
    assert_eq!(day.activities["writing"], 1.5);
}

#[test]
fn test_refresh_day_for_uncached_year_is_noop() {
    let db_path = setup_test_db("cache_refresh_uncached");
    let mut pool = init_schema(&db_path);
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 9000);

    let cache = ChartCache::new();
    let date = parse_date("2024-03-15").unwrap();
    cache.refresh_day(&mut pool, date).unwrap();

    // First access still aggregates from scratch and sees the row.
    let grid = cache.get_or_compute(&mut pool, 2024).unwrap();
    let day = grid
        .weeks
        .iter()
        .flat_map(|w| w.days.iter())
        .find(|d| d.date == Some(date))
        .unwrap();
    assert_eq!(day.total_hours, 2.5);
}

#[test]
fn test_session_close_racing_first_compute_is_not_lost() {
    let db_path = setup_test_db("cache_close_race");
    let mut pool = init_schema(&db_path);

    let date = parse_date("2024-03-15").unwrap();
    let cache = Arc::new(ChartCache::new());
    let rounds: i64 = 25;

    // One thread keeps closing half-hour sessions and refreshing the day
    // while the other repeatedly drops the entry and recomputes the grid,
    // so refreshes land inside compute windows.
    let writer = {
        let cache = Arc::clone(&cache);
        let db_path = db_path.clone();
        thread::spawn(move || {
            let mut pool = open_pool(&db_path);
            for i in 0..rounds {
                let start = T0 + i * 3600;
                seed_closed(&pool, "2024-03-15", "reading", start, start + 1800);
                cache.refresh_day(&mut pool, date).unwrap();
            }
        })
    };

    let reader = {
        let cache = Arc::clone(&cache);
        let db_path = db_path.clone();
        thread::spawn(move || {
            let mut pool = open_pool(&db_path);
            for _ in 0..rounds {
                cache.invalidate(2024);
                cache.get_or_compute(&mut pool, 2024).unwrap();
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    // Whatever grid ended up cached must contain every closed interval; a
    // grid computed before the last refresh must not have been kept.
    let grid = cache.get_or_compute(&mut pool, 2024).unwrap();
    let day = grid
        .weeks
        .iter()
        .flat_map(|w| w.days.iter())
        .find(|d| d.date == Some(date))
        .unwrap();
    assert_eq!(day.total_hours, rounds as f64 * 0.5);
}
