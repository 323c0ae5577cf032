//! CLI `chart` JSON output and `db` maintenance commands.

use predicates::str::contains;

mod common;
use common::{init_schema, seed_closed, setup_test_db, tim};

const T0: i64 = 1_700_000_000;

#[test]
fn test_chart_prints_year_grid_as_json() {
    let db_path = setup_test_db("chart_json");
    let pool = init_schema(&db_path);
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 9000);
    drop(pool);

    tim()
        .args(["--db", &db_path, "chart", "2024"])
        .assert()
        .success()
        .stdout(contains("\"year\": \"2024\""))
        .stdout(contains("\"2024-03-15\""))
        .stdout(contains("reading"))
        .stdout(contains("January"))
        .stdout(contains("December"));
}

#[test]
fn test_chart_for_empty_year_is_still_a_full_grid() {
    let db_path = setup_test_db("chart_empty_year");
    let pool = init_schema(&db_path);
    drop(pool);

    tim()
        .args(["--db", &db_path, "chart", "2022"])
        .assert()
        .success()
        .stdout(contains("\"year\": \"2022\""))
        .stdout(contains("\"2022-12-31\""));
}

#[test]
fn test_db_info_reports_counts() {
    let db_path = setup_test_db("db_info");
    let pool = init_schema(&db_path);
    seed_closed(&pool, "2024-03-15", "reading", T0, T0 + 9000);
    drop(pool);

    tim()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total sessions"))
        .stdout(contains("2024-03-15"));
}

#[test]
fn test_db_migrate_is_idempotent() {
    let db_path = setup_test_db("db_migrate_twice");
    let pool = init_schema(&db_path);
    drop(pool);

    tim()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success();

    tim()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success();
}
