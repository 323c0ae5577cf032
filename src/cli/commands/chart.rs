use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar;
use crate::db::aggregates;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date;

/// Print one year's calendar chart data as JSON.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Chart { year } = cmd {
        let year = year.unwrap_or_else(date::current_year);

        let mut pool = DbPool::new(&cfg.database)?;
        let slices = aggregates::durations_for_year(&mut pool, year)?;
        let grid = calendar::build_grid(year, &slices)?;

        println!("{}", serde_json::to_string_pretty(&grid)?);
    }
    Ok(())
}
