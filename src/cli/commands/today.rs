use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

/// Print the per-activity hours for today, `unTracked` remainder included.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Today) {
        let mut pool = DbPool::new(&cfg.database)?;
        let entries = summary::today(&mut pool)?;

        let mut table = Table::new(vec![
            Column::right("#", 3),
            Column::left("ACTIVITY", 20),
            Column::right("HOURS", 8),
        ]);

        for (i, entry) in entries.iter().enumerate() {
            table.add_row(vec![
                format!("{}", i + 1),
                entry.activity.clone(),
                format!("{:.2}", entry.hours),
            ]);
        }

        println!("{}", table.render());
    }
    Ok(())
}
