use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lifecycle;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// End the currently active session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::End) {
        let mut pool = DbPool::new(&cfg.database)?;

        match lifecycle::end(&mut pool) {
            Ok((date, activity)) => messages::success(format!(
                "Session for the activity '{}' (started on {}) has now ended",
                activity, date
            )),
            Err(AppError::NoActiveSession) => {
                messages::warning("There is no session to end");
                return Err(AppError::NoActiveSession);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
