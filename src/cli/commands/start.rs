use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lifecycle;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Start a new activity session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { activity } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match lifecycle::start(
            &mut pool,
            activity.as_deref().unwrap_or(""),
            &cfg.default_activity,
        ) {
            Ok(name) => messages::success(format!(
                "New session for the activity '{}' has now started",
                name
            )),
            Err(AppError::ActiveSession(open)) => {
                messages::warning(format!(
                    "Session for the activity '{}' is currently active. End it before starting a new one",
                    open
                ));
                return Err(AppError::ActiveSession(open));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
