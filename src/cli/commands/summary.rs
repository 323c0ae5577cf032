use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::server;
use crate::ui::messages;
use tracing_subscriber::EnvFilter;

/// Run the summary dashboard server until interrupted.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { addr } = cmd {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        let addr = addr.clone().unwrap_or_else(|| cfg.listen_addr.clone());
        messages::info(format!("Summary dashboard on http://{addr}"));

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| AppError::Server(format!("failed to start runtime: {e}")))?;
        runtime.block_on(server::serve(
            cfg.database.clone(),
            addr,
            cfg.default_activity.clone(),
        ))?;
    }
    Ok(())
}
