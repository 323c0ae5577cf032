use clap::{Parser, Subcommand};

/// Command-line interface definition for timeit
/// CLI application to track time spent on activities with SQLite
#[derive(Parser)]
#[command(
    name = "timeit",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple time tracking CLI: measure time spent on activities using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start a new activity session
    Start {
        /// Name of the activity being tracked (default: "programming")
        activity: Option<String>,
    },

    /// End the currently active session
    End,

    /// Show hours spent on each activity today, including untracked time
    Today,

    /// Print a year's activity chart data as JSON
    Chart {
        /// Year to chart (YYYY, default: current year)
        year: Option<i32>,
    },

    /// Serve the interactive HTML summary dashboard
    Summary {
        #[arg(long = "addr", help = "Listen address, e.g. 127.0.0.1:4000")]
        addr: Option<String>,
    },

    /// Manage the database (migrations, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}
