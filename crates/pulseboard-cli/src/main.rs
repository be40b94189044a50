use anyhow::Result;
use clap::{Parser, Subcommand};
use pulseboard_core::dashboard::SortField;
use std::path::PathBuf;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(about = "Pulseboard - headless admin dashboard", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the session file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and erase the stored session
    Logout,
    /// Show the current session
    Status,
    /// Fetch and print the dashboard
    Dashboard {
        /// Refresh the stats after fetching
        #[arg(long)]
        refresh: bool,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the development activity table
    Activities {
        /// Sort column: user, commit or date
        #[arg(long)]
        sort: Option<SortField>,
        /// Select the sort column twice, flipping to descending
        #[arg(long, requires = "sort")]
        toggle: bool,
        /// Delete the activity with this id before printing
        #[arg(long)]
        delete: Option<u64>,
    },
    /// Fetch the dashboard and follow live updates
    Watch {
        /// Number of live-update ticks to print
        #[arg(long, default_value_t = 3)]
        ticks: u32,
    },
    /// Show the notification inbox
    Notifications {
        /// Mark one notification read
        #[arg(long)]
        mark_read: Option<u64>,
        /// Mark every notification read
        #[arg(long)]
        mark_all_read: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config)?;
    bootstrap::init_tracing(&config);
    let app = bootstrap::App::build(config, cli.storage).await?;

    let outcome = match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&app, username, password).await
        }
        Commands::Logout => commands::session::logout(&app).await,
        Commands::Status => commands::session::status(&app).await,
        Commands::Dashboard { refresh, json } => {
            commands::dashboard::show(&app, refresh, json).await
        }
        Commands::Activities {
            sort,
            toggle,
            delete,
        } => commands::activities::show(&app, sort, toggle, delete).await,
        Commands::Watch { ticks } => commands::watch::run(&app, ticks).await,
        Commands::Notifications {
            mark_read,
            mark_all_read,
        } => commands::notifications::show(&app, mark_read, mark_all_read).await,
    };

    app.shutdown();
    outcome
}
