use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use achtrack::tracker::Step;

mod cli;

#[derive(Parser)]
#[command(name = "achtrack")]
#[command(about = "Achievement tracker - browse the catalog and track tiered progress offline")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.achtrack/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for cached catalog and progress (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Never contact the API; work from cached data only
    #[arg(long, global = true)]
    offline: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog (cache first, then API) and show progress
    Sync,

    /// Discard the cached catalog and fetch it again
    Refresh,

    /// Show the group/category tree
    Tree,

    /// Search achievements and categories by name
    Search {
        query: String,
    },

    /// List the achievements of a category
    Show {
        category: u32,

        /// Leave out completed achievements
        #[arg(long)]
        hide_completed: bool,
    },

    /// Add objectives to an achievement
    Inc {
        id: u32,

        /// Number of steps
        #[arg(short = 'n', long, default_value_t = 1)]
        times: u32,

        /// Hold the button for this many milliseconds instead
        #[arg(long)]
        hold_ms: Option<u64>,
    },

    /// Remove objectives from an achievement
    Dec {
        id: u32,

        /// Number of steps
        #[arg(short = 'n', long, default_value_t = 1)]
        times: u32,

        /// Hold the button for this many milliseconds instead
        #[arg(long)]
        hold_ms: Option<u64>,
    },

    /// Mark achievements complete
    Complete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark every achievement of a category complete
    CompleteCategory {
        category: u32,
    },

    /// Reset achievements to not started
    Reset {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Reset every achievement
    ResetAll,

    /// Manage the account API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Show or choose seasonal daily categories
    Dailies {
        #[command(subcommand)]
        command: Option<DailiesCommands>,
    },

    /// Time until the daily reset (UTC midnight)
    Countdown {
        /// Keep updating every second
        #[arg(long)]
        watch: bool,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Store a key and apply the account's completion
    Set { key: String },

    /// Forget the stored key
    Remove {
        /// Also reset all progress
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum DailiesCommands {
    /// Replace the selected seasonal categories
    Select {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Init and countdown don't need a session
    match &cli.command {
        Commands::Init { force } => return cli::init::init_command(cli.config.as_deref(), *force).await,
        Commands::Countdown { watch } => return cli::countdown::countdown_command(*watch).await,
        _ => {}
    }

    let session = cli::Session::load(cli.config.as_deref(), cli.data_dir, cli.offline)?;

    match cli.command {
        Commands::Sync => cli::catalog::sync_command(&session).await?,
        Commands::Refresh => cli::catalog::refresh_command(&session).await?,
        Commands::Tree => cli::catalog::tree_command(&session).await?,
        Commands::Search { query } => cli::catalog::search_command(&session, &query).await?,
        Commands::Show {
            category,
            hide_completed,
        } => cli::catalog::show_command(&session, category, hide_completed).await?,
        Commands::Inc { id, times, hold_ms } => {
            let hold = hold_ms.map(Duration::from_millis);
            cli::progress::step_command(&session, id, Step::Increment, times, hold).await?;
        }
        Commands::Dec { id, times, hold_ms } => {
            let hold = hold_ms.map(Duration::from_millis);
            cli::progress::step_command(&session, id, Step::Decrement, times, hold).await?;
        }
        Commands::Complete { ids } => cli::progress::complete_command(&session, &ids).await?,
        Commands::CompleteCategory { category } => {
            cli::progress::complete_category_command(&session, category).await?;
        }
        Commands::Reset { ids } => cli::progress::reset_command(&session, &ids).await?,
        Commands::ResetAll => cli::progress::reset_all_command(&session).await?,
        Commands::Key { command } => match command {
            KeyCommands::Set { key } => cli::key::set_command(&session, &key).await?,
            KeyCommands::Remove { reset } => cli::key::remove_command(&session, reset).await?,
        },
        Commands::Dailies { command } => match command {
            None => cli::dailies::list_command(&session).await?,
            Some(DailiesCommands::Select { ids }) => cli::dailies::select_command(&session, &ids).await?,
        },
        Commands::Init { .. } | Commands::Countdown { .. } => {}
    }

    Ok(())
}
