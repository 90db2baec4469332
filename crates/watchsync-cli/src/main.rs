use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, daemon, logs, sync};
use std::net::SocketAddr;
use std::path::PathBuf;
use watchsync_config::PathManager;

mod api;
mod app;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchsync")]
#[command(about = "WatchSync - Keep your Plex watchlist in step with an IMDb list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduler and the HTTP control surface
    #[command(long_about = "Run WatchSync as a long-lived service. A sync pass runs on the cron schedule and on demand through POST /api/sync. An initial pass runs on startup unless --no-startup-sync is given.")]
    Daemon {
        /// Address for the HTTP control surface
        #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,

        /// Cron schedule with seconds field (e.g. '0 0 */6 * * *' for every 6 hours)
        #[arg(long, value_name = "SCHEDULE", default_value = "0 0 */6 * * *")]
        schedule: String,

        /// Skip initial sync on startup
        #[arg(long, action = ArgAction::SetTrue)]
        no_startup_sync: bool,

        /// Delay between consecutive items of a pass, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 500)]
        item_delay_ms: u64,

        /// Write diagnostics to a daily-rotated file instead of stderr.
        /// Without a value, uses logs/watchsync.log under the config directory.
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        log_file: Option<Option<PathBuf>>,
    },
    /// Run one sync pass in the foreground
    Sync {
        /// Delay between consecutive items of a pass, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 500)]
        item_delay_ms: u64,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Show recent operation log entries, newest first
    Logs {
        /// Maximum number of entries to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Empty the operation log
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Update settings. Fields not given keep their current value.
    Set {
        /// Public IMDb list URL
        #[arg(long)]
        list_url: Option<String>,

        /// Plex account token
        #[arg(long)]
        plex_token: Option<String>,

        /// TMDB API key
        #[arg(long)]
        tmdb_api_key: Option<String>,

        /// Two-letter region code for streaming availability
        #[arg(long)]
        region: Option<String>,

        /// Comma-separated TMDB provider ids that count as "already available"
        #[arg(long, value_delimiter = ',')]
        providers: Option<Vec<u32>>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Daemon { log_file: Some(path), .. } => Some(
            path.clone()
                .unwrap_or_else(|| PathManager::default().daemon_log_file()),
        ),
        _ => None,
    };
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Daemon {
            bind,
            schedule,
            no_startup_sync,
            item_delay_ms,
            log_file: _,
        } => daemon::run_daemon(bind, schedule, no_startup_sync, item_delay_ms, &output).await,
        Commands::Sync { item_delay_ms } => sync::run_sync(item_delay_ms, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
        Commands::Logs { limit } => logs::run_logs(limit, &output),
        Commands::Clear => clear::run_clear(&output),
    }
}
