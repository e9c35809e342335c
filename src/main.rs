use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use hamsalert::config::Config;
use hamsalert::hamsat::client::{fetch_or_log, HamsatClient};
use hamsalert::hamsat::models::Alert;
use hamsalert::notify::desktop::{ConsoleNotifier, DesktopNotifier, NotificationSink};
use hamsalert::output::{terminal, widget};
use hamsalert::pipeline::run::reconcile;
use hamsalert::state::store::FileSeenStore;

/// hamsalert: notifications for new hams.at satellite alerts.
///
/// Meant to be run on a schedule (cron, launchd, systemd timer). Each run
/// notifies only about alerts it hasn't seen before.
#[derive(Parser)]
#[command(name = "hamsalert", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch upcoming alerts and notify about new ones
    Check {
        /// Forget previously seen alerts for this run
        #[arg(long)]
        reset: bool,

        /// Print the notification instead of sending it to the desktop
        #[arg(long)]
        no_desktop: bool,
    },

    /// Run a check, then show the compact widget summary
    Widget {
        /// Forget previously seen alerts for this run
        #[arg(long)]
        reset: bool,

        /// Print the notification instead of sending it to the desktop
        #[arg(long)]
        no_desktop: bool,
    },

    /// Show the seen-alerts file and what it's tracking
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hamsalert=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { reset, no_desktop } => {
            let config = Config::load()?;
            check(&config, reset, no_desktop).await?;
        }

        Commands::Widget { reset, no_desktop } => {
            let config = Config::load()?;
            let alerts = check(&config, reset, no_desktop).await?;
            widget::display(&widget::render(alerts.as_deref()));
        }

        Commands::Status => {
            let config = Config::load()?;
            let store = FileSeenStore::new(&config.state_path, config.reset_mode);
            terminal::display_status(store.path(), config.reset_mode, &store.read_persisted());
        }
    }

    Ok(())
}

/// One full check run. Returns the fetch result so the widget can reuse it;
/// `None` means the fetch failed and nothing was changed.
async fn check(config: &Config, reset: bool, no_desktop: bool) -> Result<Option<Vec<Alert>>> {
    config.require_api_key()?;

    let reset_mode = config.reset_mode || reset;
    let client = HamsatClient::new(&config.api_url, &config.api_key, config.timeout)?;
    let store = FileSeenStore::new(&config.state_path, reset_mode);
    let sink: Box<dyn NotificationSink> = if no_desktop {
        Box::new(ConsoleNotifier)
    } else {
        Box::new(DesktopNotifier::new())
    };

    let Some(alerts) = fetch_or_log(&client).await else {
        println!("{}", "Failed to fetch alerts".red());
        return Ok(None);
    };
    info!(count = alerts.len(), "Fetched upcoming alerts");

    let report = reconcile(&alerts, &store, sink.as_ref(), &chrono::Local);
    terminal::display_report(&report);

    Ok(Some(alerts))
}
