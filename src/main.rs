// gh-focus entry point.
// Loads preferences, builds the context, and runs the requested command.

use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gh_focus::config::{Cli, Command, Settings};
use gh_focus::github::GitHubClient;
use gh_focus::poller::check_notifications;
use gh_focus::preferences::{FilePreferenceStore, PreferenceStore, Preferences};
use gh_focus::state::PollState;
use gh_focus::surface::{BrowserOpener, TerminalSurface, spawn_input_reader};
use gh_focus::{App, FocusContext, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Log level comes from RUST_LOG, e.g. RUST_LOG=gh_focus=debug
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gh_focus=info"));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from(&cli.watch);
    let store = FilePreferenceStore::default_location()?;

    if let Some(Command::SetToken { token }) = &cli.command {
        let preferences = Preferences::with_token(token);
        if preferences.token().is_none() {
            warn!("Saving an empty token; gh-focus will stay unconfigured");
        }
        store.set(&preferences).await?;
        println!("Preferences saved");
        return Ok(());
    }

    let token = match settings.token.clone() {
        Some(token) => Some(token),
        None => store.get().await?.token().map(str::to_string),
    };

    let surface = Arc::new(TerminalSurface::new());
    let poll_state = Arc::new(PollState::new(settings.poll_interval, token));
    let client = GitHubClient::new(&settings.api_base, Arc::clone(&poll_state), surface.clone())?;
    let ctx = Arc::new(FocusContext::new(
        Arc::new(client),
        surface,
        Arc::new(BrowserOpener::new()),
        poll_state,
        settings.filter.clone(),
        settings.query,
    ));

    match cli.command {
        Some(Command::Check) => {
            if let Some(summary) = check_notifications(ctx).await {
                println!(
                    "{} shown, {} skipped, {} failed ({} fetched)",
                    summary.shown, summary.suppressed, summary.failed, summary.fetched
                );
            }
        }
        _ => {
            info!("Type a notification id to open it, enter to refresh, q to quit");
            let (tx, rx) = mpsc::unbounded_channel();
            spawn_input_reader(tx);
            App::new(ctx).run(rx).await;
        }
    }

    Ok(())
}
