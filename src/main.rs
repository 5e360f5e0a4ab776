mod app;
mod draw;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::refresher::SystemClock;
use crate::ui::screen::TerminalScreen;
use clap::Parser;
use log::{LevelFilter, error};
use nba_live_api::client::NbaApi;
use std::process::ExitCode;

/// Follow today's NBA games from the terminal.
///
/// With no flags, shows the Warriors, Spurs, Rockets and Thunder games once.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show every game today instead of the watched teams
    #[arg(long)]
    pub all: bool,

    /// Show recent play-by-play for the Warriors game
    #[arg(long)]
    pub p2p: bool,

    /// Keep refreshing every SECONDS (default 30) until Ctrl+C
    #[arg(long, value_name = "SECONDS", num_args = 0..=1, default_missing_value = "30")]
    pub live: Option<String>,

    /// Number of recent plays shown with --p2p
    #[arg(long, value_name = "N", default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub plays: u16,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = AppSettings::from_cli(&cli);

    better_panic::install();
    setup_logger(settings.log_level);

    let mut app = App::new(settings, NbaApi::new(), TerminalScreen::new(), SystemClock);
    let outcome = app.run(shutdown_signal()).await?;
    Ok(outcome.exit_code())
}

fn setup_logger(level: LevelFilter) {
    // Dependencies stay at warn; only our own crates follow --verbose.
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .filter_module("nba_live_api", level)
        .format_timestamp(None)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("unable to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
