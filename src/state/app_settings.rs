use crate::Cli;
use log::LevelFilter;
use std::time::Duration;

pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_RECENT_PLAYS: usize = 20;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// Only games involving the watch list, falling back to every game.
    #[default]
    Watched,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub view: View,
    /// Some = live mode, redrawing on this interval.
    pub refresh: Option<Duration>,
    pub show_plays: bool,
    pub recent_plays: usize,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            view: View::Watched,
            refresh: None,
            show_plays: false,
            recent_plays: DEFAULT_RECENT_PLAYS,
            log_level: LevelFilter::Warn,
        }
    }
}

impl AppSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        let refresh = cli.live.as_deref().map(|raw| {
            let secs = parse_refresh_secs(raw).unwrap_or_else(|| {
                eprintln!("Invalid refresh interval '{raw}'. Using default ({DEFAULT_REFRESH_SECS} seconds)");
                DEFAULT_REFRESH_SECS
            });
            Duration::from_secs(secs)
        });

        Self {
            view: if cli.all { View::All } else { View::Watched },
            refresh,
            show_plays: cli.p2p,
            recent_plays: usize::from(cli.plays),
            log_level: if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn },
        }
    }
}

/// Whole, positive seconds only.
pub fn parse_refresh_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|&secs| secs > 0)
}
