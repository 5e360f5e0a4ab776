use chrono::NaiveDate;
use nba_live_api::{Game, Play, Scoreboard};
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

const GAME_WIDTH: usize = 60;
const PLAYS_WIDTH: usize = 100;
const MAX_DESCRIPTION: usize = 68;
const TRUNCATED_DESCRIPTION: usize = 65;

static CLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PT(\d+)M(\d+(?:\.\d+)?)S").expect("clock pattern is valid"));

/// Result of rendering the full scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllGames {
    Listed(String),
    /// The payload had no scoreboard/games section.
    Missing,
    /// The games section was present but empty.
    Empty,
}

impl AllGames {
    pub fn into_text(self) -> String {
        match self {
            AllGames::Listed(text) => text,
            AllGames::Missing => "No games found for today.\n".to_owned(),
            AllGames::Empty => "No games scheduled for today.\n".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// Two-column scoreline block for one game, 60 columns wide.
pub fn render_game_state(game: &Game) -> String {
    let mut out = String::new();
    let away_score = score_text(game.away.score);
    let home_score = score_text(game.home.score);

    let _ = writeln!(out, "{}", "=".repeat(GAME_WIDTH));
    let _ = writeln!(out, "{:30} @ {:30}", game.away.display_name(), game.home.display_name());
    let _ = writeln!(out, "{}", "-".repeat(GAME_WIDTH));
    let _ = writeln!(out, "{:^30} | {:^30}", "AWAY", "HOME");
    let _ = writeln!(out, "{away_score:^30} | {home_score:^30}");
    let _ = writeln!(out, "{}", "-".repeat(GAME_WIDTH));
    let _ = writeln!(out, "Status: {}", game.status_text);

    // Live games also carry the period and the raw game clock.
    if game.is_live() {
        let clock = game.clock.as_deref().unwrap_or("N/A");
        let _ = writeln!(out, "Quarter: {} | Time: {clock}", game.period);
    }

    let _ = writeln!(out, "{}", "=".repeat(GAME_WIDTH));
    out.push('\n');
    out
}

fn score_text(score: Option<u32>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Play-by-play
// ---------------------------------------------------------------------------

/// ESPN-style play table, most recent play first.
pub fn render_recent_plays(game: &Game, plays: &[Play]) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(PLAYS_WIDTH);

    let _ = writeln!(out, "\n{heavy}");
    let _ = writeln!(out, "RECENT PLAYS");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(
        out,
        "{:<8} {:<70} {:>6} {:>6}",
        "TIME", "PLAY", game.away.tricode, game.home.tricode
    );
    let _ = writeln!(out, "{}", "-".repeat(PLAYS_WIDTH));

    for play in plays.iter().rev() {
        let clock = format_clock_time(play.clock.as_deref().unwrap_or_default());
        let description = truncate_description(&play.description);
        let away = play.away_score.as_deref().unwrap_or_default();
        let home = play.home_score.as_deref().unwrap_or_default();
        let _ = writeln!(out, "{clock:<8} {description:<70} {away:>6} {home:>6}");
    }

    let _ = writeln!(out, "{heavy}");
    out.push('\n');
    out
}

/// Convert an ISO-8601 period clock ("PT04M03.00S") to "4:03".
///
/// Empty and "N/A" clocks render as nothing; anything unrecognised is passed
/// through untouched.
pub fn format_clock_time(clock: &str) -> String {
    if clock.is_empty() || clock == "N/A" {
        return String::new();
    }

    let parsed = CLOCK_PATTERN.captures(clock).and_then(|caps| {
        let minutes = caps[1].parse::<u64>().ok()?;
        let seconds = caps[2].parse::<f64>().ok()?;
        Some(format!("{minutes}:{:02}", seconds.trunc() as u64))
    });

    parsed.unwrap_or_else(|| clock.to_owned())
}

/// Cut descriptions longer than 68 characters down to 65 plus "...".
pub fn truncate_description(description: &str) -> Cow<'_, str> {
    if description.chars().count() > MAX_DESCRIPTION {
        let head: String = description.chars().take(TRUNCATED_DESCRIPTION).collect();
        Cow::Owned(head + "...")
    } else {
        Cow::Borrowed(description)
    }
}

// ---------------------------------------------------------------------------
// Whole scoreboard
// ---------------------------------------------------------------------------

pub fn render_all_games(scoreboard: &Scoreboard, today: NaiveDate) -> AllGames {
    let games = match scoreboard.games.as_deref() {
        None => return AllGames::Missing,
        Some([]) => return AllGames::Empty,
        Some(games) => games,
    };

    let mut out = String::new();
    let _ = writeln!(out, "\nGames - {}", today.format("%B %d, %Y"));
    let _ = writeln!(out, "Total games: {}\n", games.len());
    for game in games {
        out.push_str(&render_game_state(game));
    }
    AllGames::Listed(out)
}
