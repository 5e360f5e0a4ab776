pub mod client;
pub mod nba;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the CDN wire format
// ---------------------------------------------------------------------------

/// Today's games as returned by the scoreboard endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub game_date: Option<String>,
    /// None = the payload had no scoreboard/games section at all.
    pub games: Option<Vec<Game>>,
}

impl Scoreboard {
    /// All games, empty when the games section is missing.
    pub fn games(&self) -> &[Game] {
        self.games.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    /// Upstream game id, e.g. "0022500123". Missing on malformed payloads.
    pub id: Option<String>,
    pub home: Team,
    pub away: Team,
    pub status: GameStatus,
    pub status_text: String, // "Q3 4:03", "Final", "7:30 pm ET"
    pub period: u8,
    pub clock: Option<String>, // ISO duration, "PT04M03.00S"
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub city: String,    // "Golden State"
    pub name: String,    // "Warriors"
    pub tricode: String, // "GSW"
    pub score: Option<u32>,
}

impl Team {
    /// City and name joined by a space, skipping whichever is missing.
    pub fn display_name(&self) -> String {
        [self.city.as_str(), self.name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Final,
}

impl GameStatus {
    /// Map the CDN's numeric `gameStatus` (1 = scheduled, 2 = live, 3 = final).
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => GameStatus::Live,
            3 => GameStatus::Final,
            _ => GameStatus::Scheduled,
        }
    }
}

/// One play-by-play action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Play {
    pub clock: Option<String>,
    pub description: String,
    pub away_score: Option<String>,
    pub home_score: Option<String>,
}
