use crate::nba::{NbaAction, NbaGame, NbaTeam, PlayByPlayResponse, ScoreboardResponse};
use crate::{Game, GameStatus, Play, Scoreboard, Team};
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const NBA_LIVE_DATA: &str = "https://cdn.nba.com/static/json/liveData";

/// NBA live-data client backed by the public CDN endpoints.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self::with_base_url(NBA_LIVE_DATA)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error for {1}: {0}")]
    Network(#[source] reqwest::Error, String),
    #[error("API error for {1}: {0}")]
    Api(#[source] reqwest::Error, String),
    #[error("Parse error for {1}: {0}")]
    Parsing(#[source] reqwest::Error, String),
    #[error("Error: {0}")]
    Other(String),
}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host serving the same paths.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // The CDN rejects requests that don't look like they came from nba.com.
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));

        Self {
            client: Client::builder()
                .user_agent("courtwatch/0.1 (terminal score tracker)")
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch today's scoreboard. Any non-success status is an error.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Scoreboard> {
        let url = format!("{}/scoreboard/todaysScoreboard_00.json", self.base_url);
        let raw: ScoreboardResponse = self.get_strict(&url).await?;
        Ok(map_scoreboard(raw))
    }

    /// Fetch every play-by-play action recorded so far for a game, oldest first.
    pub async fn fetch_play_by_play(&self, game_id: &str) -> ApiResult<Vec<Play>> {
        let url = format!("{}/playbyplay/playbyplay_{game_id}.json", self.base_url);
        let raw: PlayByPlayResponse = self.get(&url).await?;
        Ok(map_play_by_play(raw))
    }

    /// The last `limit` plays of a game, oldest of the window first.
    ///
    /// Play-by-play is routinely missing (game not started, feed not published
    /// yet), so any failure is reported as `None` rather than an error.
    pub async fn fetch_recent_plays(&self, game_id: &str, limit: usize) -> Option<Vec<Play>> {
        match self.fetch_play_by_play(game_id).await {
            Ok(plays) => {
                let window = recent_window(plays, limit);
                if window.is_empty() {
                    debug!("no play-by-play yet for game {game_id}");
                    None
                } else {
                    Some(window)
                }
            }
            Err(e) => {
                debug!("play-by-play unavailable for game {game_id}: {e}");
                None
            }
        }
    }

    /// Like `get_strict`, but a 4xx reads as an empty payload.
    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        match self.get_strict(url).await {
            Err(ApiError::Api(e, _)) if e.status().is_some_and(|s| s.is_client_error()) => {
                debug!("{url} answered {e}, treating as empty");
                Ok(T::default())
            }
            other => other,
        }
    }

    async fn get_strict<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: CDN wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_scoreboard(raw: ScoreboardResponse) -> Scoreboard {
    let Some(board) = raw.scoreboard else {
        return Scoreboard::default();
    };
    Scoreboard {
        game_date: board.game_date,
        games: board
            .games
            .map(|games| games.into_iter().map(map_game).collect()),
    }
}

fn map_game(g: NbaGame) -> Game {
    Game {
        id: g.game_id.filter(|id| !id.is_empty()),
        home: g.home_team.map(map_team).unwrap_or_default(),
        away: g.away_team.map(map_team).unwrap_or_default(),
        status: g.game_status.map(GameStatus::from_code).unwrap_or_default(),
        status_text: g.game_status_text.unwrap_or_default(),
        period: g.period.unwrap_or_default(),
        clock: g.game_clock,
    }
}

fn map_team(t: NbaTeam) -> Team {
    Team {
        city: t.team_city.unwrap_or_default(),
        name: t.team_name.unwrap_or_default(),
        tricode: t.team_tricode.unwrap_or_default(),
        score: t.score,
    }
}

fn map_play_by_play(raw: PlayByPlayResponse) -> Vec<Play> {
    raw.game
        .and_then(|g| g.actions)
        .unwrap_or_default()
        .into_iter()
        .map(map_action)
        .collect()
}

fn map_action(a: NbaAction) -> Play {
    Play {
        clock: a.clock.filter(|c| !c.is_empty()),
        description: a.description.unwrap_or_default(),
        away_score: score_text(a.score_away),
        home_score: score_text(a.score_home),
    }
}

fn score_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn recent_window(mut plays: Vec<Play>, limit: usize) -> Vec<Play> {
    let start = plays.len().saturating_sub(limit);
    plays.split_off(start)
}
