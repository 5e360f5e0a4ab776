/// NBA live-data CDN raw wire types — serde shapes for deserializing responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (liveData/scoreboard/todaysScoreboard_00.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub scoreboard: Option<NbaScoreboard>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NbaScoreboard {
    pub game_date: Option<String>,
    pub games: Option<Vec<NbaGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NbaGame {
    pub game_id: Option<String>,
    pub game_status: Option<u8>,
    pub game_status_text: Option<String>,
    pub period: Option<u8>,
    pub game_clock: Option<String>,
    pub home_team: Option<NbaTeam>,
    pub away_team: Option<NbaTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NbaTeam {
    pub team_id: Option<u64>,
    pub team_name: Option<String>,
    pub team_city: Option<String>,
    pub team_tricode: Option<String>,
    pub score: Option<u32>,
}

// ---------------------------------------------------------------------------
// Play-by-play  (liveData/playbyplay/playbyplay_{gameId}.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayByPlayResponse {
    pub game: Option<NbaPlayByPlay>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NbaPlayByPlay {
    pub game_id: Option<String>,
    pub actions: Option<Vec<NbaAction>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NbaAction {
    pub action_number: Option<u64>,
    pub clock: Option<String>,
    pub period: Option<u8>,
    pub description: Option<String>,
    /// The CDN sends running scores as strings ("48"); older feeds used numbers.
    pub score_home: Option<serde_json::Value>,
    pub score_away: Option<serde_json::Value>,
}
