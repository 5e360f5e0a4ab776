use nba_live_api::client::{ApiResult, NbaApi};
use nba_live_api::{Play, Scoreboard};
use std::future::Future;

/// Upstream scores feed used by the run loop.
pub trait ScoreSource {
    fn scoreboard(&self) -> impl Future<Output = ApiResult<Scoreboard>>;

    /// `None` when play-by-play is unavailable for the game.
    fn recent_plays(&self, game_id: &str, limit: usize) -> impl Future<Output = Option<Vec<Play>>>;
}

impl ScoreSource for NbaApi {
    fn scoreboard(&self) -> impl Future<Output = ApiResult<Scoreboard>> {
        self.fetch_scoreboard()
    }

    fn recent_plays(&self, game_id: &str, limit: usize) -> impl Future<Output = Option<Vec<Play>>> {
        self.fetch_recent_plays(game_id, limit)
    }
}
