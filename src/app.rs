use crate::draw;
use crate::state::app_settings::{AppSettings, View};
use crate::state::network::ScoreSource;
use crate::state::refresher::Clock;
use crate::state::tracked::{self, WatchEntry};
use crate::ui::screen::Screen;
use log::{debug, error, info};
use nba_live_api::client::ApiError;
use nba_live_api::{Game, Play, Scoreboard};
use std::fmt::Write;
use std::future::Future;
use std::process::ExitCode;
use std::time::Duration;

const FAREWELL: &str = "\n\n👋 Stopped live tracking. Goodbye!\n";
const FAREWELL_ALL: &str = "\n\n Stopped live tracking. Goodbye!\n";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Live mode stopped by the operator.
    Interrupted,
    FetchFailed,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunOutcome::Completed | RunOutcome::Interrupted => ExitCode::SUCCESS,
            RunOutcome::FetchFailed => ExitCode::FAILURE,
        }
    }
}

pub struct App<S, D, C> {
    pub settings: AppSettings,
    watch_list: Vec<WatchEntry>,
    source: S,
    screen: D,
    clock: C,
}

impl<S, D, C> App<S, D, C>
where
    S: ScoreSource,
    D: Screen,
    C: Clock,
{
    pub fn new(settings: AppSettings, source: S, screen: D, clock: C) -> Self {
        Self {
            settings,
            watch_list: tracked::default_watch_list(),
            source,
            screen,
            clock,
        }
    }

    /// Run once or keep refreshing until `shutdown` resolves, depending on settings.
    pub async fn run<F>(&mut self, shutdown: F) -> anyhow::Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        match self.settings.refresh {
            None => self.run_once().await,
            Some(every) => self.run_live(every, shutdown).await,
        }
    }

    // -----------------------------------------------------------------------
    // One-shot
    // -----------------------------------------------------------------------

    async fn run_once(&mut self) -> anyhow::Result<RunOutcome> {
        let title = match self.settings.view {
            View::Watched => "Live Game Tracker",
            View::All => "Live Game Tracker - All Games",
        };
        self.screen
            .present(&format!("{title}\nFetching live game data...\n\n"))?;

        let scoreboard = match self.source.scoreboard().await {
            Ok(scoreboard) => scoreboard,
            Err(e) => {
                error!("scoreboard fetch failed: {e}");
                self.screen.present(&fetch_failure_text(&e))?;
                return Ok(RunOutcome::FetchFailed);
            }
        };

        let body = match self.settings.view {
            View::All => self.all_games_text(&scoreboard),
            View::Watched => {
                let games = match self.tracked_games_text(&scoreboard).await {
                    Some(text) => text,
                    None => format!(
                        "No tracked team games found today.\nShowing all games instead:\n\n{}",
                        self.all_games_text(&scoreboard)
                    ),
                };
                games + &usage_hints()
            }
        };
        self.screen.present(&body)?;
        Ok(RunOutcome::Completed)
    }

    // -----------------------------------------------------------------------
    // Live loop
    // -----------------------------------------------------------------------

    async fn run_live<F>(&mut self, every: Duration, shutdown: F) -> anyhow::Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        let intro = self.live_intro(every);
        self.screen.present(&intro)?;
        tokio::pin!(shutdown);

        loop {
            let fetched = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                result = self.source.scoreboard() => Some(result),
            };
            let Some(result) = fetched else {
                return self.stop_live();
            };

            let scoreboard = match result {
                Ok(scoreboard) => scoreboard,
                Err(e) => {
                    error!("live refresh failed: {e}");
                    self.screen.present(&format!("\n❌ Error: {e}\n"))?;
                    return Ok(RunOutcome::FetchFailed);
                }
            };

            let frame = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                frame = self.live_frame(&scoreboard, every) => Some(frame),
            };
            let Some(frame) = frame else {
                return self.stop_live();
            };

            self.screen.clear()?;
            self.screen.present(&frame)?;
            debug!("next refresh in {}s", every.as_secs());

            let interrupted = tokio::select! {
                biased;
                _ = &mut shutdown => true,
                _ = self.clock.sleep(every) => false,
            };
            if interrupted {
                return self.stop_live();
            }
        }
    }

    fn stop_live(&mut self) -> anyhow::Result<RunOutcome> {
        info!("live tracking interrupted");
        let farewell = match self.settings.view {
            View::Watched => FAREWELL,
            View::All => FAREWELL_ALL,
        };
        self.screen.present(farewell)?;
        Ok(RunOutcome::Interrupted)
    }

    fn live_intro(&self, every: Duration) -> String {
        let mut out = String::new();
        match self.settings.view {
            View::Watched => {
                let focus = tracked::focus_description(&self.watch_list);
                let _ = writeln!(out, " Live Game Tracker (Live Mode - {focus} Focus)");
                if self.settings.show_plays {
                    let _ = writeln!(out, " Play-by-Play mode enabled");
                }
            }
            View::All => {
                let _ = writeln!(out, " Live Game Tracker (Live Mode - All Games)");
            }
        }
        let _ = writeln!(out, "Refreshing every {} seconds...", every.as_secs());
        let _ = writeln!(out, "Press Ctrl+C to stop\n");
        out
    }

    async fn live_frame(&self, scoreboard: &Scoreboard, every: Duration) -> String {
        let updated = self.clock.now().format("%I:%M:%S %p");
        let next = format!(" Next update in {} seconds... (Ctrl+C to stop)\n", every.as_secs());

        match self.settings.view {
            View::All => format!(
                "--------------------------------\n Games (Updated: {updated})\n\n{}{next}",
                self.all_games_text(scoreboard)
            ),
            View::Watched => {
                let games = match self.tracked_games_text(scoreboard).await {
                    Some(text) => format!(" Game Update (Updated: {updated})\n\n{text}"),
                    None => format!(
                        " All Games (Updated: {updated})\n\n{}",
                        self.all_games_text(scoreboard)
                    ),
                };
                format!("{games}\n{next}")
            }
        }
    }

    // -----------------------------------------------------------------------
    // Shared cycle body
    // -----------------------------------------------------------------------

    /// `None` when no watched team plays today.
    async fn tracked_games_text(&self, scoreboard: &Scoreboard) -> Option<String> {
        let tracked = tracked::build_tracked_set(scoreboard, &self.watch_list);
        if tracked.is_empty() {
            debug!("no watched teams on today's scoreboard");
            return None;
        }
        debug!("tracking {} games", tracked.len());

        let mut out = String::new();
        for entry in tracked.iter() {
            let _ = writeln!(out, "{} Game Found!\n", entry.label);
            out.push_str(&draw::render_game_state(entry.game));

            if self.settings.show_plays
                && entry.follow_plays
                && let Some(plays) = self.recent_plays(entry.game).await
            {
                out.push_str(&draw::render_recent_plays(entry.game, &plays));
            }
            out.push('\n');
        }
        Some(out)
    }

    async fn recent_plays(&self, game: &Game) -> Option<Vec<Play>> {
        let game_id = game.id.as_deref()?;
        self.source
            .recent_plays(game_id, self.settings.recent_plays)
            .await
    }

    fn all_games_text(&self, scoreboard: &Scoreboard) -> String {
        draw::render_all_games(scoreboard, self.clock.now().date_naive()).into_text()
    }
}

fn fetch_failure_text(err: &ApiError) -> String {
    format!(
        "❌ Error fetching game data: {err}

Troubleshooting tips:
1. Make sure you have internet connection
2. Check if NBA.com APIs are accessible
3. Re-run with --verbose to see request details
"
    )
}

fn usage_hints() -> String {
    let bin = env!("CARGO_PKG_NAME");
    format!(
        "
💡 Tip: Run with '--live' flag for continuous updates:
   {bin} --live
   {bin} --live 15  (refresh every 15 seconds)

💡 To see all games instead of just the watched teams:
   {bin} --all
   {bin} --all --live

💡 To show play-by-play for Warriors games:
   {bin} --p2p
   {bin} --p2p --live
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::DEFAULT_RECENT_PLAYS;
    use chrono::{DateTime, Local, TimeZone};
    use nba_live_api::client::ApiResult;
    use nba_live_api::{GameStatus, Team};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::{pending, ready};
    use std::io;
    use tokio::sync::oneshot;

    // -----------------------------------------------------------------------
    // Fakes
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct FakeSource {
        boards: RefCell<VecDeque<ApiResult<Scoreboard>>>,
        plays: Option<Vec<Play>>,
        play_requests: RefCell<Vec<(String, usize)>>,
        /// Fired by the first play-by-play request, which then never completes.
        halt: RefCell<Option<oneshot::Sender<()>>>,
    }

    impl FakeSource {
        fn with_boards(boards: Vec<ApiResult<Scoreboard>>) -> Self {
            Self { boards: RefCell::new(boards.into()), ..Default::default() }
        }
    }

    impl ScoreSource for FakeSource {
        fn scoreboard(&self) -> impl Future<Output = ApiResult<Scoreboard>> {
            async {
                self.boards
                    .borrow_mut()
                    .pop_front()
                    .unwrap_or_else(|| Err(ApiError::Other("feed closed".into())))
            }
        }

        fn recent_plays(&self, game_id: &str, limit: usize) -> impl Future<Output = Option<Vec<Play>>> {
            self.play_requests.borrow_mut().push((game_id.to_owned(), limit));
            let halt = self.halt.borrow_mut().take();
            let plays = self.plays.clone();
            async move {
                if let Some(tx) = halt {
                    let _ = tx.send(());
                    pending::<()>().await;
                }
                plays
            }
        }
    }

    #[derive(Default)]
    struct RecordingScreen {
        frames: Vec<String>,
        clears: usize,
    }

    impl Screen for RecordingScreen {
        fn clear(&mut self) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn present(&mut self, frame: &str) -> io::Result<()> {
            self.frames.push(frame.to_owned());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FixedClock {
        sleeps: Cell<usize>,
        /// Fired by the first sleep, which then never wakes.
        halt: RefCell<Option<oneshot::Sender<()>>>,
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            Local.with_ymd_and_hms(2026, 10, 14, 19, 5, 9).unwrap()
        }

        fn sleep(&self, _period: Duration) -> impl Future<Output = ()> {
            self.sleeps.set(self.sleeps.get() + 1);
            let halt = self.halt.borrow_mut().take();
            async move {
                if let Some(tx) = halt {
                    let _ = tx.send(());
                    pending::<()>().await;
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Fixtures
    // -----------------------------------------------------------------------

    fn team(city: &str, name: &str, tricode: &str, score: u32) -> Team {
        Team { city: city.into(), name: name.into(), tricode: tricode.into(), score: Some(score) }
    }

    fn live_game(id: &str, home: Team, away: Team) -> Game {
        Game {
            id: Some(id.into()),
            home,
            away,
            status: GameStatus::Live,
            status_text: "Q3 4:03".into(),
            period: 3,
            clock: Some("PT04M03.00S".into()),
        }
    }

    fn warriors_spurs_board() -> Scoreboard {
        Scoreboard {
            game_date: Some("2026-10-14".into()),
            games: Some(vec![live_game(
                "0022600001",
                team("Golden State", "Warriors", "GSW", 50),
                team("San Antonio", "Spurs", "SAS", 48),
            )]),
        }
    }

    fn unwatched_board() -> Scoreboard {
        Scoreboard {
            game_date: None,
            games: Some(vec![live_game(
                "7",
                team("Boston", "Celtics", "BOS", 88),
                team("New York", "Knicks", "NYK", 90),
            )]),
        }
    }

    fn settings(view: View, refresh: Option<u64>, show_plays: bool) -> AppSettings {
        AppSettings {
            view,
            refresh: refresh.map(Duration::from_secs),
            show_plays,
            ..Default::default()
        }
    }

    /// A shutdown future wired to a sender the fakes can fire mid-cycle.
    fn ctrl_c() -> (oneshot::Sender<()>, impl Future<Output = ()>) {
        let (tx, rx) = oneshot::channel();
        (tx, async {
            let _ = rx.await;
        })
    }

    fn app(settings: AppSettings, source: FakeSource) -> App<FakeSource, RecordingScreen, FixedClock> {
        App::new(settings, source, RecordingScreen::default(), FixedClock::default())
    }

    // -----------------------------------------------------------------------
    // One-shot
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn one_shot_shows_shared_game_once_then_hints() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board())]);
        let mut app = app(settings(View::Watched, None, false), source);

        let outcome = app.run(pending()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let frames = &app.screen.frames;
        assert_eq!(frames[0], "Live Game Tracker\nFetching live game data...\n\n");
        let body = &frames[1];
        assert_eq!(body.matches("Game Found!").count(), 1);
        assert!(body.starts_with("Warriors & Spurs Game Found!\n\n"));
        assert!(body.contains("Quarter: 3 | Time: PT04M03.00S"));
        assert!(body.contains("courtwatch --live 15"));
        assert!(!body.contains("RECENT PLAYS"));
        assert!(app.source.play_requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn play_by_play_only_for_followed_games() {
        let board = Scoreboard {
            game_date: None,
            games: Some(vec![
                live_game("1", team("Golden State", "Warriors", "GSW", 10), team("Los Angeles", "Lakers", "LAL", 12)),
                live_game("2", team("Oklahoma City", "Thunder", "OKC", 30), team("Boston", "Celtics", "BOS", 28)),
            ]),
        };
        let source = FakeSource {
            plays: Some(vec![Play {
                clock: Some("PT04M03.00S".into()),
                description: "Curry 26' 3PT".into(),
                away_score: Some("12".into()),
                home_score: Some("10".into()),
            }]),
            ..FakeSource::with_boards(vec![Ok(board)])
        };
        let mut app = app(settings(View::Watched, None, true), source);

        app.run(pending()).await.unwrap();

        assert_eq!(*app.source.play_requests.borrow(), [("1".to_owned(), DEFAULT_RECENT_PLAYS)]);
        let body = &app.screen.frames[1];
        assert_eq!(body.matches("RECENT PLAYS").count(), 1);
        assert!(body.contains("4:03"));
        let warriors = body.find("Warriors Game Found!").unwrap();
        let thunder = body.find("Thunder Game Found!").unwrap();
        assert!(warriors < body.find("RECENT PLAYS").unwrap());
        assert!(body.find("RECENT PLAYS").unwrap() < thunder);
    }

    #[tokio::test]
    async fn missing_play_by_play_is_skipped_silently() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board())]);
        let mut app = app(settings(View::Watched, None, true), source);

        let outcome = app.run(pending()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(app.source.play_requests.borrow().len(), 1);
        assert!(!app.screen.frames[1].contains("RECENT PLAYS"));
    }

    #[tokio::test]
    async fn one_shot_falls_back_to_all_games() {
        let source = FakeSource::with_boards(vec![Ok(unwatched_board())]);
        let mut app = app(settings(View::Watched, None, false), source);

        app.run(pending()).await.unwrap();

        let body = &app.screen.frames[1];
        assert!(body.starts_with("No tracked team games found today.\nShowing all games instead:\n\n"));
        assert!(body.contains("Games - October 14, 2026"));
        assert!(body.contains("New York Knicks"));
    }

    #[tokio::test]
    async fn one_shot_all_reports_empty_day() {
        let empty = Scoreboard { game_date: None, games: Some(vec![]) };
        let source = FakeSource::with_boards(vec![Ok(empty)]);
        let mut app = app(settings(View::All, None, false), source);

        app.run(pending()).await.unwrap();

        assert_eq!(app.screen.frames[0], "Live Game Tracker - All Games\nFetching live game data...\n\n");
        assert_eq!(app.screen.frames[1], "No games scheduled for today.\n");
    }

    #[tokio::test]
    async fn one_shot_fetch_failure_prints_tips() {
        let source = FakeSource::with_boards(vec![Err(ApiError::Other("offline".into()))]);
        let mut app = app(settings(View::Watched, None, false), source);

        let outcome = app.run(pending()).await.unwrap();
        assert_eq!(outcome, RunOutcome::FetchFailed);

        let text = app.screen.frames.last().unwrap();
        assert!(text.starts_with("❌ Error fetching game data: Error: offline"));
        assert!(text.contains("Troubleshooting tips:"));
        assert!(!text.contains("💡 Tip"));
    }

    // -----------------------------------------------------------------------
    // Live loop
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn live_loop_redraws_until_fetch_fails() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board()), Ok(unwatched_board())]);
        let mut app = app(settings(View::Watched, Some(15), false), source);

        let outcome = app.run(pending()).await.unwrap();
        assert_eq!(outcome, RunOutcome::FetchFailed);
        assert_eq!(app.screen.clears, 2);
        assert_eq!(app.clock.sleeps.get(), 2);

        let frames = &app.screen.frames;
        assert_eq!(frames.len(), 4);
        assert!(frames[0].starts_with(" Live Game Tracker (Live Mode - Warriors, Spurs, Rockets & Thunder Focus)\n"));
        assert!(frames[0].contains("Refreshing every 15 seconds..."));
        assert!(frames[1].starts_with(" Game Update (Updated: 07:05:09 PM)\n\nWarriors & Spurs Game Found!"));
        assert!(frames[1].ends_with("\n Next update in 15 seconds... (Ctrl+C to stop)\n"));
        assert!(frames[2].starts_with(" All Games (Updated: 07:05:09 PM)\n\n"));
        assert_eq!(frames[3], "\n❌ Error: Error: feed closed\n");
    }

    #[tokio::test]
    async fn live_all_games_lists_every_cycle() {
        let source = FakeSource::with_boards(vec![Ok(Scoreboard::default())]);
        let mut app = app(settings(View::All, Some(30), true), source);

        let outcome = app.run(pending()).await.unwrap();
        assert_eq!(outcome, RunOutcome::FetchFailed);

        let frames = &app.screen.frames;
        assert_eq!(frames[0], " Live Game Tracker (Live Mode - All Games)\nRefreshing every 30 seconds...\nPress Ctrl+C to stop\n\n");
        assert_eq!(
            frames[1],
            "--------------------------------\n Games (Updated: 07:05:09 PM)\n\nNo games found for today.\n Next update in 30 seconds... (Ctrl+C to stop)\n"
        );
    }

    #[tokio::test]
    async fn interrupt_stops_cleanly_with_farewell() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board())]);
        let mut app = app(settings(View::Watched, Some(30), true), source);

        let outcome = app.run(ready(())).await.unwrap();
        assert_eq!(outcome, RunOutcome::Interrupted);
        assert_eq!(app.screen.clears, 0);
        assert!(app.screen.frames[0].contains(" Play-by-Play mode enabled\n"));
        assert_eq!(app.screen.frames.last().unwrap(), FAREWELL);
        assert_eq!(app.source.boards.borrow().len(), 1, "no fetch after interrupt");
    }

    #[tokio::test]
    async fn interrupt_while_sleeping_keeps_last_frame_whole() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board()), Ok(warriors_spurs_board())]);
        let mut app = app(settings(View::Watched, Some(30), false), source);
        let (tx, shutdown) = ctrl_c();
        *app.clock.halt.borrow_mut() = Some(tx);

        let outcome = app.run(shutdown).await.unwrap();
        assert_eq!(outcome, RunOutcome::Interrupted);
        assert_eq!(app.screen.clears, 1);
        assert_eq!(app.clock.sleeps.get(), 1);

        let frames = &app.screen.frames;
        assert_eq!(frames.len(), 3);
        assert!(frames[1].starts_with(" Game Update (Updated: 07:05:09 PM)\n\nWarriors & Spurs Game Found!"));
        assert!(frames[1].ends_with(" Next update in 30 seconds... (Ctrl+C to stop)\n"));
        assert_eq!(frames[2], FAREWELL);
        assert_eq!(app.source.boards.borrow().len(), 1, "no second fetch");
    }

    #[tokio::test]
    async fn interrupt_during_play_by_play_drops_unfinished_frame() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board())]);
        let (tx, shutdown) = ctrl_c();
        *source.halt.borrow_mut() = Some(tx);
        let mut app = app(settings(View::Watched, Some(30), true), source);

        let outcome = app.run(shutdown).await.unwrap();
        assert_eq!(outcome, RunOutcome::Interrupted);
        assert_eq!(app.source.play_requests.borrow().len(), 1);
        assert_eq!(app.screen.clears, 0);
        assert_eq!(app.clock.sleeps.get(), 0);

        let frames = &app.screen.frames;
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with(" Live Game Tracker (Live Mode"));
        assert_eq!(frames[1], FAREWELL);
    }

    #[tokio::test]
    async fn interrupting_all_games_uses_plain_farewell() {
        let source = FakeSource::with_boards(vec![Ok(warriors_spurs_board())]);
        let mut app = app(settings(View::All, Some(30), false), source);
        let (tx, shutdown) = ctrl_c();
        *app.clock.halt.borrow_mut() = Some(tx);

        let outcome = app.run(shutdown).await.unwrap();
        assert_eq!(outcome, RunOutcome::Interrupted);
        assert_eq!(app.screen.clears, 1);
        assert_eq!(app.screen.frames.last().unwrap(), FAREWELL_ALL);
    }

    #[test]
    fn only_fetch_failures_exit_nonzero() {
        assert_eq!(format!("{:?}", RunOutcome::Completed.exit_code()), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(format!("{:?}", RunOutcome::Interrupted.exit_code()), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(format!("{:?}", RunOutcome::FetchFailed.exit_code()), format!("{:?}", ExitCode::FAILURE));
    }
}
