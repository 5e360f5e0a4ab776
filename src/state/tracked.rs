use nba_live_api::{Game, Scoreboard, Team};

// ---------------------------------------------------------------------------
// Watch list
// ---------------------------------------------------------------------------

/// Matches a team by tricode, or by a fragment of its display name.
/// Both comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMatcher {
    pub tricode: &'static str,
    pub name_fragment: &'static str,
}

impl TeamMatcher {
    pub fn matches(&self, team: &Team) -> bool {
        team.tricode == self.tricode || team.display_name().contains(self.name_fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    pub label: &'static str,
    pub matcher: TeamMatcher,
    /// Recent plays are shown for this team's game when play-by-play is on.
    pub follow_plays: bool,
}

impl WatchEntry {
    const fn new(label: &'static str, tricode: &'static str, name_fragment: &'static str) -> Self {
        Self { label, matcher: TeamMatcher { tricode, name_fragment }, follow_plays: false }
    }
}

/// The teams followed by default, in display order.
pub fn default_watch_list() -> Vec<WatchEntry> {
    vec![
        WatchEntry { follow_plays: true, ..WatchEntry::new("Warriors", "GSW", "Warriors") },
        WatchEntry::new("Spurs", "SAS", "Spurs"),
        WatchEntry::new("Rockets", "HOU", "Rockets"),
        WatchEntry::new("Thunder", "OKC", "Thunder"),
    ]
}

/// "Warriors, Spurs, Rockets & Thunder"
pub fn focus_description(watch_list: &[WatchEntry]) -> String {
    match watch_list {
        [] => String::new(),
        [only] => only.label.to_owned(),
        [rest @ .., last] => {
            let rest: Vec<&str> = rest.iter().map(|e| e.label).collect();
            format!("{} & {}", rest.join(", "), last.label)
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// First game in the scoreboard where either team satisfies `predicate`.
pub fn find_watched_game<P>(scoreboard: &Scoreboard, predicate: P) -> Option<&Game>
where
    P: Fn(&Team) -> bool,
{
    scoreboard
        .games()
        .iter()
        .find(|game| predicate(&game.home) || predicate(&game.away))
}

/// Identity of a game within one poll.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameKey {
    Id(String),
    /// Position in the scoreboard, used when the upstream omitted the id.
    /// Only meaningful for the snapshot it was taken from.
    Slot(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedGame<'a> {
    pub key: GameKey,
    /// Every matching watch label joined by " & ", in watch-list order.
    pub label: String,
    pub follow_plays: bool,
    pub game: &'a Game,
}

/// Watched games for a single poll, in the order they were first matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedSet<'a> {
    entries: Vec<TrackedGame<'a>>,
}

impl<'a> TrackedSet<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedGame<'a>> {
        self.entries.iter()
    }

    fn insert(&mut self, key: GameKey, entry: &WatchEntry, game: &'a Game) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            existing.label.push_str(" & ");
            existing.label.push_str(entry.label);
            existing.follow_plays |= entry.follow_plays;
            existing.game = game;
        } else {
            self.entries.push(TrackedGame {
                key,
                label: entry.label.to_owned(),
                follow_plays: entry.follow_plays,
                game,
            });
        }
    }
}

/// Select the games involving any watched team, merging games where two
/// watched teams meet into a single entry.
pub fn build_tracked_set<'a>(scoreboard: &'a Scoreboard, watch_list: &[WatchEntry]) -> TrackedSet<'a> {
    let mut tracked = TrackedSet::default();
    for entry in watch_list {
        let Some(game) = find_watched_game(scoreboard, |team| entry.matcher.matches(team)) else {
            continue;
        };
        tracked.insert(game_key(scoreboard, game), entry, game);
    }
    tracked
}

fn game_key(scoreboard: &Scoreboard, game: &Game) -> GameKey {
    match &game.id {
        Some(id) => GameKey::Id(id.clone()),
        None => GameKey::Slot(
            scoreboard
                .games()
                .iter()
                .position(|g| std::ptr::eq(g, game))
                .unwrap_or_default(),
        ),
    }
}
