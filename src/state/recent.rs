use std::collections::VecDeque;

use crate::dto::game::GameResult;

/// Maximum number of entries held by the recent-activity cache.
pub const RECENT_GAMES_CAPACITY: usize = 5;

/// Fixed-capacity cache of the most recent game results, newest first.
///
/// Order is strictly insertion order, not `created_at` order, which keeps
/// insertion O(1) with no sorting round-trip. When full, the oldest entry is
/// evicted before the new one is prepended.
#[derive(Debug, Clone, Default)]
pub struct RecentGames {
    entries: VecDeque<GameResult>,
}

impl RecentGames {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries, never above [`RECENT_GAMES_CAPACITY`].
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend a freshly finished game, evicting the oldest entry when full.
    pub fn push(&mut self, game: GameResult) {
        if self.entries.len() == RECENT_GAMES_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(game);
    }

    /// Replace the whole cache with a newest-first list from the authority,
    /// truncated to capacity.
    pub fn refill(&mut self, games: Vec<GameResult>) {
        self.entries = games.into_iter().take(RECENT_GAMES_CAPACITY).collect();
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot the entries, newest first.
    pub fn to_vec(&self) -> Vec<GameResult> {
        self.entries.iter().cloned().collect()
    }
}
