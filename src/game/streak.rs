//! Daily streak bookkeeping
//!
//! One global record counts consecutive solved puzzles. Each puzzle id
//! contributes at most once, so replaying a completion event (reloading a
//! finished game, say) never double counts.

use crate::storage::{Store, load_record, save_record};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Store key of the streak record
pub const STREAK_KEY: &str = "cascade-streak";

/// Persisted streak
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakRecord {
    pub current_streak: u32,
    pub max_streak: u32,
    /// Id of the last puzzle that changed the streak; empty before the first
    pub last_game_id: String,
}

/// Streak state backed by a store
pub struct StreakTracker<S: Store> {
    record: StreakRecord,
    store: S,
}

impl<S: Store> StreakTracker<S> {
    /// Load the streak from `store`; missing or malformed data starts at zero
    pub fn load(store: S) -> Self {
        let record = load_record(&store, STREAK_KEY).unwrap_or_default();
        Self { record, store }
    }

    #[must_use]
    pub const fn current(&self) -> u32 {
        self.record.current_streak
    }

    #[must_use]
    pub const fn best(&self) -> u32 {
        self.record.max_streak
    }

    #[must_use]
    pub const fn record(&self) -> &StreakRecord {
        &self.record
    }

    /// Whether puzzle `id` already counted
    #[must_use]
    pub fn has_contributed(&self, id: u32) -> bool {
        self.record.last_game_id == id.to_string()
    }

    /// Count a solve of puzzle `id`; false if it already counted
    pub fn record_win(&mut self, id: u32) -> bool {
        if self.has_contributed(id) {
            return false;
        }
        self.record.current_streak += 1;
        self.record.max_streak = self.record.max_streak.max(self.record.current_streak);
        self.commit(id);
        true
    }

    /// Break the streak on puzzle `id`; false if it already counted
    pub fn record_loss(&mut self, id: u32) -> bool {
        if self.has_contributed(id) {
            return false;
        }
        self.record.current_streak = 0;
        self.commit(id);
        true
    }

    /// Apply a completion event
    pub fn record_completion(&mut self, id: u32, given_up: bool) -> bool {
        if given_up {
            self.record_loss(id)
        } else {
            self.record_win(id)
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn commit(&mut self, id: u32) {
        self.record.last_game_id = id.to_string();
        info!(
            puzzle = id,
            current = self.record.current_streak,
            best = self.record.max_streak,
            "streak updated"
        );
        save_record(&mut self.store, STREAK_KEY, &self.record);
    }
}
