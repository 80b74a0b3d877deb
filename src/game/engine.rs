//! The game engine
//!
//! Owns one puzzle's session and is the only thing that mutates it. Every
//! operation ends with re-derivation:
//!
//! 1. recompute each row's validation flag
//! 2. auto-fill from every row that just became valid, which can validate
//!    further rows, so repeat until nothing changes
//! 3. check for completion
//!
//! and then persists the session through the injected `Store`.

use super::propagate::fill_shared;
use super::session::{GameSession, GameStatus, RestoreError, SessionRecord, session_key};
use super::{AnswerMatrix, Clock, SystemClock};
use crate::core::{Puzzle, is_valid_prefix_chain};
use crate::storage::{Store, load_record, save_record};
use std::time::Duration;
use tracing::{debug, info, warn};

/// State transitions reported to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A row now spells its answer
    WordValidated(usize),
    /// A previously valid row was edited away from its answer
    WordInvalidated(usize),
    /// A row received letters from a validated row
    AutoFilled(usize),
    /// The session finished; emitted once
    Completed { given_up: bool },
}

/// Game engine for one puzzle
pub struct GameEngine<S: Store, C: Clock = SystemClock> {
    puzzle: Puzzle,
    session: GameSession,
    store: S,
    clock: C,
}

impl<S: Store, C: Clock> GameEngine<S, C> {
    /// Open `puzzle`, restoring its saved session if there is a usable one
    ///
    /// A missing record starts a fresh session. A malformed one is logged and
    /// replaced by a fresh session.
    pub fn new(puzzle: Puzzle, store: S, clock: C) -> Self {
        let key = session_key(puzzle.id());
        let now = clock.now_ms();
        let restored = load_record::<SessionRecord>(&store, &key).and_then(|record| {
            GameSession::from_record(&record, &puzzle, now)
                .inspect_err(|err: &RestoreError| {
                    warn!(puzzle = puzzle.id(), error = %err, "discarding saved session");
                })
                .ok()
        });

        let session = match restored {
            Some(session) => {
                debug!(puzzle = puzzle.id(), status = ?session.status(), "restored session");
                session
            }
            None => GameSession::fresh(puzzle.words(), now),
        };

        let mut engine = Self {
            puzzle,
            session,
            store,
            clock,
        };
        engine.check_completion();
        engine.persist();
        engine
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub const fn matrix(&self) -> &AnswerMatrix {
        &self.session.matrix
    }

    #[must_use]
    pub fn validated(&self) -> &[bool] {
        &self.session.validated
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.session.status
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.session.status.is_complete()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to share it with a streak tracker
    pub fn into_store(self) -> S {
        self.store
    }

    /// Time on the clock: live while in progress, frozen once complete
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let ms = self
            .session
            .completion_ms
            .unwrap_or_else(|| self.ms_since_start());
        Duration::from_millis(ms)
    }

    /// Type `input` into a cell
    ///
    /// Ignored (no events, no change) when the session is complete, the cell
    /// does not exist, or `input` is not exactly one ASCII letter.
    pub fn set_letter(&mut self, word: usize, letter: usize, input: &str) -> Vec<GameEvent> {
        let [byte] = input.as_bytes() else {
            return Vec::new();
        };
        if !byte.is_ascii_alphabetic() || !self.accepts_input(word, letter) {
            return Vec::new();
        }

        self.session
            .matrix
            .set(word, letter, Some(byte.to_ascii_uppercase()));
        self.commit()
    }

    /// Empty a cell
    pub fn clear_letter(&mut self, word: usize, letter: usize) -> Vec<GameEvent> {
        if !self.accepts_input(word, letter) {
            return Vec::new();
        }

        self.session.matrix.set(word, letter, None);
        self.commit()
    }

    /// Reveal every answer and end the session as given up
    pub fn give_up(&mut self) -> Vec<GameEvent> {
        if self.is_complete() {
            return Vec::new();
        }

        let words = self.puzzle.words();
        self.session.matrix = AnswerMatrix::solved_for(words);
        self.session.validated = vec![true; words.len()];
        self.finish(GameStatus::GivenUp);
        self.persist();

        vec![GameEvent::Completed { given_up: true }]
    }

    /// Throw away the session and start over
    ///
    /// The stored record is deleted before the fresh session is saved.
    pub fn reset(&mut self) {
        let key = session_key(self.puzzle.id());
        if let Err(err) = self.store.delete(&key) {
            warn!(key, error = %err, "failed to delete stored session");
        }

        self.session = GameSession::fresh(self.puzzle.words(), self.clock.now_ms());
        info!(puzzle = self.puzzle.id(), "session reset");
        self.persist();
    }

    /// Write a hinted letter and, for a priority hint, share it down its column
    ///
    /// Budget bookkeeping is the caller's job; this only touches the grid.
    pub(super) fn reveal(&mut self, word: usize, letter: usize, cascade: bool) -> Vec<GameEvent> {
        let words = self.puzzle.words();
        let Some(target) = words.get(word).filter(|w| letter < w.length()) else {
            return Vec::new();
        };

        self.session.matrix.set(word, letter, Some(target.letter_at(letter)));
        if cascade {
            fill_shared(&mut self.session.matrix, words, word, letter..letter + 1, false);
        }
        self.commit()
    }

    pub(super) const fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    fn accepts_input(&self, word: usize, letter: usize) -> bool {
        !self.is_complete() && self.session.matrix.has_cell(word, letter)
    }

    /// Re-derive, then persist
    fn commit(&mut self) -> Vec<GameEvent> {
        let events = self.settle();
        self.persist();
        events
    }

    fn settle(&mut self) -> Vec<GameEvent> {
        let words = self.puzzle.words();
        let mut events = Vec::new();

        loop {
            let fresh = self.session.matrix.validation(words);
            let mut newly_valid = Vec::new();

            for (i, (&was, &now)) in self.session.validated.iter().zip(&fresh).enumerate() {
                match (was, now) {
                    (false, true) => {
                        events.push(GameEvent::WordValidated(i));
                        newly_valid.push(i);
                    }
                    (true, false) => events.push(GameEvent::WordInvalidated(i)),
                    _ => {}
                }
            }
            self.session.validated = fresh;

            if newly_valid.is_empty() {
                break;
            }

            for source in newly_valid {
                let columns = 0..words[source].length();
                for row in fill_shared(&mut self.session.matrix, words, source, columns, true) {
                    events.push(GameEvent::AutoFilled(row));
                }
            }
        }

        if self.check_completion() {
            events.push(GameEvent::Completed { given_up: false });
        }
        events
    }

    /// Mark the session solved if every row is right; true on that transition
    fn check_completion(&mut self) -> bool {
        if self.is_complete() || self.session.validated.iter().any(|&v| !v) {
            return false;
        }
        if !is_valid_prefix_chain(&self.session.matrix.joined()) {
            return false;
        }

        self.finish(GameStatus::Solved);
        true
    }

    fn finish(&mut self, status: GameStatus) {
        let elapsed = self.ms_since_start();
        self.session.status = status;
        self.session.completion_ms = Some(elapsed);
        info!(
            puzzle = self.puzzle.id(),
            ?status,
            elapsed_ms = elapsed,
            hints = self.session.hints_used,
            "puzzle finished"
        );
    }

    /// Clock time since the session started; zero if the clock went backwards
    fn ms_since_start(&self) -> u64 {
        let delta = self.clock.now_ms().saturating_sub(self.session.start_ms);
        u64::try_from(delta).unwrap_or(0)
    }

    fn persist(&mut self) {
        let key = session_key(self.puzzle.id());
        save_record(&mut self.store, &key, &self.session.to_record());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PuzzleBook, WordData};
    use crate::game::ManualClock;
    use crate::storage::{MemoryStore, StoreError};
    use chrono::NaiveDate;

    fn bicker() -> Puzzle {
        PuzzleBook::embedded().unwrap().puzzles()[0].clone()
    }

    fn engine() -> (GameEngine<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let engine = GameEngine::new(bicker(), MemoryStore::new(), clock.clone());
        (engine, clock)
    }

    fn type_word(
        engine: &mut GameEngine<MemoryStore, ManualClock>,
        row: usize,
        text: &str,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for (i, c) in text.chars().enumerate() {
            events.extend(engine.set_letter(row, i, &c.to_string()));
        }
        events
    }

    #[test]
    fn new_engine_starts_fresh_and_saves() {
        let (engine, _) = engine();
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.validated(), [false; 5]);
        assert!(engine.store().load("cascade-game-1").unwrap().is_some());
    }

    #[test]
    fn set_letter_uppercases_and_rejects_bad_input() {
        let (mut engine, _) = engine();
        engine.set_letter(0, 0, "b");
        assert_eq!(engine.matrix().cell(0, 0), Some(b'B'));

        let before = engine.matrix().clone();
        assert!(engine.set_letter(0, 1, "ab").is_empty());
        assert!(engine.set_letter(0, 1, "").is_empty());
        assert!(engine.set_letter(0, 1, "1").is_empty());
        assert!(engine.set_letter(0, 1, "é").is_empty());
        assert!(engine.set_letter(0, 6, "A").is_empty());
        assert!(engine.set_letter(5, 0, "A").is_empty());
        assert_eq!(engine.matrix(), &before);
    }

    #[test]
    fn validating_first_word_fills_column_zero() {
        let (mut engine, _) = engine();
        let events = type_word(&mut engine, 0, "BICKER");

        assert!(events.contains(&GameEvent::WordValidated(0)));
        for row in 1..5 {
            assert!(events.contains(&GameEvent::AutoFilled(row)));
            assert_eq!(engine.matrix().cell(row, 0), Some(b'B'));
        }
        assert_eq!(engine.validated(), [true, false, false, false, false]);
    }

    #[test]
    fn clearing_a_valid_word_invalidates_it() {
        let (mut engine, _) = engine();
        type_word(&mut engine, 0, "BICKER");
        let events = engine.clear_letter(0, 3);
        assert_eq!(events, [GameEvent::WordInvalidated(0)]);
        assert!(!engine.validated()[0]);
        // Auto-filled letters stay
        assert_eq!(engine.matrix().cell(1, 0), Some(b'B'));
    }

    #[test]
    fn autofill_can_validate_another_row() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let words = vec![
            WordData::new("a", "AB").unwrap(),
            WordData::new("b", "AX").unwrap(),
        ];
        let puzzle = Puzzle::new(9, date, words).unwrap();
        let mut engine = GameEngine::new(puzzle, MemoryStore::new(), ManualClock::new(0));

        engine.set_letter(1, 1, "X");
        assert!(engine.set_letter(0, 0, "A").is_empty());
        let events = engine.set_letter(0, 1, "B");
        assert!(events.contains(&GameEvent::WordValidated(0)));
        assert!(events.contains(&GameEvent::AutoFilled(1)));
        assert!(events.contains(&GameEvent::WordValidated(1)));
        assert_eq!(events.last(), Some(&GameEvent::Completed { given_up: false }));
    }

    #[test]
    fn completing_all_rows_solves_and_freezes_time() {
        let (mut engine, clock) = engine();
        clock.advance(65_000);

        let mut events = Vec::new();
        for (row, answer) in bicker().answers().iter().enumerate() {
            events.extend(type_word(&mut engine, row, answer));
        }

        let completions = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Completed { .. }))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(engine.status(), GameStatus::Solved);
        assert_eq!(engine.elapsed(), Duration::from_secs(65));

        clock.advance(30_000);
        assert_eq!(engine.elapsed(), Duration::from_secs(65));
        assert!(engine.set_letter(0, 0, "Z").is_empty());
    }

    #[test]
    fn elapsed_is_live_while_in_progress() {
        let (engine, clock) = engine();
        clock.advance(1_500);
        assert_eq!(engine.elapsed(), Duration::from_millis(1_500));
        clock.advance(1_000);
        assert_eq!(engine.elapsed(), Duration::from_millis(2_500));
    }

    #[test]
    fn give_up_reveals_and_freezes() {
        let (mut engine, clock) = engine();
        type_word(&mut engine, 0, "BI");
        clock.advance(42_000);

        assert_eq!(engine.give_up(), [GameEvent::Completed { given_up: true }]);
        assert_eq!(engine.status(), GameStatus::GivenUp);
        assert_eq!(engine.matrix().joined(), bicker().answers());
        assert_eq!(engine.validated(), [true; 5]);

        clock.advance(10_000);
        assert_eq!(engine.elapsed(), Duration::from_secs(42));
        assert!(engine.give_up().is_empty());
    }

    #[test]
    fn session_survives_reopen() {
        let (mut engine, clock) = engine();
        type_word(&mut engine, 0, "BICKER");
        let store = engine.into_store();

        let engine = GameEngine::new(bicker(), store, clock);
        assert_eq!(engine.matrix().row_text(0), "BICKER");
        assert_eq!(engine.matrix().cell(4, 0), Some(b'B'));
        assert!(engine.validated()[0]);
    }

    #[test]
    fn malformed_saved_session_starts_fresh() {
        let mut store = MemoryStore::new();
        store
            .save("cascade-game-1", r#"{"userAnswers": [["B"]], "validatedAnswers": []}"#)
            .unwrap();
        let engine = GameEngine::new(bicker(), store, ManualClock::new(7));
        assert_eq!(engine.matrix(), &AnswerMatrix::empty_for(bicker().words()));
        assert_eq!(engine.session().start_ms(), 7);

        let mut store = engine.into_store();
        let mut record = GameSession::fresh(bicker().words(), 0).to_record();
        record.user_answers.truncate(3);
        store
            .save("cascade-game-1", &serde_json::to_string(&record).unwrap())
            .unwrap();
        let engine = GameEngine::new(bicker(), store, ManualClock::new(9));
        assert_eq!(engine.session().start_ms(), 9);
        assert_eq!(engine.matrix().row_count(), 5);
    }

    #[test]
    fn far_past_start_time_is_discarded() {
        let mut store = MemoryStore::new();
        let mut record = GameSession::fresh(bicker().words(), 0).to_record();
        record.start_time = i64::MIN;
        store
            .save("cascade-game-1", &serde_json::to_string(&record).unwrap())
            .unwrap();

        let clock = ManualClock::new(1_700_000_000_000);
        let engine = GameEngine::new(bicker(), store, clock.clone());
        assert_eq!(engine.session().start_ms(), 1_700_000_000_000);
        clock.advance(2_000);
        assert_eq!(engine.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn future_start_time_is_discarded() {
        let mut store = MemoryStore::new();
        let mut record = GameSession::fresh(bicker().words(), 0).to_record();
        record.start_time = 50_000;
        store
            .save("cascade-game-1", &serde_json::to_string(&record).unwrap())
            .unwrap();

        let engine = GameEngine::new(bicker(), store, ManualClock::new(10_000));
        assert_eq!(engine.session().start_ms(), 10_000);
        assert_eq!(engine.elapsed(), Duration::ZERO);
    }

    /// Records every delete and save it forwards
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore,
        ops: Vec<String>,
    }

    impl Store for RecordingStore {
        fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.ops.push(format!("save {key}"));
            self.inner.save(key, value)
        }

        fn delete(&mut self, key: &str) -> Result<(), StoreError> {
            self.ops.push(format!("delete {key}"));
            self.inner.delete(key)
        }
    }

    #[test]
    fn reset_deletes_old_record_then_saves_fresh_one() {
        let mut engine = GameEngine::new(bicker(), RecordingStore::default(), ManualClock::new(0));
        type_word_in(&mut engine, 0, "BIC");
        engine.store.ops.clear();

        engine.reset();
        assert_eq!(
            engine.store().ops,
            ["delete cascade-game-1", "save cascade-game-1"]
        );
        let saved = engine.store().load("cascade-game-1").unwrap().unwrap();
        let record: SessionRecord = serde_json::from_str(&saved).unwrap();
        assert!(record.user_answers[0].iter().all(String::is_empty));
    }

    fn type_word_in<S: Store>(engine: &mut GameEngine<S, ManualClock>, row: usize, text: &str) {
        for (i, c) in text.chars().enumerate() {
            engine.set_letter(row, i, &c.to_string());
        }
    }

    #[test]
    fn reset_starts_a_new_session() {
        let (mut engine, clock) = engine();
        engine.give_up();
        clock.advance(5_000);

        engine.reset();
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.matrix().empty_cells().count(), 41);
        assert_eq!(engine.elapsed(), Duration::ZERO);
        assert_eq!(engine.session().hints_used(), 0);
    }

    #[test]
    fn validation_is_idempotent() {
        let (mut engine, _) = engine();
        type_word(&mut engine, 0, "BICKER");
        type_word(&mut engine, 2, "BARB");
        let words = engine.puzzle().words();
        assert_eq!(
            engine.matrix().validation(words),
            engine.matrix().validation(words)
        );
        assert_eq!(engine.matrix().validation(words), engine.validated());
    }
}
