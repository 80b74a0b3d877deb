//! Hint allocation
//!
//! Every empty cell of a word that is not solved yet is a hint candidate.
//! Cells left of the diagonal (`column < row`) are *priority* cells: letters
//! the cascade shares with earlier words, so revealing one also fills the
//! same column in the rows that share it. Each puzzle gets `MAX_HINTS` hints,
//! and the first priority cell is preferred once.

use super::engine::{GameEngine, GameEvent};
use super::{AnswerMatrix, Clock};
use crate::storage::Store;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Hints per puzzle
pub const MAX_HINTS: u8 = 3;

/// A grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub word: usize,
    pub letter: usize,
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn new(word: usize, letter: usize) -> Self {
        Self { word, letter }
    }

    /// Whether the cell lies in the zone shared with earlier words
    #[inline]
    #[must_use]
    pub const fn is_priority(self) -> bool {
        self.letter < self.word
    }
}

/// Result of a hint request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintOutcome {
    pub applied: bool,
    pub was_priority: bool,
    /// Cell that was revealed
    pub cell: Option<Cell>,
    /// Engine events caused by the reveal
    pub events: Vec<GameEvent>,
}

impl HintOutcome {
    pub const NOT_APPLIED: Self = Self {
        applied: false,
        was_priority: false,
        cell: None,
        events: Vec::new(),
    };
}

/// Hint candidates split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub priority: Vec<Cell>,
    pub regular: Vec<Cell>,
}

impl Candidates {
    /// Classify the empty cells of every unvalidated row
    #[must_use]
    pub fn collect(matrix: &AnswerMatrix, validated: &[bool]) -> Self {
        let mut candidates = Self::default();
        for (word, letter) in matrix.empty_cells() {
            if validated.get(word).copied().unwrap_or(false) {
                continue;
            }
            let cell = Cell::new(word, letter);
            if cell.is_priority() {
                candidates.priority.push(cell);
            } else {
                candidates.regular.push(cell);
            }
        }
        candidates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.regular.is_empty()
    }

    /// Pick a cell: an unspent priority hint first, then regular cells, then
    /// priority cells again as a last resort
    pub fn choose<R: Rng + ?Sized>(&self, priority_spent: bool, rng: &mut R) -> Option<Cell> {
        if !priority_spent && let Some(&cell) = self.priority.choose(rng) {
            return Some(cell);
        }
        self.regular
            .choose(rng)
            .or_else(|| self.priority.choose(rng))
            .copied()
    }
}

/// Hands out hints for one game
pub struct HintAllocator<R: Rng> {
    rng: R,
}

impl<R: Rng> HintAllocator<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Reveal one letter in `engine`
    ///
    /// Does nothing and returns `HintOutcome::NOT_APPLIED` when the game is
    /// over, the budget is spent, or there is no empty cell to reveal.
    pub fn apply<S: Store, C: Clock>(&mut self, engine: &mut GameEngine<S, C>) -> HintOutcome {
        let session = engine.session();
        if engine.is_complete() || session.hints_used() >= MAX_HINTS {
            return HintOutcome::NOT_APPLIED;
        }

        let candidates = Candidates::collect(session.matrix(), session.validated());
        let Some(cell) = candidates.choose(session.priority_hint_used(), &mut self.rng) else {
            return HintOutcome::NOT_APPLIED;
        };

        let was_priority = cell.is_priority();
        let session = engine.session_mut();
        session.hints_used += 1;
        session.priority_hint_used |= was_priority;
        debug!(
            word = cell.word,
            letter = cell.letter,
            was_priority,
            hints_used = session.hints_used,
            "hint applied"
        );

        let events = engine.reveal(cell.word, cell.letter, was_priority);
        HintOutcome {
            applied: true,
            was_priority,
            cell: Some(cell),
            events,
        }
    }
}

/// Hints still available in `engine`
#[must_use]
pub fn hints_remaining<S: Store, C: Clock>(engine: &GameEngine<S, C>) -> u8 {
    MAX_HINTS.saturating_sub(engine.session().hints_used())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PuzzleBook;
    use crate::game::{GameStatus, ManualClock};
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type Engine = GameEngine<MemoryStore, ManualClock>;

    fn engine() -> Engine {
        let puzzle = PuzzleBook::embedded().unwrap().puzzles()[0].clone();
        GameEngine::new(puzzle, MemoryStore::new(), ManualClock::new(0))
    }

    fn allocator(seed: u64) -> HintAllocator<StdRng> {
        HintAllocator::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn classification_follows_diagonal() {
        let engine = engine();
        let candidates = Candidates::collect(engine.matrix(), engine.validated());
        // Row i contributes i priority cells: 0 + 1 + 2 + 3 + 4
        assert_eq!(candidates.priority.len(), 10);
        assert_eq!(candidates.regular.len(), 41 - 10);
        assert!(candidates.priority.iter().all(|c| c.letter < c.word));
    }

    #[test]
    fn validated_rows_are_not_candidates() {
        let mut engine = engine();
        for (i, c) in "BICKER".chars().enumerate() {
            engine.set_letter(0, i, &c.to_string());
        }
        let candidates = Candidates::collect(engine.matrix(), engine.validated());
        assert!(candidates.regular.iter().all(|c| c.word != 0));
        // Column 0 of rows 1-4 was auto-filled
        assert!(candidates.priority.iter().all(|c| c.letter != 0));
    }

    #[test]
    fn first_hint_is_priority_and_cascades() {
        for seed in 0..10 {
            let mut engine = engine();
            let outcome = allocator(seed).apply(&mut engine);
            assert!(outcome.applied);
            assert!(outcome.was_priority);

            let cell = outcome.cell.unwrap();
            let answer = engine.puzzle().words()[cell.word].answer().as_bytes();
            let letter = answer[cell.letter];
            for row in cell.letter..5 {
                assert_eq!(
                    engine.matrix().cell(row, cell.letter),
                    Some(letter),
                    "seed {seed}: row {row} missing cascaded letter"
                );
            }
            assert!(engine.session().priority_hint_used());
        }
    }

    #[test]
    fn later_hints_prefer_regular_cells() {
        let mut engine = engine();
        let mut allocator = allocator(3);
        assert!(allocator.apply(&mut engine).was_priority);

        for _ in 0..2 {
            let outcome = allocator.apply(&mut engine);
            assert!(outcome.applied);
            assert!(!outcome.was_priority);
            let cell = outcome.cell.unwrap();
            assert!(engine.matrix().cell(cell.word, cell.letter).is_some());
        }
    }

    #[test]
    fn budget_is_enforced() {
        let mut engine = engine();
        let mut allocator = allocator(8);
        for _ in 0..MAX_HINTS {
            assert!(allocator.apply(&mut engine).applied);
        }
        assert_eq!(hints_remaining(&engine), 0);

        let before = engine.matrix().clone();
        assert_eq!(allocator.apply(&mut engine), HintOutcome::NOT_APPLIED);
        assert_eq!(engine.matrix(), &before);
        assert_eq!(engine.session().hints_used(), MAX_HINTS);
    }

    #[test]
    fn priority_fallback_when_no_regular_cells() {
        let candidates = Candidates {
            priority: vec![Cell::new(3, 1)],
            regular: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(candidates.choose(true, &mut rng), Some(Cell::new(3, 1)));
        assert_eq!(Candidates::default().choose(false, &mut rng), None);
        assert!(Candidates::default().is_empty());
    }

    #[test]
    fn no_hints_after_completion() {
        let mut engine = engine();
        engine.give_up();
        assert_eq!(allocator(1).apply(&mut engine), HintOutcome::NOT_APPLIED);
        assert_eq!(engine.status(), GameStatus::GivenUp);
    }

    #[test]
    fn hint_can_finish_a_word() {
        let mut engine = engine();
        // Leave only the last letter of BICKER open
        for (i, c) in "BICKE".chars().enumerate() {
            engine.set_letter(0, i, &c.to_string());
        }
        // Fill every other row so the only empty cell is (0, 5)
        let answers: Vec<String> = engine
            .puzzle()
            .answers()
            .into_iter()
            .map(String::from)
            .collect();
        for (row, answer) in answers.iter().enumerate().skip(1) {
            for (i, c) in answer.chars().enumerate() {
                engine.set_letter(row, i, &c.to_string());
            }
        }

        let outcome = allocator(5).apply(&mut engine);
        assert_eq!(outcome.cell, Some(Cell::new(0, 5)));
        assert!(outcome.events.contains(&GameEvent::WordValidated(0)));
        assert!(outcome.events.contains(&GameEvent::Completed { given_up: false }));
        assert_eq!(engine.status(), GameStatus::Solved);
    }
}
