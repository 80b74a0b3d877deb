//! Playing a puzzle
//!
//! `GameEngine` owns the session of one puzzle and enforces every rule:
//! validation, auto-fill, completion and give-up. `HintAllocator` spends the
//! hint budget through the same propagation primitive the engine uses for
//! auto-fill, and `StreakTracker` keeps the cross-puzzle streak.

mod clock;
mod engine;
pub mod hint;
mod matrix;
pub mod propagate;
mod session;
mod streak;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{GameEngine, GameEvent};
pub use hint::{Cell, HintAllocator, HintOutcome, MAX_HINTS, hints_remaining};
pub use matrix::AnswerMatrix;
pub use session::{GameSession, GameStatus, RestoreError, SessionRecord, session_key};
pub use streak::{STREAK_KEY, StreakRecord, StreakTracker};
