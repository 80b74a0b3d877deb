//! Core domain types for Cascade
//!
//! Words, puzzles and the cascade pattern itself. Everything here is pure and
//! shared by the generator and the game engine.

pub mod pattern;
mod puzzle;
mod word;

pub use pattern::{is_valid_prefix_chain, required_prefix, shared_prefix_len};
pub use puzzle::{BookError, CHAIN_LENGTH, Puzzle, PuzzleBook, PuzzleError};
pub use word::{WordData, WordError};
