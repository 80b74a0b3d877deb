//! Cascade
//!
//! A daily word-chain puzzle. Each answer begins with the first `i` letters of
//! the answer before it, so solving one word reveals part of every word below.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cascade::core::PuzzleBook;
//! use cascade::game::{GameEngine, SystemClock};
//! use cascade::storage::MemoryStore;
//!
//! let book = PuzzleBook::embedded().unwrap();
//! let puzzle = book.puzzles()[0].clone();
//! let mut engine = GameEngine::new(puzzle, MemoryStore::new(), SystemClock);
//!
//! for (i, c) in "BICKER".chars().enumerate() {
//!     engine.set_letter(0, i, &c.to_string());
//! }
//! println!("{}", engine.matrix());
//! ```

// Core domain types
pub mod core;

// Word and clue data
pub mod dictionary;

// Puzzle generation
pub mod generator;

// Game engine, hints and streaks
pub mod game;

// Session persistence
pub mod storage;

// Runtime settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
