//! Puzzles and the puzzle book
//!
//! A `Puzzle` is an ordered list of words that satisfies the cascade pattern.
//! The `PuzzleBook` is the published list of daily puzzles.

use super::pattern::first_broken_link;
use super::WordData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Number of words in a daily puzzle
pub const CHAIN_LENGTH: usize = 5;

/// A fixed cascade of clue words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPuzzle")]
pub struct Puzzle {
    id: u32,
    date: NaiveDate,
    words: Vec<WordData>,
}

/// Error type for invalid puzzles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle has no words")]
    Empty,
    #[error("word {position} does not continue the cascade")]
    BrokenChain { position: usize },
}

#[derive(Deserialize)]
struct RawPuzzle {
    id: u32,
    date: NaiveDate,
    words: Vec<WordData>,
}

impl TryFrom<RawPuzzle> for Puzzle {
    type Error = PuzzleError;

    fn try_from(raw: RawPuzzle) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.date, raw.words)
    }
}

impl Puzzle {
    /// Create a puzzle, checking the cascade pattern
    ///
    /// # Errors
    /// Returns `PuzzleError` if there are no words or an answer does not start
    /// with the required prefix of the one before it.
    pub fn new(id: u32, date: NaiveDate, words: Vec<WordData>) -> Result<Self, PuzzleError> {
        if words.is_empty() {
            return Err(PuzzleError::Empty);
        }

        let answers: Vec<&str> = words.iter().map(WordData::answer).collect();
        if let Some(position) = first_broken_link(&answers) {
            return Err(PuzzleError::BrokenChain { position });
        }

        Ok(Self { id, date, words })
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[WordData] {
        &self.words
    }

    /// Number of words in the chain
    #[inline]
    #[must_use]
    pub fn chain_length(&self) -> usize {
        self.words.len()
    }

    /// The answers in chain order
    #[must_use]
    pub fn answers(&self) -> Vec<&str> {
        self.words.iter().map(WordData::answer).collect()
    }
}

/// Error type for loading a puzzle book
#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read puzzle book {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed puzzle book: {0}")]
    Json(#[from] serde_json::Error),
    #[error("puzzle book is empty")]
    NoPuzzles,
    #[error("puzzle {id} has {actual} words, expected {expected}", expected = CHAIN_LENGTH)]
    WrongLength { id: u32, actual: usize },
}

/// The published list of daily puzzles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleBook {
    puzzles: Vec<Puzzle>,
}

const EMBEDDED_BOOK: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/puzzles.json"));

impl PuzzleBook {
    /// Parse a JSON array of puzzles
    ///
    /// # Errors
    /// Returns `BookError` if the JSON is malformed, a puzzle breaks the cascade,
    /// a puzzle does not have exactly `CHAIN_LENGTH` words, or the book is empty.
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let puzzles: Vec<Puzzle> = serde_json::from_str(json)?;

        if puzzles.is_empty() {
            return Err(BookError::NoPuzzles);
        }

        if let Some(puzzle) = puzzles.iter().find(|p| p.chain_length() != CHAIN_LENGTH) {
            return Err(BookError::WrongLength {
                id: puzzle.id(),
                actual: puzzle.chain_length(),
            });
        }

        Ok(Self { puzzles })
    }

    /// Load a puzzle book from a JSON file
    ///
    /// # Errors
    /// Returns `BookError` if the file cannot be read or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BookError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// The puzzle book compiled into the binary
    ///
    /// # Errors
    /// Returns `BookError` only if the bundled data is corrupt.
    pub fn embedded() -> Result<Self, BookError> {
        Self::from_json(EMBEDDED_BOOK)
    }

    #[must_use]
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// The puzzle scheduled for `today`, falling back to the first entry
    #[must_use]
    pub fn active(&self, today: NaiveDate) -> &Puzzle {
        self.puzzles
            .iter()
            .find(|p| p.date() == today)
            .unwrap_or(&self.puzzles[0])
    }

    /// Id for a puzzle appended to this book
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.puzzles.iter().map(Puzzle::id).max().unwrap_or(0) + 1
    }
}
