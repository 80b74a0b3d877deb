//! Generate command
//!
//! Builds a new puzzle for today, ready to append to the puzzle book.

use crate::core::{Puzzle, PuzzleBook};
use crate::dictionary::{Dictionary, FrequencyIndex};
use crate::generator::{CascadeSearch, Difficulty, PoolError, select_pool};
use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::info;

/// Error type for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("no {difficulty} puzzle found within the attempt budget; try another difficulty")]
    NotFound { difficulty: Difficulty },
}

/// Generation request
#[derive(Debug, Clone, Copy)]
pub struct GenerateConfig {
    pub difficulty: Difficulty,
    /// Date stamped on the puzzle
    pub date: NaiveDate,
}

/// Generate one puzzle whose id follows the highest id in `book`
///
/// # Errors
/// Returns `GenerateError::Pool` if the difficulty tier has too few words and
/// `GenerateError::NotFound` if the search gives up.
pub fn run_generate<R: Rng>(
    config: GenerateConfig,
    dictionary: &Dictionary,
    frequency: &FrequencyIndex,
    book: &PuzzleBook,
    rng: R,
) -> Result<Puzzle, GenerateError> {
    let pool = select_pool(dictionary, frequency, config.difficulty)?;
    let id = book.next_id();

    let puzzle = CascadeSearch::new(&pool, dictionary, rng)
        .generate(id, config.date)
        .ok_or(GenerateError::NotFound {
            difficulty: config.difficulty,
        })?;

    info!(id, difficulty = %config.difficulty, answers = ?puzzle.answers(), "generated puzzle");
    Ok(puzzle)
}
