//! Difficulty-filtered word pools
//!
//! A pool is the sorted, deduplicated set of uppercase answers the search may
//! use. Keeping it sorted means every prefix query is a binary-searched range.

use crate::dictionary::{Dictionary, FrequencyIndex};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Smallest pool the generator will search
pub const MIN_POOL_SIZE: usize = 5;

/// Pools below this size are likely to fail or be slow
pub const SMALL_POOL_WARNING: usize = 50;

/// Puzzle difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Common words (rank < 5,000), 4–6 letters
    #[default]
    Easy,
    /// Familiar words (rank < 15,000), 4–8 letters
    Medium,
    /// Any dictionary word of 4+ letters
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Exclusive frequency-rank bound, if any
    #[must_use]
    pub const fn max_rank(self) -> Option<usize> {
        match self {
            Self::Easy => Some(5_000),
            Self::Medium => Some(15_000),
            Self::Hard => None,
        }
    }

    /// Allowed answer lengths
    #[must_use]
    pub const fn lengths(self) -> RangeInclusive<usize> {
        match self {
            Self::Easy => 4..=6,
            Self::Medium => 4..=8,
            Self::Hard => 4..=usize::MAX,
        }
    }

    /// Whether a word of `length` letters and frequency `rank` belongs to this tier
    #[must_use]
    pub fn admits(self, length: usize, rank: Option<usize>) -> bool {
        if !self.lengths().contains(&length) {
            return false;
        }
        match (self.max_rank(), rank) {
            (None, _) => true,
            (Some(bound), Some(rank)) => rank < bound,
            (Some(_), None) => false,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium or hard)"
            )),
        }
    }
}

/// Error type for pool selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("word pool for {difficulty} has only {size} words (need at least {min})", min = MIN_POOL_SIZE)]
    TooSmall { difficulty: Difficulty, size: usize },
}

/// Candidate answers for the search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool from arbitrary words
    ///
    /// Words are uppercased, sorted and deduplicated.
    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }

    /// Filter `dictionary` down to the words admitted by `difficulty`
    ///
    /// # Errors
    /// Returns `PoolError::TooSmall` if fewer than `MIN_POOL_SIZE` words qualify.
    pub fn select(
        dictionary: &Dictionary,
        frequency: &FrequencyIndex,
        difficulty: Difficulty,
    ) -> Result<Self, PoolError> {
        let pool = Self::new(
            dictionary
                .words()
                .filter(|word| difficulty.admits(word.len(), frequency.rank(word))),
        );

        debug!(%difficulty, size = pool.len(), "selected word pool");

        if pool.len() < MIN_POOL_SIZE {
            return Err(PoolError::TooSmall {
                difficulty,
                size: pool.len(),
            });
        }
        if pool.len() < SMALL_POOL_WARNING {
            warn!(
                %difficulty,
                size = pool.len(),
                "word pool is small; puzzle generation may fail or be slow"
            );
        }

        Ok(pool)
    }

    /// All words, sorted
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The contiguous run of words starting with `prefix` (uppercase)
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> &[String] {
        let start = self.words.partition_point(|w| w.as_str() < prefix);
        let len = self.words[start..].partition_point(|w| w.starts_with(prefix));
        &self.words[start..start + len]
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Filter `dictionary` down to the candidate pool for `difficulty`
///
/// # Errors
/// Returns `PoolError::TooSmall` if fewer than `MIN_POOL_SIZE` words qualify.
pub fn select_pool(
    dictionary: &Dictionary,
    frequency: &FrequencyIndex,
    difficulty: Difficulty,
) -> Result<WordPool, PoolError> {
    WordPool::select(dictionary, frequency, difficulty)
}
