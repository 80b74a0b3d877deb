//! Runtime settings
//!
//! Every data source has a bundled default, so the binary runs with no files
//! at all. Command-line paths replace the bundled data one source at a time.

use crate::core::{BookError, PuzzleBook};
use crate::dictionary::loader::{LoadError, load_dictionary, load_frequency};
use crate::dictionary::{Dictionary, FrequencyIndex};
use crate::storage::FileStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::debug;

/// Fallback data directory when the platform has none
const FALLBACK_DATA_DIR: &str = ".cascade";

/// Resolved settings for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Where sessions, the streak and the log live
    pub data_dir: PathBuf,
    /// Puzzle book file; `None` uses the bundled book
    pub puzzles: Option<PathBuf>,
    /// Clue dictionary file; `None` uses the bundled dictionary
    pub dictionary: Option<PathBuf>,
    /// Frequency list file; `None` uses the bundled list
    pub frequency: Option<PathBuf>,
    /// Seed for reproducible generation and hints
    pub seed: Option<u64>,
}

impl Settings {
    /// Fill in defaults for anything not given on the command line
    #[must_use]
    pub fn resolve(
        data_dir: Option<PathBuf>,
        puzzles: Option<PathBuf>,
        dictionary: Option<PathBuf>,
        frequency: Option<PathBuf>,
        seed: Option<u64>,
    ) -> Self {
        let data_dir = data_dir
            .or_else(FileStore::default_location)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR));

        Self {
            data_dir,
            puzzles,
            dictionary,
            frequency,
            seed,
        }
    }

    /// Store for sessions and the streak record
    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    /// # Errors
    /// Returns `BookError` if the puzzle book cannot be read or is invalid.
    pub fn puzzle_book(&self) -> Result<PuzzleBook, BookError> {
        match &self.puzzles {
            Some(path) => {
                debug!(path = %path.display(), "loading puzzle book");
                PuzzleBook::load(path)
            }
            None => PuzzleBook::embedded(),
        }
    }

    /// # Errors
    /// Returns `LoadError` if the dictionary file cannot be read.
    pub fn dictionary(&self) -> Result<Dictionary, LoadError> {
        self.dictionary
            .as_ref()
            .map_or_else(|| Ok(Dictionary::embedded()), load_dictionary)
    }

    /// # Errors
    /// Returns `LoadError` if the frequency file cannot be read.
    pub fn frequency(&self) -> Result<FrequencyIndex, LoadError> {
        self.frequency
            .as_ref()
            .map_or_else(|| Ok(FrequencyIndex::embedded()), load_frequency)
    }

    /// A fresh RNG, seeded when a seed was given
    #[must_use]
    pub fn rng(&self) -> StdRng {
        make_rng(self.seed)
    }
}

/// Seeded RNG for reproducible runs, OS-seeded otherwise
#[must_use]
pub fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(
        || StdRng::from_rng(&mut rand::rng()),
        StdRng::seed_from_u64,
    )
}
