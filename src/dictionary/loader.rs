//! Dictionary loading utilities
//!
//! Loads clue dictionaries and frequency rankings from files. Two formats are
//! accepted for each, detected from the first non-blank character:
//!
//! - dictionary: a JSON object `{"word": "clue"}`, or `word<TAB>clue` lines
//! - frequency: a JSON array of `[word, score]` pairs, or one word per line
//!
//! Frequency files must already be sorted most-frequent first.

use super::{Dictionary, FrequencyIndex};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for dictionary files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a clue dictionary from a file
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or its JSON is malformed.
///
/// # Examples
/// ```no_run
/// use cascade::dictionary::loader::load_dictionary;
///
/// let dictionary = load_dictionary("data/dictionary.json").unwrap();
/// println!("Loaded {} words", dictionary.len());
/// ```
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Dictionary, LoadError> {
    let path = path.as_ref();
    let content = read(path)?;

    let dictionary = if looks_like(&content, '{') {
        let clues: FxHashMap<String, String> =
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Dictionary::from_pairs(clues)
    } else {
        dictionary_from_tsv(&content)
    };

    debug!(path = %path.display(), words = dictionary.len(), "loaded dictionary");
    Ok(dictionary)
}

/// Load a frequency ranking from a file
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or its JSON is malformed.
pub fn load_frequency<P: AsRef<Path>>(path: P) -> Result<FrequencyIndex, LoadError> {
    let path = path.as_ref();
    let content = read(path)?;

    let index = if looks_like(&content, '[') {
        let entries: Vec<(String, f64)> =
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        FrequencyIndex::from_ranked(entries.into_iter().map(|(word, _)| word))
    } else {
        frequency_from_lines(&content)
    };

    debug!(path = %path.display(), words = index.len(), "loaded frequency ranking");
    Ok(index)
}

/// Parse `word<TAB>clue` lines, skipping blanks and `#` comments
#[must_use]
pub fn dictionary_from_tsv(content: &str) -> Dictionary {
    Dictionary::from_pairs(
        content
            .lines()
            .filter(|line| !is_skippable(line))
            .filter_map(|line| line.split_once('\t'))
            .map(|(word, clue)| (word, clue.trim().to_string())),
    )
}

/// Parse one word per line, skipping blanks and `#` comments
#[must_use]
pub fn frequency_from_lines(content: &str) -> FrequencyIndex {
    FrequencyIndex::from_ranked(content.lines().filter(|line| !is_skippable(line)))
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn looks_like(content: &str, opening: char) -> bool {
    content.trim_start().starts_with(opening)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
