//! Clue/answer pairs
//!
//! A `WordData` is one rung of a cascade: the clue shown to the player and the
//! uppercase answer that has to be typed into the row.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One clue word of a puzzle
///
/// The answer is stored uppercase and is guaranteed to be non-empty ASCII
/// letters, so byte indexing into it is always a letter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWordData")]
pub struct WordData {
    clue: String,
    answer: String,
    length: usize,
}

/// Error type for invalid answers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("answer must not be empty")]
    Empty,
    #[error("answer must contain only ASCII letters")]
    NonAscii,
    #[error("answer contains invalid characters")]
    InvalidCharacters,
    #[error("declared length {declared} does not match answer length {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// Wire shape of a word entry; `length` is redundant and only checked
#[derive(Deserialize)]
struct RawWordData {
    clue: String,
    answer: String,
    #[serde(default)]
    length: Option<usize>,
}

impl TryFrom<RawWordData> for WordData {
    type Error = WordError;

    fn try_from(raw: RawWordData) -> Result<Self, Self::Error> {
        let word = Self::new(raw.clue, raw.answer)?;
        match raw.length {
            Some(declared) if declared != word.length => Err(WordError::LengthMismatch {
                declared,
                actual: word.length,
            }),
            _ => Ok(word),
        }
    }
}

impl WordData {
    /// Create a new word from a clue and its answer
    ///
    /// The answer is normalized to uppercase.
    ///
    /// # Errors
    /// Returns `WordError` if the answer is empty or contains anything other
    /// than ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use cascade::core::WordData;
    ///
    /// let word = WordData::new("Squabble", "bicker").unwrap();
    /// assert_eq!(word.answer(), "BICKER");
    /// assert_eq!(word.length(), 6);
    ///
    /// assert!(WordData::new("Nope", "b1cker").is_err());
    /// ```
    pub fn new(clue: impl Into<String>, answer: impl AsRef<str>) -> Result<Self, WordError> {
        let answer = answer.as_ref().trim();

        if answer.is_empty() {
            return Err(WordError::Empty);
        }

        if !answer.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !answer.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacters);
        }

        let answer = answer.to_ascii_uppercase();
        Ok(Self {
            clue: clue.into(),
            length: answer.len(),
            answer,
        })
    }

    #[inline]
    #[must_use]
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// The uppercase answer
    #[inline]
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Number of letters in the answer
    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Letter of the answer at `position`
    ///
    /// # Panics
    /// Panics if `position >= self.length()`
    #[inline]
    #[must_use]
    pub fn letter_at(&self, position: usize) -> u8 {
        self.answer.as_bytes()[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_normalizes_case() {
        let word = WordData::new("Squabble", "BiCkEr").unwrap();
        assert_eq!(word.answer(), "BICKER");
        assert_eq!(word.clue(), "Squabble");
        assert_eq!(word.length(), 6);
    }

    #[test]
    fn word_creation_rejects_bad_answers() {
        assert_eq!(WordData::new("x", ""), Err(WordError::Empty));
        assert_eq!(WordData::new("x", "   "), Err(WordError::Empty));
        assert_eq!(WordData::new("x", "café"), Err(WordError::NonAscii));
        assert_eq!(
            WordData::new("x", "two words"),
            Err(WordError::InvalidCharacters)
        );
        assert_eq!(WordData::new("x", "r2d2"), Err(WordError::InvalidCharacters));
    }

    #[test]
    fn word_letter_at() {
        let word = WordData::new("Keen", "sharp").unwrap();
        assert_eq!(word.letter_at(0), b'S');
        assert_eq!(word.letter_at(4), b'P');
    }

    #[test]
    fn word_serializes_with_length() {
        let word = WordData::new("Keen", "sharp").unwrap();
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, r#"{"clue":"Keen","answer":"SHARP","length":5}"#);
    }

    #[test]
    fn word_deserialize_checks_length() {
        let ok: WordData =
            serde_json::from_str(r#"{"clue":"Keen","answer":"sharp","length":5}"#).unwrap();
        assert_eq!(ok.answer(), "SHARP");

        let missing: WordData = serde_json::from_str(r#"{"clue":"Keen","answer":"sharp"}"#).unwrap();
        assert_eq!(missing.length(), 5);

        let bad = serde_json::from_str::<WordData>(r#"{"clue":"Keen","answer":"sharp","length":6}"#);
        assert!(bad.is_err());
    }
}
