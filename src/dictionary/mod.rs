//! Dictionary and frequency index
//!
//! The generator draws answers and clues from a `Dictionary` and filters them by
//! how common they are using a `FrequencyIndex`. Both are keyed by uppercase
//! word, so lookups are case-insensitive.

mod embedded;
pub mod loader;

use rustc_hash::FxHashMap;

pub use embedded::{DICTIONARY, DICTIONARY_COUNT, FREQUENCY, FREQUENCY_COUNT};

/// Word → clue mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    clues: FxHashMap<String, String>,
}

impl Dictionary {
    /// Build a dictionary from `(word, clue)` pairs
    ///
    /// Words that are not plain ASCII letters are skipped. Later duplicates
    /// replace earlier ones.
    ///
    /// # Examples
    /// ```
    /// use cascade::dictionary::Dictionary;
    ///
    /// let dictionary = Dictionary::from_pairs([("sharp", "Keen"), ("not a word", "x")]);
    /// assert_eq!(dictionary.len(), 1);
    /// assert_eq!(dictionary.clue("SHARP"), Some("Keen"));
    /// ```
    pub fn from_pairs<I, W, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, C)>,
        W: AsRef<str>,
        C: Into<String>,
    {
        let clues = pairs
            .into_iter()
            .filter_map(|(word, clue)| normalize(word.as_ref()).map(|w| (w, clue.into())))
            .collect();
        Self { clues }
    }

    /// The dictionary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_pairs(DICTIONARY.iter().copied())
    }

    /// Clue for `word`, if present
    #[must_use]
    pub fn clue(&self, word: &str) -> Option<&str> {
        self.clues
            .get(&word.to_ascii_uppercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.clue(word).is_some()
    }

    /// All words, uppercase, in no particular order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.clues.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }
}

/// Word → frequency rank (0 = most frequent)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    ranks: FxHashMap<String, usize>,
}

impl FrequencyIndex {
    /// Build an index from words sorted most-frequent first
    ///
    /// The rank of a word is its position in the input. When a word appears
    /// more than once the first (most frequent) position wins.
    ///
    /// # Examples
    /// ```
    /// use cascade::dictionary::FrequencyIndex;
    ///
    /// let index = FrequencyIndex::from_ranked(["the", "sharp", "The"]);
    /// assert_eq!(index.rank("THE"), Some(0));
    /// assert_eq!(index.rank("sharp"), Some(1));
    /// assert_eq!(index.rank("dull"), None);
    /// ```
    pub fn from_ranked<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut ranks = FxHashMap::default();
        for (rank, word) in words.into_iter().enumerate() {
            if let Some(word) = normalize(word.as_ref()) {
                ranks.entry(word).or_insert(rank);
            }
        }
        Self { ranks }
    }

    /// The ranking compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_ranked(FREQUENCY.iter().copied())
    }

    #[must_use]
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.ranks.get(&word.to_ascii_uppercase()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Uppercase `word` if it is a plain ASCII word
fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    (!word.is_empty() && word.bytes().all(|b| b.is_ascii_alphabetic()))
        .then(|| word.to_ascii_uppercase())
}
