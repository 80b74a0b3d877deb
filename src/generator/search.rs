//! Randomized backtracking search for cascades
//!
//! # Algorithm
//! 1. Pick a uniformly random start word from the pool
//! 2. At chain length `k`, the next answer must start with the first `k`
//!    letters of the last one, be longer than that prefix, and not be used yet
//! 3. Shuffle those candidates and try at most `sample_width` of them,
//!    depth-first, undoing each choice on backtrack
//! 4. If the start word cannot be extended to `chain_length` words, start over,
//!    up to `max_attempts` times
//!
//! Every step is bounded, so a failed search ends in
//! `max_attempts × sample_width^chain_length` work at worst.

use super::pool::{MIN_POOL_SIZE, WordPool};
use crate::core::{CHAIN_LENGTH, Puzzle, WordData, is_valid_prefix_chain, required_prefix};
use crate::dictionary::Dictionary;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

/// Bounds for the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of words in a finished chain
    pub chain_length: usize,
    /// Random start words to try before giving up
    pub max_attempts: usize,
    /// Shuffled candidates tried at each level before backtracking
    pub sample_width: usize,
    /// Smaller pools are rejected without searching
    pub min_pool: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            chain_length: CHAIN_LENGTH,
            max_attempts: 1000,
            sample_width: 20,
            min_pool: MIN_POOL_SIZE,
        }
    }
}

/// Cascade generator over a word pool
///
/// The random source is injected so tests and benchmarks can seed it.
pub struct CascadeSearch<'a, R: Rng> {
    pool: &'a WordPool,
    dictionary: &'a Dictionary,
    config: SearchConfig,
    rng: R,
}

impl<'a, R: Rng> CascadeSearch<'a, R> {
    /// Create a search with the default bounds
    ///
    /// Clues are looked up in `dictionary`; pool words without a clue are
    /// never placed in a chain.
    pub fn new(pool: &'a WordPool, dictionary: &'a Dictionary, rng: R) -> Self {
        Self {
            pool,
            dictionary,
            config: SearchConfig::default(),
            rng,
        }
    }

    /// Replace the search bounds
    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for a chain and wrap it in a puzzle
    ///
    /// Returns `None` when no cascade was found within the attempt budget.
    pub fn generate(&mut self, id: u32, date: NaiveDate) -> Option<Puzzle> {
        let words = self.find_chain()?;
        Puzzle::new(id, date, words).ok()
    }

    /// Search for a chain of `chain_length` words
    ///
    /// Returns `None` if the pool is smaller than `min_pool` or no start word
    /// could be extended within `max_attempts`.
    pub fn find_chain(&mut self) -> Option<Vec<WordData>> {
        let pool = self.pool;
        let SearchConfig {
            chain_length,
            max_attempts,
            min_pool,
            ..
        } = self.config;

        if chain_length == 0 || pool.len() < min_pool {
            debug!(size = pool.len(), min_pool, "pool too small to search");
            return None;
        }

        for attempt in 1..=max_attempts {
            let start = pool.words().choose(&mut self.rng)?;
            let Some(first) = self.word_data(start) else {
                continue;
            };

            let mut chain = vec![first];
            let mut used = FxHashSet::default();
            used.insert(start.as_str());

            if self.extend(&mut chain, &mut used) {
                debug_assert!(is_valid_prefix_chain(
                    &chain.iter().map(WordData::answer).collect::<Vec<_>>()
                ));
                debug!(attempt, start = %start, "found cascade");
                return Some(chain);
            }
        }

        info!(max_attempts, "no cascade found within attempt budget");
        None
    }

    /// Depth-first extension of `chain`; leaves `chain` and `used` unchanged on failure
    fn extend(&mut self, chain: &mut Vec<WordData>, used: &mut FxHashSet<&'a str>) -> bool {
        let position = chain.len();
        if position >= self.config.chain_length {
            return true;
        }

        let prefix = required_prefix(chain[position - 1].answer(), position).to_owned();
        let pool = self.pool;
        let mut candidates: Vec<&'a String> = pool
            .with_prefix(&prefix)
            .iter()
            .filter(|w| w.len() > prefix.len() && !used.contains(w.as_str()))
            .collect();

        candidates.shuffle(&mut self.rng);
        candidates.truncate(self.config.sample_width);

        for candidate in candidates {
            let Some(word) = self.word_data(candidate) else {
                continue;
            };

            used.insert(candidate.as_str());
            chain.push(word);

            if self.extend(chain, used) {
                return true;
            }

            chain.pop();
            used.remove(candidate.as_str());
        }

        false
    }

    fn word_data(&self, answer: &str) -> Option<WordData> {
        let clue = self.dictionary.clue(answer)?;
        WordData::new(clue, answer).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::FrequencyIndex;
    use crate::generator::{Difficulty, select_pool};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ladder() -> Dictionary {
        Dictionary::from_pairs([
            ("sharp", "Keen"),
            ("stair", "Step"),
            ("stand", "Tolerate"),
            ("stark", "Bleak"),
            ("start", "Begin"),
        ])
    }

    fn answers(chain: &[WordData]) -> Vec<&str> {
        chain.iter().map(WordData::answer).collect()
    }

    #[test]
    fn finds_chain_in_minimal_pool() {
        let dictionary = ladder();
        let pool = WordPool::new(dictionary.words());
        let mut search = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(7));

        let chain = search.find_chain().expect("ladder has a cascade");
        assert_eq!(chain.len(), CHAIN_LENGTH);
        assert!(is_valid_prefix_chain(&answers(&chain)));
        assert_eq!(chain[0].clue(), dictionary.clue(chain[0].answer()).unwrap());
    }

    #[test]
    fn chain_never_repeats_a_word() {
        let dictionary = ladder();
        let pool = WordPool::new(dictionary.words());

        for seed in 0..20 {
            let mut search = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(seed));
            let chain = search.find_chain().unwrap();
            let unique: FxHashSet<&str> = chain.iter().map(WordData::answer).collect();
            assert_eq!(unique.len(), chain.len(), "seed {seed} repeated a word");
        }
    }

    #[test]
    fn pool_below_minimum_returns_none() {
        let dictionary = Dictionary::from_pairs([
            ("stair", "Step"),
            ("stand", "Tolerate"),
            ("stark", "Bleak"),
            ("start", "Begin"),
        ]);
        let pool = WordPool::new(dictionary.words());
        let mut search = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(1));
        assert_eq!(search.find_chain(), None);
    }

    #[test]
    fn impossible_pool_exhausts_budget() {
        // No two words share a first letter, so nothing extends past one word
        let dictionary = Dictionary::from_pairs([
            ("apple", "a"),
            ("bread", "b"),
            ("cider", "c"),
            ("dough", "d"),
            ("eagle", "e"),
            ("flute", "f"),
        ]);
        let pool = WordPool::new(dictionary.words());
        let config = SearchConfig {
            max_attempts: 50,
            ..SearchConfig::default()
        };
        let mut search =
            CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(3)).with_config(config);
        assert_eq!(search.find_chain(), None);
    }

    #[test]
    fn words_without_clues_are_skipped() {
        let dictionary = ladder();
        let pool = WordPool::new(["sharp", "stair", "stand", "stark", "start", "stardom"]);
        for seed in 0..10 {
            let mut search = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(seed));
            let chain = search.find_chain().unwrap();
            assert!(chain.iter().all(|w| w.answer() != "STARDOM"));
        }
    }

    #[test]
    fn custom_chain_length() {
        let dictionary = ladder();
        let pool = WordPool::new(dictionary.words());
        let config = SearchConfig {
            chain_length: 3,
            ..SearchConfig::default()
        };
        let mut search =
            CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(11)).with_config(config);
        let chain = search.find_chain().unwrap();
        assert_eq!(chain.len(), 3);
        assert!(is_valid_prefix_chain(&answers(&chain)));
    }

    #[test]
    fn same_seed_same_puzzle() {
        let dictionary = Dictionary::embedded();
        let pool = select_pool(&dictionary, &FrequencyIndex::embedded(), Difficulty::Hard).unwrap();
        let date: NaiveDate = "2026-10-17".parse().unwrap();

        let first = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(42)).generate(4, date);
        let second = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(42)).generate(4, date);
        assert_eq!(first, second);
    }

    #[test]
    fn generated_puzzles_satisfy_cascade() {
        let dictionary = Dictionary::embedded();
        let frequency = FrequencyIndex::embedded();
        let date: NaiveDate = "2026-10-17".parse().unwrap();

        for difficulty in Difficulty::ALL {
            let pool = select_pool(&dictionary, &frequency, difficulty).unwrap();
            for seed in 0..5 {
                let mut search = CascadeSearch::new(&pool, &dictionary, StdRng::seed_from_u64(seed));
                let puzzle = search
                    .generate(1, date)
                    .unwrap_or_else(|| panic!("{difficulty} seed {seed} found nothing"));
                assert!(is_valid_prefix_chain(&puzzle.answers()));
                for word in puzzle.words() {
                    assert!(pool.contains(word.answer()));
                }
            }
        }
    }
}
