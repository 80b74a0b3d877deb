//! The player's letter grid
//!
//! One row per puzzle word, one cell per answer letter. Cells hold an
//! uppercase ASCII letter or nothing.

use crate::core::WordData;
use std::fmt;
use std::ops::Range;

/// Per-cell player input for a puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerMatrix {
    rows: Vec<Vec<Option<u8>>>,
}

impl AnswerMatrix {
    /// An empty grid shaped after `words`
    #[must_use]
    pub fn empty_for(words: &[WordData]) -> Self {
        Self {
            rows: words.iter().map(|w| vec![None; w.length()]).collect(),
        }
    }

    /// A grid holding every answer
    #[must_use]
    pub fn solved_for(words: &[WordData]) -> Self {
        Self {
            rows: words
                .iter()
                .map(|w| w.answer().bytes().map(Some).collect())
                .collect(),
        }
    }

    pub(crate) const fn from_rows(rows: Vec<Vec<Option<u8>>>) -> Self {
        Self { rows }
    }

    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of row `word`; empty slice when out of range
    #[must_use]
    pub fn row(&self, word: usize) -> &[Option<u8>] {
        self.rows.get(word).map_or(&[], Vec::as_slice)
    }

    /// Letter at a cell, `None` when empty or out of range
    #[inline]
    #[must_use]
    pub fn cell(&self, word: usize, letter: usize) -> Option<u8> {
        self.rows.get(word)?.get(letter).copied().flatten()
    }

    /// Whether the cell exists in the grid
    #[inline]
    #[must_use]
    pub fn has_cell(&self, word: usize, letter: usize) -> bool {
        self.rows.get(word).is_some_and(|row| letter < row.len())
    }

    /// Write a cell; out-of-range coordinates are ignored
    pub(crate) fn set(&mut self, word: usize, letter: usize, value: Option<u8>) {
        if let Some(cell) = self.rows.get_mut(word).and_then(|row| row.get_mut(letter)) {
            *cell = value;
        }
    }

    /// The filled letters of a row joined together, skipping empty cells
    #[must_use]
    pub fn row_text(&self, word: usize) -> String {
        self.row(word)
            .iter()
            .flatten()
            .map(|&b| char::from(b))
            .collect()
    }

    /// All rows as text, in order
    #[must_use]
    pub fn joined(&self) -> Vec<String> {
        (0..self.rows.len()).map(|i| self.row_text(i)).collect()
    }

    /// Whether row `word` spells `answer` exactly
    #[must_use]
    pub fn row_matches(&self, word: usize, answer: &str) -> bool {
        let row = self.row(word);
        row.len() == answer.len()
            && row
                .iter()
                .zip(answer.bytes())
                .all(|(cell, expected)| *cell == Some(expected))
    }

    /// Validation flag per word: true iff the row equals its answer
    #[must_use]
    pub fn validation(&self, words: &[WordData]) -> Vec<bool> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| self.row_matches(i, w.answer()))
            .collect()
    }

    /// Whether `row` already holds `letters` over `span`
    #[must_use]
    pub fn row_holds(&self, row: usize, span: Range<usize>, letters: &[u8]) -> bool {
        let cells = self.row(row);
        span.end <= cells.len()
            && cells[span]
                .iter()
                .zip(letters)
                .all(|(cell, &letter)| *cell == Some(letter))
    }

    /// Cells as one-character strings, empty string for an empty cell
    #[must_use]
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|b| char::from(b).to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Every empty cell as `(word, letter)`
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(word, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_none())
                .map(move |(letter, _)| (word, letter))
        })
    }
}

impl fmt::Display for AnswerMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.map_or('_', char::from))?;
            }
        }
        Ok(())
    }
}
