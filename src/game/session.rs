//! Per-puzzle game state and its persisted form
//!
//! A `GameSession` is what the engine mutates; a `SessionRecord` is what goes
//! into the store. Restoring goes through `GameSession::from_record`, which
//! checks the record against the puzzle and re-derives everything derivable.

use super::hint::MAX_HINTS;
use super::AnswerMatrix;
use crate::core::{Puzzle, WordData};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Solved,
    GivenUp,
}

impl GameStatus {
    #[inline]
    #[must_use]
    pub const fn is_complete(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Mutable state of one puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(super) matrix: AnswerMatrix,
    pub(super) validated: Vec<bool>,
    pub(super) status: GameStatus,
    pub(super) start_ms: i64,
    pub(super) completion_ms: Option<u64>,
    pub(super) hints_used: u8,
    pub(super) priority_hint_used: bool,
}

impl GameSession {
    /// A blank session started at `start_ms`
    #[must_use]
    pub fn fresh(words: &[WordData], start_ms: i64) -> Self {
        Self {
            matrix: AnswerMatrix::empty_for(words),
            validated: vec![false; words.len()],
            status: GameStatus::InProgress,
            start_ms,
            completion_ms: None,
            hints_used: 0,
            priority_hint_used: false,
        }
    }

    #[must_use]
    pub const fn matrix(&self) -> &AnswerMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn validated(&self) -> &[bool] {
        &self.validated
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// Frozen solve time, once complete
    #[must_use]
    pub const fn completion_ms(&self) -> Option<u64> {
        self.completion_ms
    }

    #[must_use]
    pub const fn hints_used(&self) -> u8 {
        self.hints_used
    }

    #[must_use]
    pub const fn priority_hint_used(&self) -> bool {
        self.priority_hint_used
    }

    /// Snapshot for the store
    #[must_use]
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            user_answers: self.matrix.to_strings(),
            validated_answers: self.validated.clone(),
            game_complete: self.status.is_complete(),
            game_given_up: self.status == GameStatus::GivenUp,
            start_time: self.start_ms,
            completion_time: self.completion_ms,
            hints_used: self.hints_used,
            priority_hint_used: self.priority_hint_used,
        }
    }

    /// Rebuild a session from a stored record
    ///
    /// The validation flags are recomputed from the restored letters rather
    /// than trusted. `now_ms` bounds the start time.
    ///
    /// # Errors
    /// Returns `RestoreError` if the record does not fit `puzzle` or its start
    /// time lies before the epoch or after `now_ms`.
    pub fn from_record(
        record: &SessionRecord,
        puzzle: &Puzzle,
        now_ms: i64,
    ) -> Result<Self, RestoreError> {
        let words = puzzle.words();

        if !(0..=now_ms).contains(&record.start_time) {
            return Err(RestoreError::StartTime {
                start: record.start_time,
            });
        }

        if record.user_answers.len() != words.len() {
            return Err(RestoreError::RowCount {
                expected: words.len(),
                actual: record.user_answers.len(),
            });
        }
        if record.validated_answers.len() != words.len() {
            return Err(RestoreError::ValidationLength {
                expected: words.len(),
                actual: record.validated_answers.len(),
            });
        }

        let rows = record
            .user_answers
            .iter()
            .zip(words)
            .enumerate()
            .map(|(row, (cells, word))| parse_row(row, cells, word.length()))
            .collect::<Result<Vec<_>, _>>()?;
        let matrix = AnswerMatrix::from_rows(rows);
        let validated = matrix.validation(words);

        let status = match (record.game_complete, record.game_given_up) {
            (false, false) => GameStatus::InProgress,
            (true, false) => GameStatus::Solved,
            (true, true) => GameStatus::GivenUp,
            (false, true) => return Err(RestoreError::GivenUpNotComplete),
        };

        if status.is_complete() {
            if validated.iter().any(|&v| !v) {
                return Err(RestoreError::CompleteButUnsolved);
            }
            if record.completion_time.is_none() {
                return Err(RestoreError::MissingCompletionTime);
            }
        }

        if record.hints_used > MAX_HINTS {
            return Err(RestoreError::TooManyHints {
                used: record.hints_used,
            });
        }

        Ok(Self {
            matrix,
            validated,
            status,
            start_ms: record.start_time,
            completion_ms: record.completion_time.filter(|_| status.is_complete()),
            hints_used: record.hints_used,
            priority_hint_used: record.priority_hint_used,
        })
    }
}

fn parse_row(row: usize, cells: &[String], length: usize) -> Result<Vec<Option<u8>>, RestoreError> {
    if cells.len() != length {
        return Err(RestoreError::RowLength {
            row,
            expected: length,
            actual: cells.len(),
        });
    }

    cells
        .iter()
        .enumerate()
        .map(|(column, cell)| match cell.as_bytes() {
            [] => Ok(None),
            [b] if b.is_ascii_alphabetic() => Ok(Some(b.to_ascii_uppercase())),
            _ => Err(RestoreError::InvalidCell { row, column }),
        })
        .collect()
}

/// Persisted session, one per puzzle id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_answers: Vec<Vec<String>>,
    pub validated_answers: Vec<bool>,
    pub game_complete: bool,
    pub game_given_up: bool,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Milliseconds from start to completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<u64>,
    #[serde(default)]
    pub hints_used: u8,
    #[serde(default)]
    pub priority_hint_used: bool,
}

/// Store key for the session of puzzle `id`
#[must_use]
pub fn session_key(id: u32) -> String {
    format!("cascade-game-{id}")
}

/// Reasons a stored session cannot be restored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("expected {expected} rows, found {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell {row}:{column} is not a single letter")]
    InvalidCell { row: usize, column: usize },
    #[error("expected {expected} validation flags, found {actual}")]
    ValidationLength { expected: usize, actual: usize },
    #[error("session is marked given up but not complete")]
    GivenUpNotComplete,
    #[error("session is marked complete but the rows are not all solved")]
    CompleteButUnsolved,
    #[error("complete session has no completion time")]
    MissingCompletionTime,
    #[error("{used} hints used, at most {max} allowed", max = MAX_HINTS)]
    TooManyHints { used: u8 },
    #[error("start time {start} is outside the valid range")]
    StartTime { start: i64 },
}
