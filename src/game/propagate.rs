//! Cross-row letter propagation
//!
//! In a valid cascade rows `a` and `b` agree on their first `min(a, b) + 1`
//! letters. Whenever one row's letters are known to be correct, those shared
//! letters can be copied into every other row. Both word auto-fill and
//! priority hints go through `fill_shared`.

use super::AnswerMatrix;
use crate::core::{WordData, shared_prefix_len};
use std::ops::Range;

/// Copy `source`'s correct letters over `columns` into every row that shares them
///
/// For each other row the span written is `columns ∩ [0, shared)` where
/// `shared` is the length of the prefix the two rows have in common. A row is
/// skipped when the span is empty, when its own answer disagrees with the
/// source over the span, or when it already holds those letters.
///
/// With `scrub`, letters past the shared prefix that disagree with the row's
/// own answer are cleared too. Correct letters are never cleared.
///
/// Returns the rows that changed.
pub fn fill_shared(
    matrix: &mut AnswerMatrix,
    words: &[WordData],
    source: usize,
    columns: Range<usize>,
    scrub: bool,
) -> Vec<usize> {
    let Some(source_word) = words.get(source) else {
        return Vec::new();
    };
    let source_answer = source_word.answer().as_bytes();

    let mut changed = Vec::new();
    for (row, word) in words.iter().enumerate() {
        if row == source {
            continue;
        }

        let answer = word.answer().as_bytes();
        let shared = shared_prefix_len(source, row)
            .min(source_answer.len())
            .min(answer.len());
        let span = columns.start..columns.end.min(shared);
        if span.is_empty() {
            continue;
        }

        let letters = &source_answer[span.clone()];
        if &answer[span.clone()] != letters || matrix.row_holds(row, span.clone(), letters) {
            continue;
        }

        for (column, &letter) in span.zip(letters) {
            matrix.set(row, column, Some(letter));
        }

        if scrub {
            for (column, &expected) in answer.iter().enumerate().skip(shared) {
                if matrix.cell(row, column).is_some_and(|cell| cell != expected) {
                    matrix.set(row, column, None);
                }
            }
        }

        changed.push(row);
    }

    changed
}
