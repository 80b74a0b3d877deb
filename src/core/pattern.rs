//! The cascade pattern
//!
//! Answer `i` must begin with the first `i` letters of answer `i - 1`. Equivalently
//! rows `a` and `b` of a valid cascade agree on their first `min(a, b) + 1`
//! letters, which is what auto-fill and hints rely on.
//!
//! ```text
//! B I C K E R
//! B A M B O O Z L E
//! B A R B A R I C
//! B A R R I S T E R
//! B A R R I C A D E
//! ```

/// The first `position` letters of `previous`, clamped to its length
///
/// This is the prefix the answer at chain position `position` must start with.
///
/// # Examples
/// ```
/// use cascade::core::pattern::required_prefix;
///
/// assert_eq!(required_prefix("BARBARIC", 3), "BAR");
/// assert_eq!(required_prefix("BI", 4), "BI");
/// ```
#[must_use]
pub fn required_prefix(previous: &str, position: usize) -> &str {
    previous
        .char_indices()
        .nth(position)
        .map_or(previous, |(idx, _)| &previous[..idx])
}

/// Number of leading letters rows `a` and `b` share in a valid cascade
#[inline]
#[must_use]
pub fn shared_prefix_len(a: usize, b: usize) -> usize {
    a.min(b) + 1
}

/// Position of the first answer that breaks the cascade, if any
///
/// Empty answers are skipped so a partially filled board is still valid.
pub fn first_broken_link<S: AsRef<str>>(answers: &[S]) -> Option<usize> {
    answers.windows(2).enumerate().find_map(|(i, pair)| {
        let position = i + 1;
        let current = pair[1].as_ref();
        let prefix = required_prefix(pair[0].as_ref(), position);

        (!current.is_empty() && !current.starts_with(prefix)).then_some(position)
    })
}

/// Check the prefix invariant over an ordered sequence of (possibly partial) answers
///
/// # Examples
/// ```
/// use cascade::core::pattern::is_valid_prefix_chain;
///
/// assert!(is_valid_prefix_chain(&["BICKER", "BAMBOOZLE", "BARBARIC"]));
/// assert!(is_valid_prefix_chain(&["BICKER", "", "BARBARIC"]));
/// assert!(!is_valid_prefix_chain(&["BICKER", "SHARP"]));
/// ```
#[must_use]
pub fn is_valid_prefix_chain<S: AsRef<str>>(answers: &[S]) -> bool {
    first_broken_link(answers).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASCADE: [&str; 5] = ["BICKER", "BAMBOOZLE", "BARBARIC", "BARRISTER", "BARRICADE"];

    #[test]
    fn full_cascade_is_valid() {
        assert!(is_valid_prefix_chain(&CASCADE));
        assert_eq!(first_broken_link(&CASCADE), None);
    }

    #[test]
    fn broken_link_is_reported_at_its_position() {
        let answers = ["BICKER", "BAMBOOZLE", "BORROW", "BARRISTER", "BARRICADE"];
        assert!(!is_valid_prefix_chain(&answers));
        assert_eq!(first_broken_link(&answers), Some(2));
    }

    #[test]
    fn empty_answers_are_skipped() {
        assert!(is_valid_prefix_chain(&["BICKER", "", "", "", ""]));
        assert!(is_valid_prefix_chain(&["", "", "", "", ""]));
    }

    #[test]
    fn empty_previous_imposes_nothing() {
        assert!(is_valid_prefix_chain(&["", "ANYTHING"]));
    }

    #[test]
    fn trivial_sequences_are_valid() {
        let empty: [&str; 0] = [];
        assert!(is_valid_prefix_chain(&empty));
        assert!(is_valid_prefix_chain(&["SOLO"]));
    }

    #[test]
    fn prefix_clamps_to_previous_length() {
        assert_eq!(required_prefix("AB", 5), "AB");
        assert_eq!(required_prefix("ABCDEF", 0), "");
        assert!(is_valid_prefix_chain(&["A", "AB", "ABX"]));
    }

    #[test]
    fn validation_is_case_sensitive() {
        assert!(!is_valid_prefix_chain(&["BICKER", "bamboozle"]));
    }

    #[test]
    fn shared_prefix_len_is_symmetric() {
        assert_eq!(shared_prefix_len(0, 4), 1);
        assert_eq!(shared_prefix_len(4, 0), 1);
        assert_eq!(shared_prefix_len(2, 3), 3);
        assert_eq!(shared_prefix_len(3, 3), 4);
    }
}
