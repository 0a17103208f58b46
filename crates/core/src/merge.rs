//! Adjacent-deletion merging
//!
//! Consecutive plain deletions over consecutive original indices collapse
//! into one record, so removing three words in a row counts as one event.
//! Two explicit deletions are never merged with each other: clearing a line
//! must still show one marker per original word.

use crate::change::WordChange;

pub fn merge_adjacent_deletions(changes: &[WordChange]) -> Vec<WordChange> {
    let mut merged: Vec<WordChange> = Vec::with_capacity(changes.len());
    // Original index one past the end of the last merged deletion.
    let mut span_end: Option<usize> = None;

    for change in changes {
        if let Some(last) = merged.last_mut() {
            if can_merge(last, change, span_end) {
                absorb(last, change);
                span_end = span_end.map(|end| end + 1);
                continue;
            }
        }

        span_end = match (change.is_deletion(), change.original_index) {
            (true, Some(index)) => Some(index + 1),
            _ => None,
        };
        merged.push(change.clone());
    }

    merged
}

fn can_merge(last: &WordChange, next: &WordChange, span_end: Option<usize>) -> bool {
    if !last.is_deletion() || !next.is_deletion() {
        return false;
    }
    if last.is_explicit_deletion && next.is_explicit_deletion {
        return false;
    }
    matches!((span_end, next.original_index), (Some(end), Some(index)) if end == index)
}

fn absorb(last: &mut WordChange, next: &WordChange) {
    last.original_word = join_nonempty(&last.original_word, &next.original_word);
    last.new_word = join_nonempty(&last.new_word, &next.new_word);
    last.has_changed |= next.has_changed;
    last.is_explicit_deletion &= next.is_explicit_deletion;
    last.is_transformation |= next.is_transformation;
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_consecutive_deletions() {
        let changes = vec![
            WordChange::unchanged("a", 0, 0),
            WordChange::deletion("b", 1, true),
            WordChange::deletion("c", 2, true),
            WordChange::deletion("d", 3, true),
            WordChange::unchanged("e", 4, 1),
        ];

        let merged = merge_adjacent_deletions(&changes);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].original_word, "b c d");
        assert_eq!(merged[1].original_index, Some(1));
        assert_eq!(merged[1].new_word, "");
    }

    #[test]
    fn test_gap_prevents_merge() {
        let changes = vec![
            WordChange::deletion("b", 1, true),
            WordChange::deletion("d", 3, true),
        ];

        assert_eq!(merge_adjacent_deletions(&changes).len(), 2);
    }

    #[test]
    fn test_explicit_deletions_stay_separate() {
        let changes = vec![
            WordChange::cleared("Word", 0),
            WordChange::cleared("one", 1),
            WordChange::cleared("two", 2),
        ];

        let merged = merge_adjacent_deletions(&changes);

        assert_eq!(merged, changes);
    }

    #[test]
    fn test_explicit_merges_with_plain_deletion() {
        let changes = vec![
            WordChange::deletion("so", 0, true),
            WordChange::cleared("long", 1),
        ];

        let merged = merge_adjacent_deletions(&changes);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].original_word, "so long");
        assert!(!merged[0].is_explicit_deletion);
    }

    #[test]
    fn test_substitutions_are_not_merged() {
        let changes = vec![
            WordChange::substitution("a", "x", 0, 0, true),
            WordChange::deletion("b", 1, true),
        ];

        assert_eq!(merge_adjacent_deletions(&changes).len(), 2);
    }
}
