//! Change counting
//!
//! The per-line "words changed" count and the document-wide set of distinct
//! changed words. The latter feeds pricing directly, so both are exact and
//! deterministic.

use std::collections::HashSet;

use crate::change::{ChangeKind, WordChange};
use crate::document::LyricLine;
use crate::marker::DELETION_MARKER;
use crate::merge::merge_adjacent_deletions;
use crate::pipeline::TextPipeline;
use crate::script::Granularity;
use crate::tokenizers::{count_words, strip_basic_punctuation};

/// Canonical number of changed words on one line.
///
/// CJK lines count characters. Other lines count merged changes: a
/// substitution counts the larger side's words, an addition its words, and
/// a deletion counts once however many words it spans.
pub fn count_changed(line: &LyricLine) -> usize {
    let granularity = line.granularity();
    count_changes(&line.word_changes, granularity)
}

pub fn count_changes(changes: &[WordChange], granularity: Granularity) -> usize {
    match granularity {
        Granularity::CharGranular => changes
            .iter()
            .filter(|c| c.has_changed)
            .map(char_weight)
            .sum(),
        Granularity::WordGranular => merge_adjacent_deletions(changes)
            .iter()
            .filter(|c| c.has_changed)
            .map(word_weight)
            .sum(),
    }
}

fn char_weight(change: &WordChange) -> usize {
    let original = change.original_word.chars().count();
    let new = change.new_word.chars().count();
    match change.kind {
        ChangeKind::Deletion => original,
        ChangeKind::Addition => new,
        ChangeKind::Substitution => original.max(new),
        ChangeKind::Unchanged => 0,
    }
}

fn word_weight(change: &WordChange) -> usize {
    match change.kind {
        ChangeKind::Substitution => {
            if strip_basic_punctuation(&change.original_word)
                == strip_basic_punctuation(&change.new_word)
            {
                0
            } else {
                count_words(&change.original_word)
                    .max(count_words(&change.new_word))
                    .max(1)
            }
        }
        ChangeKind::Addition => count_words(&change.new_word).max(1),
        ChangeKind::Deletion => 1,
        ChangeKind::Unchanged => 0,
    }
}

/// Case-insensitive, punctuation-trimmed set of changed words across the
/// whole document, in first-seen order.
///
/// Substituted and added words are collected as additions; deleted words are
/// reported with the marker prefix (`🗙word`) unless the same word was also
/// added somewhere, in which case it counts once as an addition.
pub fn distinct_changed_words(lines: &[LyricLine]) -> Vec<String> {
    let key = TextPipeline::word_key();
    let mut additions = OrderedSet::default();
    let mut deletions = OrderedSet::default();

    for line in lines {
        let changes = match line.granularity() {
            Granularity::CharGranular => line.word_changes.clone(),
            Granularity::WordGranular => merge_adjacent_deletions(&line.word_changes),
        };

        for change in changes.iter().filter(|c| c.has_changed) {
            match change.kind {
                ChangeKind::Deletion => deletions.insert(key.process(&change.original_word)),
                _ => additions.insert(key.process(&change.new_word)),
            }
        }
    }

    let mut words = additions.items.clone();
    for word in deletions.items {
        if !additions.contains(&word) {
            words.push(format!("{}{}", DELETION_MARKER, word));
        }
    }
    words
}

#[derive(Default)]
struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    fn insert(&mut self, word: String) {
        if word.is_empty() || self.seen.contains(&word) {
            return;
        }
        self.seen.insert(word.clone());
        self.items.push(word);
    }

    fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(original: &str, modified: &str, changes: Vec<WordChange>) -> LyricLine {
        LyricLine {
            id: 1,
            original: original.to_string(),
            modified: modified.to_string(),
            marked_text: modified.to_string(),
            word_changes: changes,
        }
    }

    #[test]
    fn test_substitution_counts_larger_side() {
        let l = line(
            "Hello, world!",
            "Hi, planet!",
            vec![WordChange::substitution("Hello, world!", "Hi, planet!", 0, 0, true)],
        );
        assert_eq!(count_changed(&l), 2);
    }

    #[test]
    fn test_punctuation_only_substitution_counts_zero() {
        let changes = vec![WordChange::substitution("babe", "babe!", 0, 0, true)];
        assert_eq!(count_changes(&changes, Granularity::WordGranular), 0);
    }

    #[test]
    fn test_merged_deletion_counts_once() {
        let changes = vec![
            WordChange::deletion("so", 1, true),
            WordChange::deletion("very", 2, true),
            WordChange::deletion("much", 3, true),
        ];
        assert_eq!(count_changes(&changes, Granularity::WordGranular), 1);
    }

    #[test]
    fn test_explicit_deletions_count_each() {
        let changes = vec![
            WordChange::cleared("Word", 0),
            WordChange::cleared("one", 1),
            WordChange::cleared("two", 2),
        ];
        assert_eq!(count_changes(&changes, Granularity::WordGranular), 3);
    }

    #[test]
    fn test_addition_floors_at_one() {
        let changes = vec![WordChange::addition("-", 2, true)];
        assert_eq!(count_changes(&changes, Granularity::WordGranular), 1);
    }

    #[test]
    fn test_cjk_counts_characters() {
        let changes = vec![
            WordChange::unchanged("我", 0, 0),
            WordChange::substitution("爱", "喜欢", 1, 1, true),
            WordChange::addition("们", 4, true),
        ];
        assert_eq!(count_changes(&changes, Granularity::CharGranular), 3);
    }

    #[test]
    fn test_distinct_words_dedupes_case_insensitively() {
        let lines = vec![
            line("easy", "Steady,", vec![WordChange::substitution("easy", "Steady,", 0, 0, true)]),
            line("lazy", "steady", vec![WordChange::substitution("lazy", "steady", 0, 0, true)]),
        ];
        assert_eq!(distinct_changed_words(&lines), vec!["steady"]);
    }

    #[test]
    fn test_deleted_word_readded_elsewhere_counts_once() {
        let lines = vec![
            line("love me", "me", vec![
                WordChange::deletion("love", 0, true),
                WordChange::unchanged("me", 1, 0),
            ]),
            line("hate you", "love you", vec![
                WordChange::substitution("hate", "love", 0, 0, true),
                WordChange::unchanged("you", 1, 1),
            ]),
            line("go away", "go", vec![
                WordChange::unchanged("go", 0, 0),
                WordChange::deletion("away", 1, true),
            ]),
        ];

        assert_eq!(distinct_changed_words(&lines), vec!["love", "🗙away"]);
    }
}
