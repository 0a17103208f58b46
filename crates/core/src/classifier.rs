//! Change classification
//!
//! Turns diff runs into a flat, ordered list of `WordChange` records.
//! Consecutive removed and added runs are grouped until the next equal run:
//! both sides present make one substitution, a lone side yields one record
//! per unit. Adjacent deletions are left separate here; see `merge`.

use crate::algorithm::DiffAlgorithm;
use crate::change::WordChange;
use crate::diff::{diff_text, EditType};
use crate::script::Granularity;
use crate::tokenizers::{is_punctuation_only, strip_basic_punctuation};

/// Classify the differences between `original` and `modified`.
pub fn classify(
    algorithm: &dyn DiffAlgorithm,
    original: &str,
    modified: &str,
    granularity: Granularity,
) -> Vec<WordChange> {
    let runs = diff_text(algorithm, original, modified, granularity);
    let mut grouper = Grouper::new(granularity);

    for run in &runs {
        match run.edit_type {
            EditType::Delete => grouper.removed.extend(run.tokens.iter().copied()),
            EditType::Insert => grouper.added.extend(run.tokens.iter().copied()),
            EditType::Equal => {
                grouper.flush();
                for token in &run.tokens {
                    grouper.push_unchanged(token);
                }
            }
        }
    }
    grouper.flush();

    let mut changes = grouper.changes;
    if granularity.is_char_granular() {
        // Keyed on the original index when present, else the new index, so
        // an insertion sorts among original-side records by its new-side
        // position. Not strict document order; counts and rendering only
        // read kinds and words. Stable: equal keys keep scan order.
        changes.sort_by_key(WordChange::position);
    }
    changes
}

struct Grouper<'a> {
    granularity: Granularity,
    removed: Vec<&'a str>,
    added: Vec<&'a str>,
    original_index: usize,
    new_index: usize,
    changes: Vec<WordChange>,
}

impl<'a> Grouper<'a> {
    fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            removed: Vec::new(),
            added: Vec::new(),
            original_index: 0,
            new_index: 0,
            changes: Vec::new(),
        }
    }

    fn push_unchanged(&mut self, token: &str) {
        self.changes
            .push(WordChange::unchanged(token, self.original_index, self.new_index));
        self.original_index += 1;
        self.new_index += 1;
    }

    fn flush(&mut self) {
        let removed = std::mem::take(&mut self.removed);
        let added = std::mem::take(&mut self.added);

        match (removed.is_empty(), added.is_empty()) {
            (false, false) => {
                let joiner = self.granularity.joiner();
                let original_word = removed.join(joiner);
                let new_word = added.join(joiner);
                let has_changed =
                    strip_basic_punctuation(&original_word) != strip_basic_punctuation(&new_word);

                self.changes.push(WordChange::substitution(
                    original_word,
                    new_word,
                    self.original_index,
                    self.new_index,
                    has_changed,
                ));
                self.original_index += removed.len();
                self.new_index += added.len();
            }
            (false, true) => {
                for token in removed {
                    self.changes.push(WordChange::deletion(
                        token,
                        self.original_index,
                        !is_punctuation_only(token),
                    ));
                    self.original_index += 1;
                }
            }
            (true, false) => {
                for token in added {
                    self.changes.push(WordChange::addition(
                        token,
                        self.new_index,
                        !is_punctuation_only(token),
                    ));
                    self.new_index += 1;
                }
            }
            (true, true) => {}
        }
    }
}
