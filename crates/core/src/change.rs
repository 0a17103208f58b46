//! Classified word changes
//!
//! A `WordChange` is one alignable unit between a line's original text and
//! its current text. Indices are `None` where a side does not apply; on the
//! wire they are written as `-1` to match the application's JSON.

use serde::{Deserialize, Serialize};

use crate::marker::DELETION_MARKER_STR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    #[default]
    Unchanged,
    Substitution,
    Addition,
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordChange {
    pub original_word: String,
    pub new_word: String,

    #[serde(with = "index_or_minus_one")]
    pub original_index: Option<usize>,

    #[serde(with = "index_or_minus_one")]
    pub new_index: Option<usize>,

    /// False for equal units and punctuation-only differences.
    pub has_changed: bool,

    pub kind: ChangeKind,

    /// Set only by "clear the whole line"; such deletions are never merged
    /// with each other.
    #[serde(default)]
    pub is_explicit_deletion: bool,

    /// Provenance flag carried across edits while a change keeps
    /// originating from the same original word.
    #[serde(default)]
    pub is_transformation: bool,
}

impl WordChange {
    pub fn unchanged(word: impl Into<String>, original_index: usize, new_index: usize) -> Self {
        let word = word.into();
        Self {
            original_word: word.clone(),
            new_word: word,
            original_index: Some(original_index),
            new_index: Some(new_index),
            ..Default::default()
        }
    }

    pub fn substitution(
        original_word: impl Into<String>,
        new_word: impl Into<String>,
        original_index: usize,
        new_index: usize,
        has_changed: bool,
    ) -> Self {
        Self {
            original_word: original_word.into(),
            new_word: new_word.into(),
            original_index: Some(original_index),
            new_index: Some(new_index),
            has_changed,
            kind: ChangeKind::Substitution,
            ..Default::default()
        }
    }

    pub fn addition(new_word: impl Into<String>, new_index: usize, has_changed: bool) -> Self {
        Self {
            new_word: new_word.into(),
            new_index: Some(new_index),
            has_changed,
            kind: ChangeKind::Addition,
            ..Default::default()
        }
    }

    pub fn deletion(original_word: impl Into<String>, original_index: usize, has_changed: bool) -> Self {
        Self {
            original_word: original_word.into(),
            original_index: Some(original_index),
            has_changed,
            kind: ChangeKind::Deletion,
            ..Default::default()
        }
    }

    /// A deletion typed as a marker. `new_word` keeps the marker token as it
    /// appears in the modified text, trailing punctuation included.
    pub fn explicit_deletion(
        original_word: impl Into<String>,
        marker_token: impl Into<String>,
        original_index: usize,
    ) -> Self {
        Self {
            original_word: original_word.into(),
            new_word: marker_token.into(),
            original_index: Some(original_index),
            has_changed: true,
            kind: ChangeKind::Deletion,
            is_explicit_deletion: true,
            ..Default::default()
        }
    }

    /// Explicit deletion of a whole-line clear.
    pub fn cleared(original_word: impl Into<String>, original_index: usize) -> Self {
        Self::explicit_deletion(original_word, DELETION_MARKER_STR, original_index)
    }

    pub fn is_substitution(&self) -> bool {
        self.kind == ChangeKind::Substitution
    }

    pub fn is_addition(&self) -> bool {
        self.kind == ChangeKind::Addition
    }

    pub fn is_deletion(&self) -> bool {
        self.kind == ChangeKind::Deletion
    }

    /// Position used to restore document order: original side first.
    pub fn position(&self) -> usize {
        self.original_index.or(self.new_index).unwrap_or(0)
    }
}

/// True if any change in the slice carries content.
pub fn has_changes(changes: &[WordChange]) -> bool {
    changes.iter().any(|c| c.has_changed)
}

mod index_or_minus_one {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_i64(*index as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}
