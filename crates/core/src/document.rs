//! Lyric documents
//!
//! A `Document` is the ordered list of lines of one song. Line ids are
//! assigned 1..N when the document is created and never change.

use serde::{Deserialize, Serialize};

use crate::change::{has_changes, WordChange};
use crate::script::Granularity;

/// One line of the song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    pub id: usize,

    /// Untouched line text, trimmed.
    pub original: String,

    /// Current edited text; equals `original` until edited.
    pub modified: String,

    /// HTML highlighting the differences between `original` and `modified`.
    pub marked_text: String,

    /// Always recomputed from `original` vs `modified`; empty means no diff
    /// was computed.
    #[serde(default)]
    pub word_changes: Vec<WordChange>,
}

impl LyricLine {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        let original = text.into().trim().to_string();
        Self {
            id,
            modified: original.clone(),
            marked_text: original.clone(),
            original,
            word_changes: Vec::new(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        Granularity::detect(&self.original, &self.modified)
    }

    pub fn has_changes(&self) -> bool {
        has_changes(&self.word_changes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub lines: Vec<LyricLine>,
}

impl Document {
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self { lines }
    }

    /// One line per non-blank input line, trimmed, numbered from 1.
    pub fn from_lyrics(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| LyricLine::new(i + 1, line))
            .collect();
        Self { lines }
    }

    pub fn line(&self, id: usize) -> Option<&LyricLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LyricLine> {
        self.lines.iter()
    }

    /// True if any line carries a content change.
    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(LyricLine::has_changes)
    }

    pub fn changed_lines(&self) -> impl Iterator<Item = &LyricLine> {
        self.lines.iter().filter(|line| line.has_changes())
    }

    pub fn original_lyrics(&self) -> String {
        self.join(|line| &line.original)
    }

    pub fn modified_lyrics(&self) -> String {
        self.join(|line| &line.modified)
    }

    fn join<F>(&self, field: F) -> String
    where
        F: Fn(&LyricLine) -> &String,
    {
        self.lines
            .iter()
            .map(|line| field(line).as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Copy of the document with line `id` replaced by `f(line)`.
    /// Unknown ids leave the document as it is.
    pub(crate) fn map_line<F>(&self, id: usize, f: F) -> Document
    where
        F: Fn(&LyricLine) -> LyricLine,
    {
        let lines = self
            .lines
            .iter()
            .map(|line| if line.id == id { f(line) } else { line.clone() })
            .collect();
        Document { lines }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a LyricLine;
    type IntoIter = std::slice::Iter<'a, LyricLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl AsRef<[LyricLine]> for Document {
    fn as_ref(&self) -> &[LyricLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lyrics_drops_blank_lines() {
        let doc = Document::from_lyrics("  First line \n\n   \nSecond line\r\nThird");

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.lines[0].original, "First line");
        assert_eq!(doc.lines[1].id, 2);
        assert_eq!(doc.lines[1].original, "Second line");
        assert_eq!(doc.lines[2].id, 3);
        assert!(doc.lines.iter().all(|l| l.modified == l.original));
        assert!(doc.lines.iter().all(|l| l.word_changes.is_empty()));
    }

    #[test]
    fn test_map_line_unknown_id_is_noop() {
        let doc = Document::from_lyrics("a\nb");
        let same = doc.map_line(42, |line| LyricLine::new(line.id, "changed"));
        assert_eq!(same, doc);

        let changed = doc.map_line(2, |line| LyricLine::new(line.id, "changed"));
        assert_eq!(changed.lines[1].original, "changed");
        assert_eq!(changed.lines[0], doc.lines[0]);
    }

    #[test]
    fn test_serializes_as_array_with_camel_case() {
        let doc = Document::from_lyrics("hello");
        let json = serde_json::to_value(&doc).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["markedText"], "hello");
        assert_eq!(json[0]["wordChanges"], serde_json::json!([]));
    }
}
