//! Marked-text rendering
//!
//! Produces the HTML shown for a line: changed spans are wrapped in a
//! highlight `<span>`, deletions show the marker glyph. CJK lines are shown
//! as their plain modified text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::algorithm::DiffAlgorithm;
use crate::change::{ChangeKind, WordChange};
use crate::diff::{diff_tokens, EditType};
use crate::marker::{DELETION_MARKER, DELETION_MARKER_STR};
use crate::script::Granularity;
use crate::tokenizers::{is_punctuation, is_punctuation_only, BoundaryTokenizer, Tokenizer};

static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([.,!?;:])").expect("valid punctuation regex"));

pub const DEFAULT_HIGHLIGHT_CLASS: &str = "text-red-600";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedTextRenderer {
    highlight_class: String,
}

impl Default for MarkedTextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_CLASS)
    }
}

impl MarkedTextRenderer {
    pub fn new(highlight_class: impl Into<String>) -> Self {
        Self {
            highlight_class: highlight_class.into(),
        }
    }

    /// Wrap already-escaped `inner` in a highlight span.
    pub fn highlight(&self, inner: &str) -> String {
        format!(r#"<span class="{}">{}</span>"#, self.highlight_class, inner)
    }

    pub fn marker_span(&self) -> String {
        self.highlight(DELETION_MARKER_STR)
    }

    pub fn render(
        &self,
        algorithm: &dyn DiffAlgorithm,
        original: &str,
        modified: &str,
        changes: &[WordChange],
        granularity: Granularity,
    ) -> String {
        if granularity.is_char_granular() {
            return escape_html(modified);
        }

        if changes.iter().any(|c| c.is_deletion()) {
            self.render_changes(changes)
        } else {
            self.render_boundary_diff(algorithm, original, modified)
        }
    }

    /// One piece per change, joined by spaces.
    fn render_changes(&self, changes: &[WordChange]) -> String {
        let pieces: Vec<String> = changes
            .iter()
            .filter_map(|change| match change.kind {
                ChangeKind::Substitution | ChangeKind::Addition if change.has_changed => {
                    Some(self.highlight(&escape_html(&change.new_word)))
                }
                ChangeKind::Deletion if change.has_changed => Some(format!(
                    "{}{}",
                    self.marker_span(),
                    escape_html(&trailing_punctuation(&change.new_word))
                )),
                ChangeKind::Deletion => None,
                _ => Some(escape_html(&change.new_word)),
            })
            .filter(|piece| !piece.is_empty())
            .collect();

        SPACE_BEFORE_PUNCT_RE
            .replace_all(&pieces.join(" "), "$1")
            .into_owned()
    }

    /// Whitespace-significant diff; inserted runs are highlighted token by
    /// token, removed runs are dropped.
    fn render_boundary_diff(
        &self,
        algorithm: &dyn DiffAlgorithm,
        original: &str,
        modified: &str,
    ) -> String {
        let original_tokens = BoundaryTokenizer.split(original);
        let modified_tokens = BoundaryTokenizer.split(modified);
        let runs = diff_tokens(algorithm, &original_tokens, &modified_tokens);

        let mut output = String::with_capacity(modified.len() * 2);
        for run in &runs {
            match run.edit_type {
                EditType::Equal => output.push_str(&escape_html(&run.value(""))),
                EditType::Delete => {}
                EditType::Insert => {
                    let value = run.value("");
                    if value.trim().is_empty() || is_punctuation_only(value.trim()) {
                        output.push_str(&escape_html(&value));
                        continue;
                    }
                    for token in &run.tokens {
                        if token.trim().is_empty() {
                            output.push_str(token);
                        } else {
                            output.push_str(&self.highlight(&escape_html(token)));
                        }
                    }
                }
            }
        }

        output.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Punctuation carried on a marker token, e.g. `"!"` for `"🗙!"`.
fn trailing_punctuation(marker_token: &str) -> String {
    marker_token
        .chars()
        .filter(|&c| c != DELETION_MARKER && is_punctuation(c))
        .collect()
}

/// Escape `<` and `>` so inserted text cannot break the markup.
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}
