//! Text normalizers
//!
//! Provides the `Normalizer` trait and the string transformations used to
//! sanitize edited text, build plain-text summaries and derive the
//! case-insensitive key of a changed word.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::marker::DELETION_MARKER;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid entity regex")
});

/// Trait for text normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize the input text
    fn normalize(&self, input: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Built-in Normalizers
// ============================================================================

/// Removes HTML/markup tags and decodes character entities, leaving the
/// text content a browser would show.
#[derive(Clone)]
pub struct StripMarkup;

impl Normalizer for StripMarkup {
    fn normalize(&self, input: &str) -> String {
        let without_tags = TAG_RE.replace_all(input, "");
        ENTITY_RE
            .replace_all(&without_tags, |caps: &Captures<'_>| {
                decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn name(&self) -> &str {
        "strip_markup"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

fn decode_entity(body: &str) -> Option<String> {
    let decoded = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

/// Removes every deletion marker glyph.
#[derive(Clone)]
pub struct StripDeletionMarker;

impl Normalizer for StripDeletionMarker {
    fn normalize(&self, input: &str) -> String {
        crate::marker::strip_marker(input)
    }

    fn name(&self) -> &str {
        "strip_deletion_marker"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Normalizes whitespace: collapses runs into one space, optionally trims
#[derive(Clone)]
pub struct WhitespaceNormalizer {
    /// Whether to collapse multiple consecutive whitespaces into one
    pub collapse: bool,
    /// Whether to trim leading/trailing whitespace
    pub trim: bool,
}

impl Default for WhitespaceNormalizer {
    fn default() -> Self {
        Self {
            collapse: true,
            trim: true,
        }
    }
}

impl WhitespaceNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, input: &str) -> String {
        let text = if self.trim { input.trim() } else { input };
        if !self.collapse {
            return text.to_string();
        }

        let mut normalized = String::with_capacity(text.len());
        let mut in_whitespace = false;
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    normalized.push(' ');
                }
                in_whitespace = true;
            } else {
                normalized.push(ch);
                in_whitespace = false;
            }
        }
        normalized
    }

    fn name(&self) -> &str {
        "whitespace"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Strips leading and trailing word-wrapping punctuation and the deletion
/// marker: `.,!?;:"'[]{}()-—_`.
#[derive(Clone)]
pub struct TrimPunctuation;

impl TrimPunctuation {
    fn is_trimmed(ch: char) -> bool {
        matches!(
            ch,
            '.' | ',' | '!' | '?' | ';' | ':' | '"' | '\'' | '[' | ']' | '{' | '}' | '(' | ')'
                | '-' | '—' | '_'
        ) || ch == DELETION_MARKER
    }
}

impl Normalizer for TrimPunctuation {
    fn normalize(&self, input: &str) -> String {
        input.trim_matches(Self::is_trimmed).to_string()
    }

    fn name(&self) -> &str {
        "trim_punctuation"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Converts all text to lowercase
#[derive(Clone)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}
