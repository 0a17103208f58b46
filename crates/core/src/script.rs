//! Script classification
//!
//! Decides once per line whether it is diffed character by character (CJK)
//! or token by token (whitespace-delimited scripts).

use serde::{Deserialize, Serialize};

/// True iff `text` contains a code point from the CJK Unified Ideographs,
/// CJK Symbols and Punctuation, CJK Compatibility Ideographs or
/// Halfwidth and Fullwidth Forms blocks.
pub fn is_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

pub fn is_cjk_char(ch: char) -> bool {
    matches!(ch,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3000}'..='\u{303F}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FFEF}')
}

/// Diff granularity used consistently for one line across diff, merge,
/// count and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One unit per Unicode scalar value.
    CharGranular,
    /// One unit per maximal run of non-whitespace.
    WordGranular,
}

impl Granularity {
    /// Mixed-script lines are character granular if either side has CJK.
    pub fn detect(original: &str, modified: &str) -> Self {
        if is_cjk(original) || is_cjk(modified) {
            Granularity::CharGranular
        } else {
            Granularity::WordGranular
        }
    }

    pub fn is_char_granular(self) -> bool {
        self == Granularity::CharGranular
    }

    /// Separator used when several units are combined into one record.
    pub fn joiner(self) -> &'static str {
        match self {
            Granularity::CharGranular => "",
            Granularity::WordGranular => " ",
        }
    }
}
