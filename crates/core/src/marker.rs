//! The deletion marker glyph
//!
//! `U+1F5D9` (🗙) is reserved: it stands for "a word was removed here" both
//! inside stored `modified` text and in rendered marked text. Lyrics are not
//! expected to contain it. If pasted lyrics do contain the glyph it is passed
//! through untouched by diffing and only stripped by the sanitizer, so such
//! lines behave as if the user had typed an explicit deletion.

/// Reserved deletion marker.
pub const DELETION_MARKER: char = '\u{1F5D9}';

/// The marker as a string slice.
pub const DELETION_MARKER_STR: &str = "\u{1F5D9}";

pub fn contains_marker(text: &str) -> bool {
    text.contains(DELETION_MARKER)
}

pub fn strip_marker(text: &str) -> String {
    text.chars().filter(|&c| c != DELETION_MARKER).collect()
}

/// `count` markers joined by single spaces.
pub fn marker_run(count: usize) -> String {
    vec![DELETION_MARKER_STR; count].join(" ")
}
