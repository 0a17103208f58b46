//! Search and replace over line text
//!
//! A term with trailing punctuation (`"horny,"`) matches its exact literal
//! occurrences and any case variant of the word followed by that
//! punctuation; each occurrence is replaced once, keeping the punctuation.
//! A bare term replaces every case-insensitive whole-word occurrence and
//! leaves attached punctuation in place. CJK text has no word boundaries and
//! matches as a substring.

use regex::{NoExpand, Regex, RegexBuilder};
use tracing::warn;

use crate::error::{LyricError, Result};
use crate::normalizers::{Normalizer, WhitespaceNormalizer};
use crate::script::is_cjk;
use crate::tokenizers::is_basic_punctuation;

/// A parsed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    /// The term as typed, trimmed.
    pub literal: String,
    /// The term without its trailing `[.,!?;:]` run.
    pub word: String,
    /// The trailing `[.,!?;:]` run, possibly empty.
    pub punctuation: String,
}

impl SearchTerm {
    /// `None` for an empty or whitespace-only term.
    pub fn parse(term: &str) -> Option<Self> {
        let literal = term.trim();
        if literal.is_empty() {
            return None;
        }

        let word = literal.trim_end_matches(is_basic_punctuation);
        Some(Self {
            literal: literal.to_string(),
            word: word.to_string(),
            punctuation: literal[word.len()..].to_string(),
        })
    }

    pub fn has_punctuation(&self) -> bool {
        !self.punctuation.is_empty()
    }
}

/// Result of replacing within one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub text: String,
    pub count: usize,
}

/// Replaces one term in any number of lines.
#[derive(Debug, Clone)]
pub struct Replacer {
    term: SearchTerm,
    replacement: String,
    bounded: Option<Regex>,
    unbounded: Option<Regex>,
}

impl Replacer {
    pub fn new(term: &str, replacement: &str) -> Result<Self> {
        let term = SearchTerm::parse(term).ok_or(LyricError::EmptySearchTerm)?;
        let bounded = build_pattern(&term, true);
        let unbounded = build_pattern(&term, false);

        Ok(Self {
            term,
            replacement: replacement.to_string(),
            bounded,
            unbounded,
        })
    }

    pub fn term(&self) -> &SearchTerm {
        &self.term
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace every occurrence in one scan, so a replacement that contains
    /// the term is never matched again.
    pub fn apply(&self, text: &str) -> Replaced {
        let pattern = if is_cjk(text) || is_cjk(&self.term.word) {
            self.unbounded.as_ref()
        } else {
            self.bounded.as_ref()
        };
        let Some(re) = pattern else {
            return Replaced {
                text: text.to_string(),
                count: 0,
            };
        };

        let count = re.find_iter(text).count();
        if count == 0 {
            return Replaced {
                text: text.to_string(),
                count,
            };
        }

        let with_punct = format!("{}{}", self.replacement, self.term.punctuation);
        let mut text = re.replace_all(text, NoExpand(&with_punct)).into_owned();
        if self.replacement.is_empty() {
            text = WhitespaceNormalizer::new().normalize(&text);
        }

        Replaced { text, count }
    }
}

/// Exact literal first, then the case-insensitive word match; alternation is
/// leftmost-first so a literal hit wins at the same position.
fn build_pattern(term: &SearchTerm, word_boundaries: bool) -> Option<Regex> {
    let mut alternatives = Vec::with_capacity(2);
    if term.has_punctuation() {
        alternatives.push(regex::escape(&term.literal));
    }

    if !term.word.is_empty() {
        let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
        let starts_with_word = term.word.chars().next().is_some_and(is_word_char);
        let ends_with_word = term.word.chars().last().is_some_and(is_word_char);

        let mut word = String::from("(?i:");
        if word_boundaries && starts_with_word {
            word.push_str(r"\b");
        }
        word.push_str(&regex::escape(&term.word));
        if word_boundaries && ends_with_word {
            word.push_str(r"\b");
        }
        word.push_str(&regex::escape(&term.punctuation));
        word.push(')');
        alternatives.push(word);
    }

    if alternatives.is_empty() {
        return None;
    }

    match RegexBuilder::new(&alternatives.join("|")).build() {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(term = %term.literal, error = %err, "search term could not be compiled");
            None
        }
    }
}

/// Lines fully wrapped in one `<>`, `()` or `[]` pair are annotations or
/// ad-libs and are skipped by replace-all.
pub fn should_ignore_line(text: &str) -> bool {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return false;
    };

    let close = match first {
        '<' => '>',
        '(' => ')',
        '[' => ']',
        _ => return false,
    };
    if last != close {
        return false;
    }

    let inner = &trimmed[first.len_utf8()..trimmed.len() - last.len_utf8()];
    !inner.contains(first) && !inner.contains(close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_term() {
        let term = SearchTerm::parse(" horny, ").unwrap();
        assert_eq!(term.literal, "horny,");
        assert_eq!(term.word, "horny");
        assert_eq!(term.punctuation, ",");
        assert!(SearchTerm::parse("   ").is_none());
    }

    #[test]
    fn test_empty_term_rejected() {
        assert!(matches!(Replacer::new("  ", "x"), Err(LyricError::EmptySearchTerm)));
    }

    #[test]
    fn test_whole_word_case_insensitive() {
        let replacer = Replacer::new("hungry", "horny").unwrap();
        let replaced = replacer.apply("Hungry eyes, so hungry, unhungry");

        assert_eq!(replaced.text, "horny eyes, so horny, unhungry");
        assert_eq!(replaced.count, 2);
    }

    #[test]
    fn test_punctuated_term_only_matches_punctuated_occurrences() {
        let replacer = Replacer::new("horny,", "hungry").unwrap();
        let replaced = replacer.apply("I'm horny, so horny");

        assert_eq!(replaced.text, "I'm hungry, so horny");
        assert_eq!(replaced.count, 1);
    }

    #[test]
    fn test_punctuated_term_case_variant() {
        let replacer = Replacer::new("horny,", "hungry").unwrap();
        let replaced = replacer.apply("Horny, horny, HORNY");

        assert_eq!(replaced.text, "hungry, hungry, HORNY");
        assert_eq!(replaced.count, 2);
    }

    #[test]
    fn test_empty_replacement_collapses_spaces() {
        let replacer = Replacer::new("baby", "").unwrap();
        let replaced = replacer.apply("oh baby baby oh");

        assert_eq!(replaced.text, "oh oh");
        assert_eq!(replaced.count, 2);
    }

    #[test]
    fn test_cjk_substring_match() {
        let replacer = Replacer::new("爱", "恨").unwrap();
        let replaced = replacer.apply("我爱你爱我");

        assert_eq!(replaced.text, "我恨你恨我");
        assert_eq!(replaced.count, 2);
    }

    #[test]
    fn test_no_match() {
        let replaced = Replacer::new("zebra", "lion").unwrap().apply("no stripes here");
        assert_eq!(replaced.count, 0);
        assert_eq!(replaced.text, "no stripes here");
    }

    #[test]
    fn test_should_ignore_line() {
        assert!(should_ignore_line("(Chorus)"));
        assert!(should_ignore_line("  [Verse 2] "));
        assert!(should_ignore_line("<ad-lib>"));
        assert!(!should_ignore_line("(ooh) yeah (ah)"));
        assert!(!should_ignore_line("(Chorus]"));
        assert!(!should_ignore_line("hungry (yeah)"));
        assert!(!should_ignore_line("("));
    }

    #[test]
    fn test_replacement_containing_term_is_not_rescanned() {
        let replacer = Replacer::new("baby,", "my baby").unwrap();
        let replaced = replacer.apply("oh baby, yeah");

        assert_eq!(replaced.text, "oh my baby, yeah");
        assert_eq!(replaced.count, 1);

        let replaced = Replacer::new("Baby,", "baby").unwrap().apply("oh Baby, yeah");
        assert_eq!(replaced.text, "oh baby, yeah");
        assert_eq!(replaced.count, 1);
    }
}
