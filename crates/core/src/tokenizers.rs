//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and the three splitting strategies the
//! engine needs: whitespace words (word-granular diffing), single characters
//! (CJK diffing) and word/punctuation/whitespace runs (marked-text rendering).

use unicode_categories::UnicodeCategories;

use crate::marker::DELETION_MARKER;
use crate::script::Granularity;

/// A single token borrowed from the tokenized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text
    pub text: &'a str,

    /// Byte offset of the token in the source text
    pub offset: usize,

    /// Token index in the sequence
    pub index: usize,

    pub kind: TokenKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, offset: usize, index: usize, kind: TokenKind) -> Self {
        Self {
            text,
            offset,
            index,
            kind,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

/// Trait for tokenizers that split text into tokens
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`. Tokens borrow from the input.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>>;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Token texts only
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.tokenize(text).into_iter().map(|t| t.text).collect()
    }
}

/// The tokenizer used for diffing a line at the given granularity.
pub fn tokenizer_for(granularity: Granularity) -> &'static dyn Tokenizer {
    match granularity {
        Granularity::CharGranular => &CharacterTokenizer,
        Granularity::WordGranular => &WhitespaceTokenizer,
    }
}

// ============================================================================
// Built-in Tokenizers
// ============================================================================

/// Character-level tokenizer (splits into individual characters)
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterTokenizer;

impl Tokenizer for CharacterTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        text.char_indices()
            .enumerate()
            .map(|(index, (pos, ch))| {
                Token::new(
                    &text[pos..pos + ch.len_utf8()],
                    pos,
                    index,
                    token_kind(ch),
                )
            })
            .collect()
    }

    fn name(&self) -> &str {
        "character"
    }
}

/// Splits on runs of whitespace. Punctuation stays attached to the word it
/// touches, so `"babe,"` is one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (pos, ch) in text.char_indices() {
            match (start, ch.is_whitespace()) {
                (None, false) => start = Some(pos),
                (Some(s), true) => {
                    tokens.push(word_token(text, s, pos, tokens.len()));
                    start = None;
                }
                _ => {}
            }
        }

        if let Some(s) = start {
            tokens.push(word_token(text, s, text.len(), tokens.len()));
        }

        tokens
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

fn word_token(text: &str, start: usize, end: usize, index: usize) -> Token<'_> {
    let slice = &text[start..end];
    let kind = if is_punctuation_only(slice) {
        TokenKind::Punctuation
    } else {
        TokenKind::Word
    };
    Token::new(slice, start, index, kind)
}

/// Splits into maximal runs of word characters, punctuation and whitespace,
/// keeping all three. Concatenating the tokens reproduces the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryTokenizer;

impl Tokenizer for BoundaryTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut current_start = 0;
        let mut current_type: Option<TokenKind> = None;

        for (pos, ch) in text.char_indices() {
            let char_type = token_kind(ch);

            match current_type {
                None => {
                    current_start = pos;
                    current_type = Some(char_type);
                }
                Some(prev) if prev == char_type => {}
                Some(prev) => {
                    tokens.push(Token::new(
                        &text[current_start..pos],
                        current_start,
                        tokens.len(),
                        prev,
                    ));
                    current_start = pos;
                    current_type = Some(char_type);
                }
            }
        }

        if let Some(kind) = current_type {
            tokens.push(Token::new(
                &text[current_start..],
                current_start,
                tokens.len(),
                kind,
            ));
        }

        tokens
    }

    fn name(&self) -> &str {
        "boundary"
    }
}

// ============================================================================
// Character classes
// ============================================================================

/// Punctuation for tokenizing purposes: ASCII punctuation, any Unicode
/// punctuation category, and the deletion marker.
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() || ch.is_punctuation() || ch == DELETION_MARKER
}

fn token_kind(ch: char) -> TokenKind {
    if ch.is_whitespace() {
        TokenKind::Whitespace
    } else if is_punctuation(ch) {
        TokenKind::Punctuation
    } else {
        TokenKind::Word
    }
}

/// True if `text` is non-empty and made only of punctuation.
pub fn is_punctuation_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_punctuation)
}

/// Number of whitespace-delimited tokens that carry at least one
/// non-punctuation character.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| !is_punctuation_only(token))
        .count()
}

/// The characters `[.,!?;:]` used for punctuation-insensitive comparison.
pub fn is_basic_punctuation(ch: char) -> bool {
    matches!(ch, '.' | ',' | '!' | '?' | ';' | ':')
}

/// Removes every `[.,!?;:]` character.
pub fn strip_basic_punctuation(text: &str) -> String {
    text.chars().filter(|&c| !is_basic_punctuation(c)).collect()
}
