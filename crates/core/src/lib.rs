//! # LyricDiff Core
//!
//! Change tracking for song lyrics. Each line keeps its original text and
//! the user's current version; every edit recomputes a word-level (or, for
//! CJK lines, character-level) diff between the two, classifies it into
//! substitutions, additions and deletions, and renders highlighted HTML.
//!
//! ## Core Concepts
//!
//! - **Documents**: Ordered lyric lines with stable ids
//! - **Tokenizers**: Word, whitespace-preserving and character splits
//! - **Pipelines**: Chains of normalizers used to sanitize and compare text
//! - **LyricEngine**: Line edits, resets and replace-all as pure functions
//!   from one document to the next
//! - **Metrics**: Per-line change counts and the distinct changed words
//!   that drive pricing
//!
//! ## Example
//!
//! ```rust
//! use lyricdiff_core::{Document, LyricEngine};
//!
//! let engine = LyricEngine::default();
//! let doc = Document::from_lyrics("I take it easy, babe");
//! let doc = engine.edit_line(&doc, 1, "I take it steady, babe");
//!
//! assert!(doc.lines[0].marked_text.contains("steady"));
//! assert_eq!(engine.quote(&doc).price, 45);
//! ```

pub mod algorithm;
pub mod change;
pub mod checkout;
pub mod classifier;
pub mod config;
pub mod diff;
pub mod document;
pub mod engine;
pub mod error;
pub mod marker;
pub mod merge;
pub mod metrics;
pub mod normalizers;
pub mod notify;
pub mod pipeline;
pub mod pricing;
pub mod render;
pub mod replace;
pub mod script;
pub mod tokenizers;

// Re-export main types
pub use change::{ChangeKind, WordChange};
pub use checkout::{CheckoutData, CheckoutMeta};
pub use config::{DiffAlgorithm, EngineConfig};
pub use diff::{DiffOperation, DiffRun, EditType};
pub use document::{Document, LyricLine};
pub use engine::{LyricEngine, ReplaceOutcome};
pub use error::{LyricError, Result};
pub use marker::DELETION_MARKER;
pub use metrics::{count_changed, distinct_changed_words};
pub use notify::{Notifier, NullNotifier, TracingNotifier};
pub use pipeline::TextPipeline;
pub use pricing::{PricingTable, Quote};
pub use script::{is_cjk, Granularity};

/// Edit one line with the default engine.
///
/// # Example
///
/// ```rust
/// use lyricdiff_core::{edit_line, Document};
///
/// let doc = Document::from_lyrics("Word one two");
/// let doc = edit_line(&doc, 1, "");
/// assert_eq!(doc.lines[0].modified, "🗙 🗙 🗙");
/// ```
pub fn edit_line(document: &Document, id: usize, raw_text: &str) -> Document {
    LyricEngine::default().edit_line(document, id, raw_text)
}

pub fn reset_line(document: &Document, id: usize) -> Document {
    LyricEngine::default().reset_line(document, id)
}

pub fn reset_all(document: &Document) -> Document {
    LyricEngine::default().reset_all(document)
}

/// Replace-all with the default engine; notices go to `notifier` if given.
pub fn replace_all(
    document: &Document,
    term: &str,
    replacement: &str,
    notifier: Option<&dyn Notifier>,
) -> ReplaceOutcome {
    LyricEngine::default().replace_all(document, term, replacement, notifier)
}

pub fn reconstruct_from_checkout(original_lyrics: &str, modified_lyrics: &str) -> Document {
    LyricEngine::default().reconstruct_from_checkout(original_lyrics, modified_lyrics)
}
