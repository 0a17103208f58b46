//! Main engine that orchestrates line mutations
//!
//! Every operation takes the current document and returns a new one. A
//! line's change state is always recomputed from its `original` text against
//! the new `modified` text, so the edit history never matters.

use tracing::{debug, info, trace};

use crate::algorithm::DiffAlgorithm as DiffAlgoTrait;
use crate::change::WordChange;
use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::diff::{diff_text, DiffRun};
use crate::document::{Document, LyricLine};
use crate::error::Result;
use crate::marker::{contains_marker, marker_run, DELETION_MARKER};
use crate::merge::merge_adjacent_deletions;
use crate::metrics::count_changes;
use crate::normalizers::{Normalizer, WhitespaceNormalizer};
use crate::notify::{Notifier, NullNotifier};
use crate::pipeline::TextPipeline;
use crate::pricing::Quote;
use crate::render::MarkedTextRenderer;
use crate::replace::{should_ignore_line, Replacer};
use crate::script::Granularity;
use crate::tokenizers::{count_words, is_punctuation_only};

/// Result of a replace-all pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub document: Document,
    /// Replacements made across all lines and both passes
    pub replacements: usize,
    pub lines_changed: usize,
}

impl ReplaceOutcome {
    fn unchanged(document: &Document) -> Self {
        Self {
            document: document.clone(),
            replacements: 0,
            lines_changed: 0,
        }
    }
}

/// The lyric change-tracking engine
pub struct LyricEngine {
    config: EngineConfig,
    algorithm: Box<dyn DiffAlgoTrait>,
    renderer: MarkedTextRenderer,
    sanitizer: TextPipeline,
    whitespace: WhitespaceNormalizer,
}

impl Default for LyricEngine {
    fn default() -> Self {
        Self::default_config()
    }
}

impl LyricEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            algorithm: config.algorithm.build(),
            renderer: MarkedTextRenderer::new(config.highlight_class.clone()),
            sanitizer: TextPipeline::sanitizer(),
            whitespace: WhitespaceNormalizer::new(),
            config,
        }
    }

    /// Create an engine with the default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn algorithm(&self) -> &dyn DiffAlgoTrait {
        self.algorithm.as_ref()
    }

    // ========================================================================
    // Diff plumbing
    // ========================================================================

    /// Raw diff runs at the granularity of the pair.
    pub fn diff<'a>(&self, original: &'a str, modified: &'a str) -> Vec<DiffRun<'a>> {
        let granularity = Granularity::detect(original, modified);
        diff_text(self.algorithm(), original, modified, granularity)
    }

    /// Unmerged word changes between `original` and `modified`.
    pub fn classify(&self, original: &str, modified: &str) -> Vec<WordChange> {
        let granularity = Granularity::detect(original, modified);
        classify(self.algorithm(), original, modified, granularity)
    }

    pub fn render(&self, original: &str, modified: &str, changes: &[WordChange]) -> String {
        let granularity = Granularity::detect(original, modified);
        self.renderer
            .render(self.algorithm(), original, modified, changes, granularity)
    }

    /// Changes and marked text for `modified` against `original`.
    ///
    /// Text carrying deletion markers is aligned token by token against the
    /// original and treated as word granular; any other text is classified,
    /// merged (word-granular lines only) and rendered.
    pub fn recompute(&self, original: &str, modified: &str) -> (Vec<WordChange>, String) {
        let (changes, granularity) = if contains_marker(modified) {
            (align_marker_tokens(original, modified), Granularity::WordGranular)
        } else {
            let granularity = Granularity::detect(original, modified);
            (self.classify_merged(original, modified, granularity), granularity)
        };
        let marked_text = self
            .renderer
            .render(self.algorithm(), original, modified, &changes, granularity);
        (changes, marked_text)
    }

    fn classify_merged(
        &self,
        original: &str,
        modified: &str,
        granularity: Granularity,
    ) -> Vec<WordChange> {
        let changes = classify(self.algorithm(), original, modified, granularity);
        match granularity {
            Granularity::WordGranular => merge_adjacent_deletions(&changes),
            Granularity::CharGranular => changes,
        }
    }

    // ========================================================================
    // Line mutations
    // ========================================================================

    /// Replace the text of line `id` with the user's input.
    ///
    /// Markup and marker glyphs are stripped from the input first. Blank
    /// input clears the line word by word. Unknown ids are ignored.
    pub fn edit_line(&self, document: &Document, id: usize, raw_text: &str) -> Document {
        if document.line(id).is_none() {
            debug!(id, "edit ignored: no such line");
            return document.clone();
        }
        document.map_line(id, |line| self.apply_edit(line, raw_text))
    }

    fn apply_edit(&self, line: &LyricLine, raw_text: &str) -> LyricLine {
        let line = self.rebuild_line(line, &self.sanitizer.process(raw_text));
        debug!(
            id = line.id,
            changed = count_changes(&line.word_changes, line.granularity()),
            "line edited"
        );
        line
    }

    /// Canonical state of `line` holding `text`. Edits and replacements both
    /// land here, so the same final text always yields the same line.
    ///
    /// Blank text clears the line: one explicit deletion per original word.
    /// Text that lost words and ends in bare punctuation gets a marker in
    /// front of that punctuation.
    fn rebuild_line(&self, line: &LyricLine, text: &str) -> LyricLine {
        let original = self.plain_original(&line.original);
        let text = self.whitespace.normalize(text);

        let text = if text.is_empty() {
            marker_run(original.split_whitespace().count())
        } else if !contains_marker(&text)
            && Granularity::detect(&original, &text) == Granularity::WordGranular
            && count_words(&text) < count_words(&original)
        {
            insert_trailing_marker(&text)
        } else {
            text
        };

        let (mut changes, marked_text) = self.recompute(&original, &text);
        carry_transformations(&line.word_changes, &mut changes);

        LyricLine {
            id: line.id,
            original: line.original.clone(),
            modified: text,
            marked_text,
            word_changes: changes,
        }
    }

    fn plain_original(&self, original: &str) -> String {
        self.whitespace.normalize(&self.sanitizer.process(original))
    }

    /// Revert line `id`. Its changes become one unchanged entry per word,
    /// unlike `reset_all`, which empties them.
    pub fn reset_line(&self, document: &Document, id: usize) -> Document {
        if document.line(id).is_none() {
            debug!(id, "reset ignored: no such line");
            return document.clone();
        }
        document.map_line(id, |line| LyricLine {
            id: line.id,
            original: line.original.clone(),
            modified: line.original.clone(),
            marked_text: line.original.clone(),
            word_changes: line
                .original
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| WordChange::unchanged(word, i, i))
                .collect(),
        })
    }

    pub fn reset_all(&self, document: &Document) -> Document {
        Document::new(
            document
                .iter()
                .map(|line| LyricLine::new(line.id, line.original.clone()))
                .collect(),
        )
    }

    /// Replace `term` with `replacement` on every line that is not an
    /// annotation. Notices go to `notifier` when one is given.
    pub fn replace_all(
        &self,
        document: &Document,
        term: &str,
        replacement: &str,
        notifier: Option<&dyn Notifier>,
    ) -> ReplaceOutcome {
        let notifier = notifier.unwrap_or(&NullNotifier);

        let replacer = match Replacer::new(term, replacement) {
            Ok(replacer) => replacer,
            Err(err) => {
                debug!(error = %err, "replace rejected");
                notifier.error("Please enter a search term");
                return ReplaceOutcome::unchanged(document);
            }
        };

        let outcome = self.replace_with(document, &replacer);
        if outcome.replacements == 0 {
            notifier.info(&format!("No matches found for \"{}\"", replacer.term().literal));
        } else {
            notifier.success(&format!(
                "Replaced {} occurrence{} of \"{}\"",
                outcome.replacements,
                if outcome.replacements == 1 { "" } else { "s" },
                replacer.term().literal
            ));
        }
        outcome
    }

    /// Like `replace_all`, but an empty term is an error instead of a notice.
    pub fn try_replace_all(
        &self,
        document: &Document,
        term: &str,
        replacement: &str,
    ) -> Result<ReplaceOutcome> {
        let replacer = Replacer::new(term, replacement)?;
        Ok(self.replace_with(document, &replacer))
    }

    fn replace_with(&self, document: &Document, replacer: &Replacer) -> ReplaceOutcome {
        let mut replacements = 0;
        let mut lines_changed = 0;

        let lines = document
            .iter()
            .map(|line| {
                if should_ignore_line(&line.modified) {
                    trace!(id = line.id, "annotation line skipped");
                    return line.clone();
                }

                let replaced = replacer.apply(&line.modified);
                if replaced.count == 0 {
                    return line.clone();
                }
                replacements += replaced.count;
                lines_changed += 1;

                let mut rebuilt = self.rebuild_line(line, &replaced.text);
                mark_transformations(&mut rebuilt.word_changes, replacer.replacement());

                trace!(id = line.id, count = replaced.count, "line replaced");
                rebuilt
            })
            .collect();

        info!(
            term = %replacer.term().literal,
            replacements,
            lines_changed,
            "replace all finished"
        );

        ReplaceOutcome {
            document: Document::new(lines),
            replacements,
            lines_changed,
        }
    }

    // ========================================================================
    // Snapshots and pricing
    // ========================================================================

    /// Rebuild a document from exported lyrics. Lines pair up by position;
    /// a missing line on either side is empty.
    pub fn reconstruct_from_checkout(&self, original_lyrics: &str, modified_lyrics: &str) -> Document {
        let originals: Vec<&str> = original_lyrics.lines().collect();
        let modifieds: Vec<&str> = modified_lyrics.lines().collect();
        let count = originals.len().max(modifieds.len());

        let lines = (0..count)
            .map(|i| {
                let original = originals.get(i).map_or("", |s| s.trim());
                let modified = modifieds.get(i).map_or("", |s| s.trim());
                let (word_changes, marked_text) =
                    self.recompute(&self.plain_original(original), modified);
                LyricLine {
                    id: i + 1,
                    original: original.to_string(),
                    modified: modified.to_string(),
                    marked_text,
                    word_changes,
                }
            })
            .collect();

        Document::new(lines)
    }

    pub fn quote(&self, document: &Document) -> Quote {
        self.config.pricing.quote(&document.lines)
    }
}

/// When the edit has fewer words than the original and ends with a bare
/// punctuation token, put a marker in front of it: `"Hi, !"` becomes
/// `"Hi, 🗙!"`.
fn insert_trailing_marker(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some((last, rest)) = tokens.split_last() else {
        return text.to_string();
    };
    if !is_punctuation_only(last) {
        return text.to_string();
    }

    let mut marked = rest.join(" ");
    if !marked.is_empty() {
        marked.push(' ');
    }
    marked.push(DELETION_MARKER);
    marked.push_str(last);
    marked
}

/// Positional alignment for text carrying markers: each marker token deletes
/// the original word at the same position, every other position is taken
/// as unchanged.
fn align_marker_tokens(original: &str, text: &str) -> Vec<WordChange> {
    let original_tokens: Vec<&str> = original.split_whitespace().collect();

    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            let original_word = original_tokens.get(i).copied().unwrap_or_default();
            if contains_marker(token) {
                WordChange::explicit_deletion(original_word, token, i)
            } else {
                let original_word = if original_word.is_empty() { token } else { original_word };
                WordChange {
                    original_word: original_word.to_string(),
                    new_word: token.to_string(),
                    original_index: Some(i),
                    new_index: Some(i),
                    ..Default::default()
                }
            }
        })
        .collect()
}

fn carry_transformations(previous: &[WordChange], changes: &mut [WordChange]) {
    for change in changes.iter_mut().filter(|c| c.has_changed) {
        if previous
            .iter()
            .any(|p| p.is_transformation && p.original_word == change.original_word)
        {
            change.is_transformation = true;
        }
    }
}

fn mark_transformations(changes: &mut [WordChange], replacement: &str) {
    let needle = replacement.trim().to_lowercase();
    if needle.is_empty() {
        return;
    }
    for change in changes
        .iter_mut()
        .filter(|c| c.has_changed && (c.is_substitution() || c.is_addition()))
    {
        if change.new_word.to_lowercase().contains(&needle) {
            change.is_transformation = true;
        }
    }
}
