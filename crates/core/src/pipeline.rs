//! Text normalization pipeline
//!
//! Chains normalizers in order. The engine uses three fixed pipelines:
//! sanitizing user input, producing plain text from marked HTML, and keying
//! changed words for de-duplication.

use crate::normalizers::{
    Lowercase, Normalizer, StripDeletionMarker, StripMarkup, TrimPunctuation,
    WhitespaceNormalizer,
};

/// A pipeline of text normalizers applied in order
#[derive(Default, Clone)]
pub struct TextPipeline {
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TextPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Run every normalizer in order
    pub fn process(&self, input: &str) -> String {
        self.normalizers
            .iter()
            .fold(input.to_string(), |text, normalizer| normalizer.normalize(&text))
    }

    /// Names of the normalizers, in application order
    pub fn names(&self) -> Vec<&str> {
        self.normalizers.iter().map(|n| n.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Markup and deletion markers removed. Whitespace is left alone so the
    /// caller can tell blank input apart.
    pub fn sanitizer() -> Self {
        Self::new()
            .add_normalizer(Box::new(StripMarkup))
            .add_normalizer(Box::new(StripDeletionMarker))
    }

    /// Sanitized, with whitespace collapsed and trimmed.
    pub fn plain_text() -> Self {
        Self::sanitizer().add_normalizer(Box::new(WhitespaceNormalizer::new()))
    }

    /// Key used to de-duplicate changed words across the document.
    pub fn word_key() -> Self {
        Self::new()
            .add_normalizer(Box::new(TrimPunctuation))
            .add_normalizer(Box::new(Lowercase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let pipeline = TextPipeline::plain_text();
        assert_eq!(
            pipeline.names(),
            vec!["strip_markup", "strip_deletion_marker", "whitespace"]
        );
    }

    #[test]
    fn test_sanitizer_keeps_whitespace() {
        let sanitized = TextPipeline::sanitizer().process("<b>🗙</b>  ");
        assert_eq!(sanitized, "  ");
        assert!(sanitized.trim().is_empty());
    }

    #[test]
    fn test_plain_text() {
        let html = r#"Hi, <span class="text-red-600">🗙</span>!"#;
        assert_eq!(TextPipeline::plain_text().process(html), "Hi, !");
    }

    #[test]
    fn test_word_key() {
        let key = TextPipeline::word_key();
        assert_eq!(key.process("Steady,"), "steady");
        assert_eq!(key.process("🗙World!"), "world");
    }
}
