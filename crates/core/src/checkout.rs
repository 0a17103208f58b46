//! Checkout snapshots
//!
//! The payload handed to the checkout step, and the way back: a stored
//! snapshot carries the joined original and modified lyrics, which is
//! enough to rebuild the document.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::engine::LyricEngine;
use crate::error::Result;
use crate::pipeline::TextPipeline;
use crate::pricing::PricingTable;

/// Song and order details supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutMeta {
    pub title: String,
    pub artist: String,
    pub url: String,
    pub image: String,
    pub special_request: String,
    pub delivery_preference: String,
    /// Timestamp string; never read from the clock here.
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub title: String,
    pub artist: String,
    pub url: String,
    pub image: String,
    pub modified_lyrics: String,
    pub original_lyrics: String,
    pub changed_words: Vec<String>,
    #[serde(default)]
    pub special_request: String,
    #[serde(default)]
    pub delivery_preference: String,
    pub cost: u32,
    pub generated_at: String,
}

impl CheckoutData {
    pub fn from_document(meta: CheckoutMeta, document: &Document, pricing: &PricingTable) -> Self {
        let quote = pricing.quote(&document.lines);
        Self {
            title: meta.title,
            artist: meta.artist,
            url: meta.url,
            image: meta.image,
            modified_lyrics: document.modified_lyrics(),
            original_lyrics: document.original_lyrics(),
            changed_words: quote.changed_words,
            special_request: meta.special_request,
            delivery_preference: meta.delivery_preference,
            cost: quote.price,
            generated_at: meta.generated_at,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the document this snapshot was taken from.
    pub fn resume(&self, engine: &LyricEngine) -> Document {
        resume(engine, self)
    }
}

pub fn resume(engine: &LyricEngine, checkout: &CheckoutData) -> Document {
    engine.reconstruct_from_checkout(&checkout.original_lyrics, &checkout.modified_lyrics)
}

/// Marked text as the reader sees it: no tags, entities decoded, markers
/// dropped, whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    TextPipeline::plain_text().process(html)
}

/// `Line {id}: "{original}" -> "{plain}"` for each line with a content
/// change.
pub fn line_change_summaries(document: &Document) -> Vec<String> {
    document
        .changed_lines()
        .map(|line| {
            format!(
                "Line {}: \"{}\" -> \"{}\"",
                line.id,
                line.original,
                plain_text(&line.marked_text)
            )
        })
        .collect()
}
