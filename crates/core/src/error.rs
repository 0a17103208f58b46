//! Error types
//!
//! Line mutations are total functions and never fail. Errors only surface
//! when parsing configuration or checkout snapshots, or from the
//! `Result`-returning replace variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LyricError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a search term is required")]
    EmptySearchTerm,
}

pub type Result<T> = std::result::Result<T, LyricError>;
