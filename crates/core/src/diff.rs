//! Diff result types
//!
//! Token-level operations produced by a `DiffAlgorithm`, and the coalesced
//! runs consumed by the classifier and renderer.

use std::fmt;

use crate::algorithm::DiffAlgorithm;
use crate::script::Granularity;
use crate::tokenizers::tokenizer_for;

/// Type of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    /// Content was inserted
    Insert,
    /// Content was deleted
    Delete,
    /// Content remained unchanged
    Equal,
}

/// A single token-level diff operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOperation {
    pub edit_type: EditType,

    /// Index into the original token stream (for delete/equal)
    pub original_index: Option<usize>,

    /// Index into the modified token stream (for insert/equal)
    pub modified_index: Option<usize>,
}

impl DiffOperation {
    pub fn equal(original_index: usize, modified_index: usize) -> Self {
        Self {
            edit_type: EditType::Equal,
            original_index: Some(original_index),
            modified_index: Some(modified_index),
        }
    }

    pub fn delete(original_index: usize) -> Self {
        Self {
            edit_type: EditType::Delete,
            original_index: Some(original_index),
            modified_index: None,
        }
    }

    pub fn insert(modified_index: usize) -> Self {
        Self {
            edit_type: EditType::Insert,
            original_index: None,
            modified_index: Some(modified_index),
        }
    }
}

/// A maximal run of consecutive tokens sharing one edit type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRun<'a> {
    pub edit_type: EditType,
    pub tokens: Vec<&'a str>,
}

impl<'a> DiffRun<'a> {
    pub fn added(&self) -> bool {
        self.edit_type == EditType::Insert
    }

    pub fn removed(&self) -> bool {
        self.edit_type == EditType::Delete
    }

    /// The run's text with tokens joined by `separator`.
    pub fn value(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

impl fmt::Display for DiffRun<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.edit_type {
            EditType::Insert => '+',
            EditType::Delete => '-',
            EditType::Equal => ' ',
        };
        write!(f, "{}{:?}", sign, self.tokens)
    }
}

/// Diff two token streams and coalesce the operations into runs.
pub fn diff_tokens<'a>(
    algorithm: &dyn DiffAlgorithm,
    original: &[&'a str],
    modified: &[&'a str],
) -> Vec<DiffRun<'a>> {
    let operations = algorithm.compute(original, modified);
    let mut runs: Vec<DiffRun<'a>> = Vec::new();

    for op in operations {
        let token = match (op.edit_type, op.original_index, op.modified_index) {
            (EditType::Insert, _, Some(j)) | (EditType::Equal, _, Some(j)) => modified[j],
            (EditType::Delete, Some(i), _) => original[i],
            _ => continue,
        };

        match runs.last_mut() {
            Some(run) if run.edit_type == op.edit_type => run.tokens.push(token),
            _ => runs.push(DiffRun {
                edit_type: op.edit_type,
                tokens: vec![token],
            }),
        }
    }

    runs
}

/// Tokenize both texts at `granularity` and diff them.
pub fn diff_text<'a>(
    algorithm: &dyn DiffAlgorithm,
    original: &'a str,
    modified: &'a str,
    granularity: Granularity,
) -> Vec<DiffRun<'a>> {
    let tokenizer = tokenizer_for(granularity);
    let original_tokens = tokenizer.split(original);
    let modified_tokens = tokenizer.split(modified);
    diff_tokens(algorithm, &original_tokens, &modified_tokens)
}
