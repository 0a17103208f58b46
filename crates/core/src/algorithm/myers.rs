use similar::{capture_diff_slices, Algorithm};

use crate::algorithm::{expand_similar_ops, trivial_diff, DiffAlgorithm};
use crate::diff::DiffOperation;

/// Myers O(ND) diff algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl DiffAlgorithm for MyersAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<DiffOperation> {
        if let Some(ops) = trivial_diff(original, modified) {
            return ops;
        }

        let ops = capture_diff_slices(Algorithm::Myers, original, modified);
        expand_similar_ops(&ops)
    }

    fn name(&self) -> &str {
        "myers"
    }
}
