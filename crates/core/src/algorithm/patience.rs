use similar::{capture_diff_slices, Algorithm};

use crate::algorithm::{expand_similar_ops, trivial_diff, DiffAlgorithm};
use crate::diff::DiffOperation;

/// Patience diff: anchors on tokens unique to both sides, which keeps
/// repeated filler words ("oh oh oh") from pulling the alignment around.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatienceAlgorithm;

impl DiffAlgorithm for PatienceAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<DiffOperation> {
        if let Some(ops) = trivial_diff(original, modified) {
            return ops;
        }

        let ops = capture_diff_slices(Algorithm::Patience, original, modified);
        expand_similar_ops(&ops)
    }

    fn name(&self) -> &str {
        "patience"
    }
}
