//! Diff algorithms implementation
//!
//! Provides sequence diff algorithms over token slices. Myers and Patience
//! delegate to `similar`; `LcsAlgorithm` is a dynamic-programming LCS.
pub mod lcs;
pub mod myers;
pub mod patience;

use similar::DiffOp;

use crate::diff::DiffOperation;

/// Trait for diff algorithms
///
/// Implementations must be deterministic and, inside a changed region, emit
/// deletions before insertions.
pub trait DiffAlgorithm: Send + Sync {
    /// Compute diff between two token sequences
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<DiffOperation>;

    fn name(&self) -> &str;
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Expand `similar` ops into per-token operations.
fn expand_similar_ops(ops: &[DiffOp]) -> Vec<DiffOperation> {
    let mut operations = Vec::new();

    for op in ops {
        match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                operations.extend(
                    (0..len).map(|i| DiffOperation::equal(old_index + i, new_index + i)),
                );
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                operations.extend((old_index..old_index + old_len).map(DiffOperation::delete));
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                operations.extend((new_index..new_index + new_len).map(DiffOperation::insert));
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                operations.extend((old_index..old_index + old_len).map(DiffOperation::delete));
                operations.extend((new_index..new_index + new_len).map(DiffOperation::insert));
            }
        }
    }

    operations
}

/// Shortcut for the degenerate cases every algorithm handles the same way.
fn trivial_diff(original: &[&str], modified: &[&str]) -> Option<Vec<DiffOperation>> {
    if original.is_empty() {
        return Some((0..modified.len()).map(DiffOperation::insert).collect());
    }
    if modified.is_empty() {
        return Some((0..original.len()).map(DiffOperation::delete).collect());
    }
    None
}
