use crate::algorithm::{trivial_diff, DiffAlgorithm};
use crate::diff::DiffOperation;

/// Simple LCS-based algorithm (quadratic table, fine for single lines)
#[derive(Debug, Clone, Copy, Default)]
pub struct LcsAlgorithm;

impl DiffAlgorithm for LcsAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<DiffOperation> {
        if let Some(ops) = trivial_diff(original, modified) {
            return ops;
        }

        let lcs = longest_common_subsequence(original, modified);
        build_operations_from_lcs(original.len(), modified.len(), &lcs)
    }

    fn name(&self) -> &str {
        "lcs"
    }
}

fn longest_common_subsequence(original: &[&str], modified: &[&str]) -> Vec<(usize, usize)> {
    let n = original.len();
    let m = modified.len();

    let mut dp = vec![vec![0usize; m + 1]; n + 1];

    for i in 1..=n {
        for j in 1..=m {
            if original[i - 1] == modified[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    // Backtrack
    let mut lcs = Vec::new();
    let mut i = n;
    let mut j = m;

    while i > 0 && j > 0 {
        if original[i - 1] == modified[j - 1] {
            lcs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}

fn build_operations_from_lcs(
    original_len: usize,
    modified_len: usize,
    lcs: &[(usize, usize)],
) -> Vec<DiffOperation> {
    let mut operations = Vec::with_capacity(original_len.max(modified_len));
    let mut orig_idx = 0;
    let mut mod_idx = 0;

    for &(lcs_orig, lcs_mod) in lcs {
        operations.extend((orig_idx..lcs_orig).map(DiffOperation::delete));
        operations.extend((mod_idx..lcs_mod).map(DiffOperation::insert));
        operations.push(DiffOperation::equal(lcs_orig, lcs_mod));

        orig_idx = lcs_orig + 1;
        mod_idx = lcs_mod + 1;
    }

    operations.extend((orig_idx..original_len).map(DiffOperation::delete));
    operations.extend((mod_idx..modified_len).map(DiffOperation::insert));

    operations
}
