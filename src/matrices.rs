/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The two dynamic-programming tables behind Jenks optimal classification.
//!
//! # The tables
//!
//! **`variance_combinations`** (the cost table): entry `[l][j]` is the smallest
//! achievable sum of within-class squared deviations when the first `l`
//! sorted values are split into `j` contiguous classes.
//!
//! **`lower_class_limits`** (the split table): entry `[l][j]` is the 1-based
//! position in the sorted values where the *last* of those `j` classes
//! starts. Only backtracking reads it.
//!
//! Both tables have `N + 1` rows and `K + 1` columns. Row 0 and column 0 are
//! padding so the recurrence can be written with 1-based indices. Storage is
//! a flat row-major `Vec` with row stride `K + 1`.
//!
//! # Recurrence
//!
//! ```text
//! cost[l][1] = SS(1..=l)
//! cost[l][j] = min over s in 2..=l of  SS(s..=l) + cost[s-1][j-1]     (j ≥ 2)
//! ```
//!
//! where `SS(a..=b)` is the sum of squared deviations from the segment mean,
//! computed incrementally as `sumsq - sum² / count` while `s` walks down
//! from `l` to 1.
//!
//! # Invariants
//!
//! - `cost[1][j] == 0` and `split[1][j] == 1` for every `j`.
//! - `cost[l][1]` is the squared deviation of the whole `l`-prefix.
//! - Ties are resolved with `<=` while `s` scans downwards, so among equally
//!   good splits the one with the *largest* final class is stored.
//! - Built once, in a single forward pass, and never mutated afterwards.
//!
//! Time `O(N² · K)`, space `O(N · K)`.

use alloc::vec;
use alloc::vec::Vec;

/// Cost and split tables for one sorted sequence and a maximum class count.
///
/// Built by [`JenksMatrices::compute`]. The tables answer any classing with
/// up to [`JenksMatrices::max_classes`] classes, so a single build can serve
/// several class counts (see [`crate::classifier::JenksClassification`]).
#[derive(Clone, Debug, PartialEq)]
pub struct JenksMatrices {
    /// Number of sorted values the tables were built from (`N`).
    values: usize,
    /// Largest class count the tables cover (`K`).
    max_classes: usize,
    /// Split table, row-major, row stride `max_classes + 1`.
    lower_class_limits: Vec<usize>,
    /// Cost table, row-major, row stride `max_classes + 1`.
    variance_combinations: Vec<f64>,
}

impl JenksMatrices {
    /// Fill both tables for `sorted` (ascending) and class counts `1..=max_classes`.
    ///
    /// The caller guarantees `sorted` is in ascending order and contains only
    /// finite values; [`crate::classifier::JenksClassification::new`] does the
    /// sorting and the class-count checks.
    ///
    /// Empty input or `max_classes == 0` yields padding-only tables.
    pub fn compute(sorted: &[f64], max_classes: usize) -> Self {
        let n = sorted.len();
        let stride = max_classes + 1;
        let rows = n + 1;

        tracing::trace!(values = n, classes = max_classes, "building jenks matrices");

        let mut m = Self {
            values: n,
            max_classes,
            lower_class_limits: vec![0; rows * stride],
            variance_combinations: vec![0.0; rows * stride],
        };

        if n == 0 || max_classes == 0 {
            return m;
        }

        for j in 1..=max_classes {
            m.set(1, j, 1, 0.0);
            for l in 2..=n {
                m.variance_combinations[l * stride + j] = f64::INFINITY;
            }
        }

        for l in 2..=n {
            // Running moments of the candidate final class sorted[s..=l].
            let mut variance = 0.0;
            let mut sum = 0.0;
            let mut sum_squares = 0.0;
            let mut count = 0.0;

            for s in (1..=l).rev() {
                let val = sorted[s - 1];
                count += 1.0;
                sum += val;
                sum_squares += val * val;
                variance = sum_squares - (sum * sum) / count;

                let prefix = s - 1;
                if prefix == 0 {
                    continue;
                }
                for j in 2..=max_classes {
                    let candidate = variance + m.variance_combinations[prefix * stride + j - 1];
                    // `<=`: a later (smaller `s`) split replaces an equal-cost one.
                    if m.variance_combinations[l * stride + j] >= candidate {
                        m.set(l, j, s, candidate);
                    }
                }
            }

            // After the scan `variance` covers sorted[1..=l].
            m.set(l, 1, 1, variance);
        }

        m
    }

    #[inline]
    fn set(&mut self, l: usize, j: usize, limit: usize, cost: f64) {
        let idx = l * (self.max_classes + 1) + j;
        self.lower_class_limits[idx] = limit;
        self.variance_combinations[idx] = cost;
    }

    /// Number of sorted values the tables were built from.
    pub fn values(&self) -> usize {
        self.values
    }

    /// Largest class count the tables cover.
    pub fn max_classes(&self) -> usize {
        self.max_classes
    }

    /// 1-based start of the last class when the first `l` values form `j`
    /// classes. `None` outside `0..=values` × `0..=max_classes`.
    pub fn lower_class_limit(&self, l: usize, j: usize) -> Option<usize> {
        self.index(l, j).map(|i| self.lower_class_limits[i])
    }

    /// Minimum total squared deviation for the first `l` values in `j`
    /// classes. `None` outside `0..=values` × `0..=max_classes`.
    pub fn variance_combination(&self, l: usize, j: usize) -> Option<f64> {
        self.index(l, j).map(|i| self.variance_combinations[i])
    }

    fn index(&self, l: usize, j: usize) -> Option<usize> {
        (l <= self.values && j <= self.max_classes).then(|| l * (self.max_classes + 1) + j)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_is_zero_cost_single_start() {
        let m = JenksMatrices::compute(&[1.0, 2.0, 3.0], 3);
        for j in 1..=3 {
            assert_eq!(m.lower_class_limit(1, j), Some(1));
            assert_eq!(m.variance_combination(1, j), Some(0.0));
        }
    }

    #[test]
    fn test_first_column_is_prefix_squared_deviation() {
        let m = JenksMatrices::compute(&[4.0, 5.0, 9.0, 10.0], 2);
        assert_eq!(m.variance_combination(2, 1), Some(0.5));
        assert_eq!(m.variance_combination(3, 1), Some(14.0));
        // 4,5,9,10: mean 7, deviations 9+4+4+9
        assert_eq!(m.variance_combination(4, 1), Some(26.0));
        for l in 1..=4 {
            assert_eq!(m.lower_class_limit(l, 1), Some(1));
        }
    }

    #[test]
    fn test_two_class_split_of_two_clusters() {
        let m = JenksMatrices::compute(&[4.0, 5.0, 9.0, 10.0], 2);
        // {4,5} | {9,10}: last class starts at position 3
        assert_eq!(m.lower_class_limit(4, 2), Some(3));
        assert_eq!(m.variance_combination(4, 2), Some(1.0));
    }

    #[test]
    fn test_tie_prefers_larger_final_class() {
        // [1,2,3] into 2 classes: {1,2}|{3} and {1}|{2,3} both cost 0.5.
        // The downward scan visits s=3 first, then s=2 overwrites on the tie.
        let m = JenksMatrices::compute(&[1.0, 2.0, 3.0], 2);
        assert_eq!(m.lower_class_limit(3, 2), Some(2));
        assert_eq!(m.variance_combination(3, 2), Some(0.5));
    }

    #[test]
    fn test_single_class_table_has_one_column() {
        let m = JenksMatrices::compute(&[1.0, 2.0], 1);
        assert_eq!(m.variance_combination(2, 1), Some(0.5));
        assert_eq!(m.variance_combination(2, 2), None);
    }

    #[test]
    fn test_out_of_range_lookups_are_none() {
        let m = JenksMatrices::compute(&[1.0, 2.0], 2);
        assert_eq!(m.values(), 2);
        assert_eq!(m.max_classes(), 2);
        assert_eq!(m.lower_class_limit(3, 1), None);
        assert_eq!(m.variance_combination(1, 3), None);
    }

    #[test]
    fn test_empty_input_builds_padding_only() {
        let m = JenksMatrices::compute(&[], 2);
        assert_eq!(m.values(), 0);
        assert_eq!(m.variance_combination(0, 2), Some(0.0));
    }

    #[test]
    fn test_zero_classes_builds_padding_only() {
        let m = JenksMatrices::compute(&[1.0, 2.0, 3.0], 0);
        assert_eq!(m.values(), 3);
        assert_eq!(m.max_classes(), 0);
        assert_eq!(m.variance_combination(3, 0), Some(0.0));
        assert_eq!(m.lower_class_limit(3, 0), Some(0));
        assert_eq!(m.variance_combination(3, 1), None);
    }
}
