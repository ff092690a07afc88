/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Jenks optimal classification: sort, build the tables, backtrack.
//!
//! # In plain English
//!
//! Given a pile of indicator values (say, the share of adults without health
//! insurance in every census tract) and a number of colours for a map, find
//! the class boundaries that make each class as tight as possible. "Tight"
//! means the total squared distance of every value from its class mean is
//! minimal. The search is exact: a dynamic program over every prefix of the
//! sorted data and every class count, then a walk back through the recorded
//! split points.
//!
//! # Entry points
//!
//! - [`jenks`]: one call, one class count.
//! - [`JenksClassification`]: build once for a maximum class count, then ask
//!   for [`breaks`](JenksClassification::breaks) or the
//!   [goodness of variance fit](JenksClassification::goodness_of_variance_fit)
//!   at any smaller count without recomputing.
//!
//! # Invariants
//!
//! - The caller's slice is never reordered; a private sorted copy is used.
//! - `K + 1` boundaries for `K` classes; first is the minimum, last the maximum.
//! - Boundaries are non-decreasing.
//! - Output depends only on the multiset of input values, never on their order.
//! - Fails only with [`ClassifyError::InsufficientData`] when `K > N`
//!   (plus [`ClassifyError::ZeroClasses`] for `K == 0`).
//!
//! Values are assumed finite. Filtering NaN and infinities is the loader's
//! job ([`crate::dataset`] does it).

use alloc::vec;
use alloc::vec::Vec;

use crate::breaks::Breaks;
use crate::error::ClassifyError;
use crate::matrices::JenksMatrices;

/// Classify `data` into `n_classes` natural classes.
///
/// Returns `n_classes + 1` boundaries, minimum first. Fails with
/// [`ClassifyError::InsufficientData`] when `n_classes > data.len()` (an
/// empty slice always fails) and with [`ClassifyError::ZeroClasses`] when
/// `n_classes == 0`.
///
/// ```
/// use jenks_core::jenks;
///
/// let breaks = jenks(&[9.0, 4.0, 10.0, 5.0], 2).unwrap();
/// assert_eq!(breaks.as_slice(), &[4.0, 5.0, 10.0]);
///
/// assert!(jenks(&[1.0, 2.0], 3).unwrap_err().is_insufficient_data());
/// ```
pub fn jenks(data: &[f64], n_classes: usize) -> Result<Breaks, ClassifyError> {
    JenksClassification::new(data, n_classes)?.breaks(n_classes)
}

/// Sorted data plus the filled tables, reusable for any class count up to
/// the one it was built with.
#[derive(Clone, Debug)]
pub struct JenksClassification {
    sorted: Vec<f64>,
    matrices: JenksMatrices,
}

impl JenksClassification {
    /// Sort a copy of `data` and fill the tables for `1..=max_classes` classes.
    pub fn new(data: &[f64], max_classes: usize) -> Result<Self, ClassifyError> {
        check_class_count(max_classes, data.len())?;

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let matrices = JenksMatrices::compute(&sorted, max_classes);
        Ok(Self { sorted, matrices })
    }

    /// Class boundaries for `n_classes` classes (`1..=max_classes`).
    pub fn breaks(&self, n_classes: usize) -> Result<Breaks, ClassifyError> {
        self.check_requested(n_classes)?;
        Ok(Breaks::from_sorted(backtrack(&self.sorted, &self.matrices, n_classes)))
    }

    /// Goodness of variance fit for `n_classes` classes, in `[0, 1]`.
    ///
    /// ```text
    /// GVF = (SDAM − SDCM) / SDAM
    /// ```
    ///
    /// `SDAM` is the squared deviation of all values from the overall mean,
    /// `SDCM` the summed squared deviation of each class from its own mean.
    /// 1.0 is a perfect fit; constant data counts as a perfect fit.
    pub fn goodness_of_variance_fit(&self, n_classes: usize) -> Result<f64, ClassifyError> {
        self.check_requested(n_classes)?;
        let n = self.sorted.len();
        let sdam = self.matrices.variance_combination(n, 1).unwrap_or(0.0);
        let sdcm = self.matrices.variance_combination(n, n_classes).unwrap_or(0.0);
        if sdam <= 0.0 {
            return Ok(1.0);
        }
        Ok(((sdam - sdcm) / sdam).clamp(0.0, 1.0))
    }

    /// The sorted working copy.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// The filled tables.
    pub fn matrices(&self) -> &JenksMatrices {
        &self.matrices
    }

    /// Largest class count this classification can answer.
    pub fn max_classes(&self) -> usize {
        self.matrices.max_classes()
    }

    /// Number of classified values.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always `false`: an empty input cannot be classified.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    fn check_requested(&self, n_classes: usize) -> Result<(), ClassifyError> {
        if n_classes > self.max_classes() {
            return Err(ClassifyError::ClassCountOutOfRange {
                requested: n_classes,
                computed: self.max_classes(),
            });
        }
        check_class_count(n_classes, self.sorted.len())
    }
}

fn check_class_count(n_classes: usize, values: usize) -> Result<(), ClassifyError> {
    if n_classes == 0 {
        return Err(ClassifyError::ZeroClasses);
    }
    if n_classes > values {
        return Err(ClassifyError::InsufficientData { classes: n_classes, values });
    }
    Ok(())
}

/// Walk the split table back from `[N][n_classes]`.
///
/// The split table stores where the *next* class starts (1-based), so the
/// boundary is the value just before it: 0-based index `limit - 2`.
///
/// The walk starts at row `N`, the prefix holding every value. Starting at
/// row `N - 1` classifies a prefix without the maximum and returns breaks
/// that are not optimal for the full data.
fn backtrack(sorted: &[f64], matrices: &JenksMatrices, n_classes: usize) -> Vec<f64> {
    let n = sorted.len();
    let mut kclass = vec![0.0; n_classes + 1];
    kclass[n_classes] = sorted[n - 1];
    kclass[0] = sorted[0];

    let mut row = n;
    for col in (2..=n_classes).rev() {
        let limit = matrices.lower_class_limit(row, col).unwrap_or(1);
        // With duplicate values an equal-cost path can end in the
        // single-value prefix (limit 1); that boundary is the minimum.
        kclass[col - 1] = sorted[limit.saturating_sub(2)];
        row = limit.saturating_sub(1).max(1);
    }

    kclass
}

// ─── Tests ────────────────────────────────────────────────────────────────
