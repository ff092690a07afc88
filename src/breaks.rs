//! Class boundaries produced by a classification.
//!
//! A [`Breaks`] holds `K + 1` non-decreasing values for `K` classes:
//! the data minimum, the `K - 1` interior boundaries, and the data maximum.
//! Class `i` (zero-based) spans `[breaks[i], breaks[i + 1]]`; both ends are
//! inclusive and adjacent classes share their boundary value.
//!
//! `Display` renders the values joined with `", "`, the textual form the
//! presentation layer shows under each indicator heading.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use thiserror::Error;

/// Why a boundary vector is not a valid [`Breaks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BreaksError {
    /// At least two boundaries (one class) are required.
    #[error("breaks need at least 2 values, got {len}")]
    TooFew {
        /// Number of values supplied.
        len: usize,
    },
    /// Boundaries must be non-decreasing and not NaN.
    #[error("breaks must be non-decreasing, violated at index {index}")]
    NotNonDecreasing {
        /// Index of the first value smaller than (or unordered with) its predecessor.
        index: usize,
    },
}

/// Ordered class boundaries, minimum first.
///
/// Deserialized through [`TryFrom<Vec<f64>>`], so a serialized form that
/// breaks the ordering is rejected rather than trusted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct Breaks {
    values: Vec<f64>,
}

impl Breaks {
    /// Wrap boundary values produced by backtracking.
    ///
    /// Crate-internal: outside callers get `Breaks` from
    /// [`crate::classifier::jenks`] and friends, which uphold the ordering.
    pub(crate) fn from_sorted(values: Vec<f64>) -> Self {
        debug_assert!(values.windows(2).all(|w| w[0] <= w[1]), "breaks must be non-decreasing");
        Self { values }
    }

    /// Boundary values, minimum first.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Number of classes (one fewer than the number of boundaries).
    pub fn class_count(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Lowest boundary: the minimum of the classified data.
    pub fn min(&self) -> f64 {
        self.values.first().copied().unwrap_or(f64::NAN)
    }

    /// Highest boundary: the maximum of the classified data.
    pub fn max(&self) -> f64 {
        self.values.last().copied().unwrap_or(f64::NAN)
    }

    /// Inclusive `(lower, upper)` bounds of class `class` (zero-based).
    pub fn class_bounds(&self, class: usize) -> Option<(f64, f64)> {
        let lower = *self.values.get(class)?;
        let upper = *self.values.get(class + 1)?;
        Some((lower, upper))
    }

    /// Zero-based class index for `value`.
    ///
    /// A value sitting exactly on a shared boundary belongs to the lower
    /// class. Values outside `[min, max]` and NaN have no class.
    pub fn class_of(&self, value: f64) -> Option<usize> {
        if !(value >= self.min() && value <= self.max()) {
            return None;
        }
        // First upper boundary that is >= value.
        let upper = self.values[1..].partition_point(|&b| b < value);
        Some(upper.min(self.class_count().saturating_sub(1)))
    }

    /// Iterator over `(lower, upper)` bounds of each class in order.
    pub fn classes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Deref for Breaks {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl From<Breaks> for Vec<f64> {
    fn from(b: Breaks) -> Self {
        b.values
    }
}

impl TryFrom<Vec<f64>> for Breaks {
    type Error = BreaksError;

    fn try_from(values: Vec<f64>) -> Result<Self, BreaksError> {
        if values.len() < 2 {
            return Err(BreaksError::TooFew { len: values.len() });
        }
        if let Some(i) = values.windows(2).position(|w| !(w[0] <= w[1])) {
            return Err(BreaksError::NotNonDecreasing { index: i + 1 });
        }
        Ok(Self { values })
    }
}

impl fmt::Display for Breaks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
