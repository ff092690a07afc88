//! Error type for natural-breaks classification.
//!
//! The only condition the classifier itself can hit is not having enough
//! values for the requested number of classes. The other two variants guard
//! the public API against a zero class count and against asking precomputed
//! matrices for more classes than they were built for.
//!
//! Errors are `Clone + PartialEq` so classification outcomes can be memoized
//! by [`crate::cache::BreaksCache`] and compared directly in tests.

use thiserror::Error;

/// Error returned when a sequence cannot be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassifyError {
    /// More classes were requested than there are values; every class needs
    /// at least one member.
    #[error("insufficient data: {classes} classes requested but only {values} values available")]
    InsufficientData {
        /// Number of classes requested.
        classes: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// The class count must be at least 1.
    #[error("class count must be at least 1")]
    ZeroClasses,

    /// Precomputed matrices only cover class counts up to the one they were
    /// built with.
    #[error("class count {requested} exceeds the {computed} classes the matrices were computed for")]
    ClassCountOutOfRange {
        /// Number of classes requested from the matrices.
        requested: usize,
        /// Largest class count the matrices support.
        computed: usize,
    },
}

impl ClassifyError {
    /// `true` for the insufficient-data condition, the one callers are
    /// expected to handle routinely.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
