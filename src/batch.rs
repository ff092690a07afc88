//! Classifying many columns (and groups) with one class count.
//!
//! The surrounding system classifies every demographic and health indicator
//! with the same number of classes, once for the whole city and once per
//! subdivision. [`BatchClassifier`] runs those calls through a
//! [`BreaksCache`] so repeated requests are free.
//!
//! Each call is independent. With the `parallel` feature,
//! [`BatchClassifier::par_classify_columns`] spreads cache misses over the
//! rayon thread pool, one classification per column, then records the
//! outcomes in input order. Results are identical to the sequential path.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::breaks::Breaks;
use crate::cache::{BreaksCache, CacheConfig, CacheKey, Outcome};
#[cfg(feature = "parallel")]
use crate::dataset::AttributeColumn;
use crate::dataset::AttributeColumns;
use crate::grouping::GroupedColumn;

/// Class count used for every indicator unless configured otherwise.
pub const DEFAULT_CLASS_COUNT: usize = 6;

// ─── Config ───────────────────────────────────────────────────────────────────

/// Configuration for [`BatchClassifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Number of classes per column. Default: [`DEFAULT_CLASS_COUNT`].
    pub class_count: usize,
    /// Memoization settings.
    pub cache: CacheConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { class_count: DEFAULT_CLASS_COUNT, cache: CacheConfig::default() }
    }
}

// ─── ClassifiedColumn ─────────────────────────────────────────────────────────

/// Outcome of classifying one column or one group of a column.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedColumn {
    /// Attribute name.
    pub attribute: String,
    /// Group name for grouped runs.
    pub group: Option<String>,
    /// Number of values that were classified.
    pub values: usize,
    /// Breaks, or why there are none.
    pub outcome: Outcome,
}

impl ClassifiedColumn {
    /// Breaks if classification succeeded.
    pub fn breaks(&self) -> Option<&Breaks> {
        self.outcome.as_ref().ok()
    }
}

// ─── BatchClassifier ──────────────────────────────────────────────────────────

/// Runs one class count over many columns, memoizing outcomes.
#[derive(Clone, Debug)]
pub struct BatchClassifier {
    config: BatchConfig,
    cache: BreaksCache,
}

impl Default for BatchClassifier {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl BatchClassifier {
    /// New classifier with an empty cache.
    pub fn new(config: BatchConfig) -> Self {
        let cache = BreaksCache::new(config.cache.clone());
        Self { config, cache }
    }

    /// The active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// The memo of past outcomes.
    pub fn cache(&self) -> &BreaksCache {
        &self.cache
    }

    /// Classify every column, in column order.
    pub fn classify_columns(&mut self, columns: &AttributeColumns) -> Vec<ClassifiedColumn> {
        let k = self.config.class_count;
        tracing::debug!(columns = columns.len(), classes = k, "classifying columns");
        columns
            .iter()
            .map(|c| {
                let outcome = self.cache.get_or_classify(CacheKey::new(&c.name, k), &c.values);
                classified(&c.name, None, c.values.len(), outcome)
            })
            .collect()
    }

    /// Classify every group of `grouped`, in group order.
    pub fn classify_groups(&mut self, grouped: &GroupedColumn) -> Vec<ClassifiedColumn> {
        let k = self.config.class_count;
        tracing::debug!(
            attribute = %grouped.attribute,
            groups = grouped.len(),
            classes = k,
            "classifying groups"
        );
        grouped
            .groups
            .iter()
            .map(|g| {
                let key = CacheKey::grouped(&grouped.attribute, &g.name, k);
                let outcome = self.cache.get_or_classify(key, &g.values);
                classified(&grouped.attribute, Some(&g.name), g.values.len(), outcome)
            })
            .collect()
    }

    /// Like [`classify_columns`](Self::classify_columns), with cache misses
    /// classified in parallel.
    #[cfg(feature = "parallel")]
    pub fn par_classify_columns(&mut self, columns: &AttributeColumns) -> Vec<ClassifiedColumn> {
        let k = self.config.class_count;
        tracing::debug!(columns = columns.len(), classes = k, "classifying columns in parallel");

        let mut slots: Vec<Option<Outcome>> = columns
            .iter()
            .map(|c| self.cache.get(&CacheKey::new(&c.name, k)))
            .collect();

        let misses: Vec<(usize, &AttributeColumn)> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| slots[*i].is_none())
            .collect();

        let fresh: Vec<(usize, &AttributeColumn, Outcome)> = misses
            .par_iter()
            .map(|&(i, c)| (i, c, crate::classifier::jenks(&c.values, k)))
            .collect();

        for (i, c, outcome) in fresh {
            self.cache.insert(CacheKey::new(&c.name, k), outcome.clone());
            slots[i] = Some(outcome);
        }

        // Every slot is filled: either a cache hit or a fresh classification.
        columns
            .iter()
            .zip(slots)
            .filter_map(|(c, slot)| slot.map(|o| classified(&c.name, None, c.values.len(), o)))
            .collect()
    }
}

fn classified(attribute: &str, group: Option<&str>, values: usize, outcome: Outcome) -> ClassifiedColumn {
    if let Err(err) = &outcome {
        tracing::warn!(attribute, group, %err, "column not classified");
    }
    ClassifiedColumn {
        attribute: String::from(attribute),
        group: group.map(String::from),
        values,
        outcome,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "parallel"))]
    use crate::dataset::AttributeColumn;
    use crate::error::ClassifyError;
    use crate::grouping::Group;
    use alloc::vec;

    fn columns() -> AttributeColumns {
        AttributeColumns::from_columns(vec![
            AttributeColumn { name: String::from("Spanish"), values: vec![9.0, 4.0, 10.0, 5.0] },
            AttributeColumn { name: String::from("Korean"), values: vec![1.0] },
        ])
    }

    fn two_classes() -> BatchClassifier {
        BatchClassifier::new(BatchConfig { class_count: 2, ..BatchConfig::default() })
    }

    #[test]
    fn test_default_class_count_is_six() {
        let b = BatchClassifier::default();
        assert_eq!(b.config().class_count, 6);
        assert_eq!(b.cache().config().capacity, 256);
    }

    #[test]
    fn test_columns_in_order_with_failures() {
        let mut b = two_classes();
        let out = b.classify_columns(&columns());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].attribute, "Spanish");
        assert_eq!(out[0].values, 4);
        assert_eq!(out[0].breaks().unwrap().as_slice(), &[4.0, 5.0, 10.0]);
        assert_eq!(out[1].attribute, "Korean");
        assert_eq!(out[1].outcome, Err(ClassifyError::InsufficientData { classes: 2, values: 1 }));
        assert!(out[1].breaks().is_none());
    }

    #[test]
    fn test_second_run_is_served_from_cache() {
        let mut b = two_classes();
        let first = b.classify_columns(&columns());
        let second = b.classify_columns(&columns());
        assert_eq!(first, second);
        assert_eq!(b.cache().misses(), 2);
        assert_eq!(b.cache().hits(), 2);
    }

    #[test]
    fn test_groups() {
        let grouped = GroupedColumn {
            attribute: String::from("Obesity"),
            groups: vec![
                Group { name: String::from("Queens"), values: vec![10.0, 9.0, 5.0, 4.0] },
                Group { name: String::from("Bronx"), values: vec![] },
            ],
        };
        let mut b = two_classes();
        let out = b.classify_groups(&grouped);
        assert_eq!(out[0].group.as_deref(), Some("Queens"));
        assert_eq!(out[0].breaks().unwrap().as_slice(), &[4.0, 5.0, 10.0]);
        assert_eq!(out[1].group.as_deref(), Some("Bronx"));
        assert!(out[1].outcome.as_ref().unwrap_err().is_insufficient_data());
        assert!(b.cache().contains(&CacheKey::grouped("Obesity", "Queens", 2)));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut seq = two_classes();
        let mut par = two_classes();
        assert_eq!(seq.classify_columns(&columns()), par.par_classify_columns(&columns()));
        // Second parallel run hits the cache for every column.
        let again = par.par_classify_columns(&columns());
        assert_eq!(again, seq.classify_columns(&columns()));
        assert_eq!(par.cache().misses(), 2);
        assert_eq!(par.cache().hits(), 2);
    }
}
