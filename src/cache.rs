/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Memoized classification outcomes keyed by attribute, group and class count.
//!
//! # The problem in plain English
//!
//! A dashboard shows breaks for dozens of indicators, each for the whole
//! city and again per subdivision, and re-renders often. The classifier is
//! `O(N² · K)`, so recomputing identical inputs is wasted work. The cache
//! remembers the outcome of each (attribute, group, class count) triple.
//!
//! # Bounded memory
//!
//! The cache holds at most [`CacheConfig::capacity`] entries. Every lookup
//! stamps the entry with a monotonically increasing use tick; when a new
//! entry would exceed the capacity, the entry with the oldest tick is
//! dropped first.
//!
//! # Invariants
//!
//! - The classifier stays stateless; all memoization lives here.
//! - Failed outcomes (insufficient data) are cached too, so a hopeless
//!   column is not re-classified on every request.
//! - `len() <= capacity` after every operation (capacity 0 disables storage).
//! - The cache trusts its key: callers must not reuse a key for different data.

use alloc::string::String;

use hashbrown::HashMap;

use crate::breaks::Breaks;
use crate::classifier::jenks;
use crate::error::ClassifyError;

/// Outcome stored per key.
pub type Outcome = Result<Breaks, ClassifyError>;

// ─── Config ───────────────────────────────────────────────────────────────────

/// Configuration for [`BreaksCache`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Maximum number of memoized outcomes. Default: 256.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

// ─── CacheKey ─────────────────────────────────────────────────────────────────

/// Identity of one classification request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheKey {
    /// Attribute the values were taken from.
    pub attribute: String,
    /// Group name, or `None` for the ungrouped column.
    pub group: Option<String>,
    /// Requested class count.
    pub classes: usize,
}

impl CacheKey {
    /// Key for an ungrouped column.
    pub fn new(attribute: &str, classes: usize) -> Self {
        Self { attribute: String::from(attribute), group: None, classes }
    }

    /// Key for one group of a column.
    pub fn grouped(attribute: &str, group: &str, classes: usize) -> Self {
        Self {
            attribute: String::from(attribute),
            group: Some(String::from(group)),
            classes,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    outcome: Outcome,
    last_used_tick: u64,
}

// ─── BreaksCache ──────────────────────────────────────────────────────────────

/// Bounded, LRU-evicted memo of classification outcomes.
#[derive(Clone, Debug, Default)]
pub struct BreaksCache {
    entries: HashMap<CacheKey, Entry>,
    config: CacheConfig,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl BreaksCache {
    /// Empty cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self { entries: HashMap::new(), config, tick: 0, hits: 0, misses: 0 }
    }

    /// Memoized outcome for `key`, classifying `values` on a miss.
    pub fn get_or_classify(&mut self, key: CacheKey, values: &[f64]) -> Outcome {
        if let Some(outcome) = self.get(&key) {
            return outcome;
        }
        tracing::debug!(
            attribute = %key.attribute,
            group = ?key.group,
            classes = key.classes,
            values = values.len(),
            "breaks cache miss"
        );
        let outcome = jenks(values, key.classes);
        self.insert(key, outcome.clone());
        outcome
    }

    /// Memoized outcome for `key`, refreshing its use tick. Counts a hit or
    /// a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<Outcome> {
        let tick = self.next_tick();
        let Some(entry) = self.entries.get_mut(key) else {
            self.misses += 1;
            return None;
        };
        entry.last_used_tick = tick;
        self.hits += 1;
        tracing::debug!(attribute = %key.attribute, group = ?key.group, classes = key.classes, "breaks cache hit");
        Some(entry.outcome.clone())
    }

    /// `true` if `key` is memoized. Does not touch use ticks or counters.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `outcome` under `key`, evicting the least recently used entry
    /// if the cache is full.
    pub fn insert(&mut self, key: CacheKey, outcome: Outcome) {
        if self.config.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.capacity {
            self.evict_lru();
        }
        let tick = self.next_tick();
        self.entries.insert(key, Entry { outcome, last_used_tick: tick });
    }

    /// Number of memoized outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to classify.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// The active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    /// Evict the entry with the oldest `last_used_tick`.
    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used_tick)
            .map(|(k, _)| k.clone());
        if let Some(k) = oldest {
            tracing::debug!(attribute = %k.attribute, group = ?k.group, classes = k.classes, "breaks cache eviction");
            self.entries.remove(&k);
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
