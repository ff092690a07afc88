//! # jenks-core
//!
//! Jenks natural breaks optimization: exact classification of one-dimensional
//! indicator data into natural groups.
//!
//! ---
//!
//! ## What it does
//!
//! A choropleth map needs class boundaries: which tracts get the lightest
//! colour, which the darkest. Equal intervals ignore where the data actually
//! clusters; quantiles split clusters apart. Jenks optimization picks the
//! boundaries that make every class as internally tight as possible, measured
//! as the total squared deviation of each value from its class mean.
//!
//! The search is exact, not heuristic: a dynamic program over every sorted
//! prefix and every class count, then a walk back through the recorded split
//! points.
//!
//! ```
//! use jenks_core::jenks;
//!
//! let uninsured = [4.0, 5.0, 9.0, 10.0];
//! let breaks = jenks(&uninsured, 2).unwrap();
//! assert_eq!(breaks.as_slice(), &[4.0, 5.0, 10.0]);
//! assert_eq!(breaks.to_string(), "4, 5, 10");
//! ```
//!
//! ## The pipeline
//!
//! ```text
//! records → AttributeColumns / GroupedColumn → BatchClassifier → BreaksReport
//!                                                    ↓
//!                                     BreaksCache → jenks() → Breaks
//!                                                      ↓
//!                                               JenksMatrices
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`classifier`] | [`jenks`], [`JenksClassification`] | Sort, build tables, backtrack; goodness of variance fit |
//! | [`matrices`] | [`JenksMatrices`] | Cost and split tables of the dynamic program |
//! | [`breaks`] | [`Breaks`], [`BreaksError`] | Boundary values, validation, class lookup, text form |
//! | [`error`] | [`ClassifyError`] | Insufficient data and class-count errors |
//! | [`dataset`] | [`dataset::AttributeColumns`], [`dataset::PropertySource`] | Numeric columns from property records |
//! | [`grouping`] | [`grouping::GroupedColumn`], [`grouping::GroupBy`] | Split a column by subdivision or area membership |
//! | [`cache`] | [`cache::BreaksCache`] | Bounded memo keyed by attribute, group and class count |
//! | [`batch`] | [`batch::BatchClassifier`] | One class count over many columns, optionally in parallel |
//! | [`report`] | [`report::BreaksReport`] | Plain-text rendering of batch results |
//!
//! ## Features
//!
//! | Feature | Adds |
//! |---------|------|
//! | `std` | `std::error::Error` for [`ClassifyError`], `tracing/std` |
//! | `serde` | Serialize/Deserialize for breaks, configs and results |
//! | `json` | GeoJSON-style feature collections as input (`serde_json`) |
//! | `parallel` | `rayon` batch classification |
//! | `python-ffi` | Python bindings (`pyo3`) |
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod batch;
pub mod breaks;
pub mod cache;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod matrices;
pub mod report;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use breaks::{Breaks, BreaksError};
pub use classifier::{jenks, JenksClassification};
pub use error::ClassifyError;
pub use matrices::JenksMatrices;
