//! Python FFI bindings via PyO3.
//!
//! Exposes natural-breaks classification to Python.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from jenks_core import jenks, Classification
//!
//! jenks([4, 5, 9, 10], 2)      # [4.0, 5.0, 10.0]
//! jenks([1, 2], 3)             # None: not enough values
//!
//! c = Classification(values, 6)
//! for k in range(1, 7):
//!     print(k, c.breaks(k), c.goodness_of_variance_fit(k))
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::batch::DEFAULT_CLASS_COUNT;
use crate::classifier::{jenks as classify, JenksClassification};
use crate::error::ClassifyError;

fn check_finite(data: &[f64]) -> PyResult<()> {
    if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
        return Err(PyValueError::new_err(format!(
            "data must contain only finite numbers, got {} at index {pos}",
            data[pos]
        )));
    }
    Ok(())
}

fn to_py_err(err: ClassifyError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// ── jenks ─────────────────────────────────────────────────────────────────────

/// Jenks natural breaks for `data` in `n_classes` classes.
///
/// Args:
///     data:      finite numbers, any order (not modified)
///     n_classes: number of classes, at least 1
///
/// Returns:
///     n_classes + 1 boundaries (minimum first), or None when there are fewer
///     values than classes.
#[pyfunction]
#[pyo3(signature = (data, n_classes=DEFAULT_CLASS_COUNT))]
pub fn jenks(data: Vec<f64>, n_classes: usize) -> PyResult<Option<Vec<f64>>> {
    check_finite(&data)?;
    match classify(&data, n_classes) {
        Ok(breaks) => Ok(Some(breaks.into_vec())),
        Err(ClassifyError::InsufficientData { .. }) => Ok(None),
        Err(err) => Err(to_py_err(err)),
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Sorted data plus Jenks tables, reusable for any class count up to
/// `max_classes`.
#[pyclass(name = "Classification")]
pub struct PyClassification {
    inner: JenksClassification,
}

#[pymethods]
impl PyClassification {
    /// Build the tables for `data` and class counts 1..=max_classes.
    ///
    /// Raises ValueError if data has fewer values than max_classes, if
    /// max_classes is 0, or if data contains NaN or infinities.
    #[new]
    #[pyo3(signature = (data, max_classes=DEFAULT_CLASS_COUNT))]
    pub fn new(data: Vec<f64>, max_classes: usize) -> PyResult<Self> {
        check_finite(&data)?;
        let inner = JenksClassification::new(&data, max_classes).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Boundaries for `n_classes` classes (1..=max_classes).
    pub fn breaks(&self, n_classes: usize) -> PyResult<Vec<f64>> {
        self.inner
            .breaks(n_classes)
            .map(|b| b.into_vec())
            .map_err(to_py_err)
    }

    /// Goodness of variance fit in [0.0, 1.0] for `n_classes` classes.
    pub fn goodness_of_variance_fit(&self, n_classes: usize) -> PyResult<f64> {
        self.inner
            .goodness_of_variance_fit(n_classes)
            .map_err(to_py_err)
    }

    /// Largest class count this classification answers.
    #[getter]
    pub fn max_classes(&self) -> usize {
        self.inner.max_classes()
    }

    /// Number of classified values.
    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "Classification(values={}, max_classes={})",
            self.inner.len(),
            self.inner.max_classes()
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Jenks natural breaks optimization.
#[pymodule]
pub fn jenks_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(jenks, m)?)?;
    m.add_class::<PyClassification>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DEFAULT_CLASS_COUNT", DEFAULT_CLASS_COUNT)?;
    Ok(())
}
