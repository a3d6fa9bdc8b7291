//! Python FFI bindings via PyO3.
//!
//! Exposes the PARC engine to Python. Python callers pass plain floats and
//! keyword arguments; every value is checked here, at the boundary, before it
//! reaches the engine.
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
//! import parc_core
//!
//! v = parc_core.encode("Congress makes laws because the bill is approved.")
//! print(v)                      # ParcVector(c=0.2500, m=0.0000, f=0.7500, k=0.5000)
//!
//! v = parc_core.update(v, steps=3, gamma=0.3, delta=0.1, beta=0.5, rho=0.5)
//! print(v.diagnosis())          # "High fog: learner is uncertain / incomplete."
//!
//! report = parc_core.validate(c=0.5, m=0.3, f=0.2, k=0.5)
//! print(report.valid, report.errors)   # False ['fog must equal 1 - max(c,m)']
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::diagnosis::{Diagnosis, DiagnosisThresholds};
use crate::dynamics::{self, UpdateParams};
use crate::encoder;
use crate::error::ParcError;
use crate::record::{self, ParamsRecord, VectorRecord};
use crate::validate::validate as validate_record;
use crate::vector::{self, ParcVector as RustParcVector};

fn to_py_err(e: ParcError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ── ParcVector ───────────────────────────────────────────────────────────────

/// Normalized PARC state: correctness, misconception, fog, confidence.
///
/// Instances are immutable. Build them with `encode()` or `normalize()`.
#[pyclass(name = "ParcVector", frozen)]
#[derive(Clone)]
pub struct PyParcVector {
    inner: RustParcVector,
}

#[pymethods]
impl PyParcVector {
    /// Correctness in [0.0, 1.0].
    #[getter]
    pub fn c(&self) -> f64 {
        self.inner.c()
    }
    /// Misconception in [0.0, 1.0].
    #[getter]
    pub fn m(&self) -> f64 {
        self.inner.m()
    }
    /// Fog in [0.0, 1.0]; always 1 - max(c, m).
    #[getter]
    pub fn f(&self) -> f64 {
        self.inner.f()
    }
    /// Confidence in [0.0, 1.0].
    #[getter]
    pub fn k(&self) -> f64 {
        self.inner.k()
    }

    /// Components as a (c, m, f, k) tuple.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        self.inner.as_tuple()
    }

    /// Components rounded to `digits` places, as a dict for JSON output.
    #[pyo3(signature = (digits=4))]
    pub fn to_dict(&self, digits: u32) -> std::collections::HashMap<&'static str, f64> {
        let r = self.inner.rounded(digits);
        [("c", r.c), ("m", r.m), ("f", r.f), ("k", r.k)]
            .into_iter()
            .filter_map(|(name, v)| v.map(|v| (name, v)))
            .collect()
    }

    /// Interpretation with the default thresholds.
    pub fn diagnosis(&self) -> &'static str {
        Diagnosis::classify(&self.inner, &DiagnosisThresholds::default()).summary()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "ParcVector(c={:.4}, m={:.4}, f={:.4}, k={:.4})",
            self.inner.c(),
            self.inner.m(),
            self.inner.f(),
            self.inner.k(),
        )
    }

    /// Python equality comparison.
    pub fn __eq__(&self, other: &PyParcVector) -> bool {
        self.inner == other.inner
    }
}

// ── ValidationReport ─────────────────────────────────────────────────────────

/// Result of `validate()`: `valid` plus the ordered list of error messages.
#[pyclass(name = "ValidationReport", frozen)]
pub struct PyValidationReport {
    #[pyo3(get)]
    valid: bool,
    #[pyo3(get)]
    errors: Vec<String>,
}

#[pymethods]
impl PyValidationReport {
    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("ValidationReport(valid={}, errors={:?})", self.valid, self.errors)
    }
}

// ── Functions ────────────────────────────────────────────────────────────────

/// Encode text into a normalized vector.
///
/// Args:
///     text:            free text to score
///     confidence_hint: optional confidence seed; defaults to 0.5
#[pyfunction]
#[pyo3(signature = (text, confidence_hint=None))]
pub fn encode(text: &str, confidence_hint: Option<f64>) -> PyResult<PyParcVector> {
    let hint = record::confidence_hint(confidence_hint).map_err(to_py_err)?;
    Ok(PyParcVector {
        inner: encoder::encode(text, hint),
    })
}

/// Encode many texts. Returns a list in input order.
#[pyfunction]
pub fn batch(texts: Vec<String>) -> Vec<PyParcVector> {
    encoder::encode_batch(&texts)
        .into_iter()
        .map(|inner| PyParcVector { inner })
        .collect()
}

/// Clamp and rescale a raw tuple into a valid vector. `f` is recomputed.
#[pyfunction]
#[pyo3(signature = (c, m, f=0.0, k=0.0))]
pub fn normalize(c: f64, m: f64, f: f64, k: f64) -> PyResult<PyParcVector> {
    let inner = VectorRecord::new(c, m, f, k).normalized().map_err(to_py_err)?;
    Ok(PyParcVector { inner })
}

/// Advance a vector through `steps` update steps.
///
/// Args:
///     vector: a ParcVector
///     steps:  number of steps, must be >= 0 (default 1)
///     gamma, delta, beta, rho: dynamics parameters in [0, 1]
#[pyfunction]
#[pyo3(signature = (vector, steps=1, gamma=None, delta=None, beta=None, rho=None))]
pub fn update(
    vector: &PyParcVector,
    steps: i64,
    gamma: Option<f64>,
    delta: Option<f64>,
    beta: Option<f64>,
    rho: Option<f64>,
) -> PyResult<PyParcVector> {
    let steps = record::steps_from_signed(steps).map_err(to_py_err)?;
    let params: UpdateParams = ParamsRecord { gamma, delta, beta, rho }
        .into_params()
        .map_err(to_py_err)?;
    Ok(PyParcVector {
        inner: dynamics::update(vector.inner, steps, &params),
    })
}

/// Check a vector given as keyword arguments. Never raises on bad vectors;
/// failures are reported in the returned ValidationReport.
#[pyfunction]
#[pyo3(signature = (c=None, m=None, f=None, k=None))]
pub fn validate(c: Option<f64>, m: Option<f64>, f: Option<f64>, k: Option<f64>) -> PyValidationReport {
    let report = validate_record(&VectorRecord { c, m, f, k });
    PyValidationReport {
        valid: report.valid,
        errors: report.messages(),
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// PARC state engine Python bindings.
///
/// Derive, normalize, evolve and validate (c, m, f, k) cognitive-state vectors.
#[pymodule]
pub fn parc_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyParcVector>()?;
    m.add_class::<PyValidationReport>()?;
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(batch, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(update, m)?)?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("FOG_TOLERANCE", vector::FOG_TOLERANCE)?;
    Ok(())
}
