//! expfam_manifolds — natural-parameter manifolds for exponential families.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the family registry to Python via the `_expfam_manifolds` extension module.
//! Given a distribution type and its dimensionality, the crate answers "which
//! Riemannian manifold do this family's natural parameters live on?" and moves
//! flat natural-parameter vectors onto that manifold's point representation
//! and back.
//!
//! Key behaviors
//! -------------
//! - [`manifolds`]: the [`Manifold`](manifolds::Manifold) trait, the spaces
//!   the registry delegates to, and the custom primitives
//!   (`ShiftedPositiveNumbers`, `ShiftedNegativeNumbers`,
//!   `SymmetricNegativeDefinite`, the zero-copy `Negated` view).
//! - [`natural`]: the distribution → manifold registry,
//!   `NaturalParametersManifold` and the entry points `get_natural_manifold`,
//!   `get_natural_manifold_base`, `partition_point` and `flatten_point`.
//! - With `python-bindings`, a `NaturalManifold` class wrapping
//!   `NaturalParametersManifold`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - The number of entries of a flat natural-parameter vector equals the
//!   intrinsic dimension of the family's base manifold.
//!
//! Conventions
//! -----------
//! - Errors are rich enums internally ([`manifolds::ManifoldError`],
//!   [`natural::NaturalError`]) and become `ValueError` at the PyO3 boundary.
//! - Structured points cross into Python as nested lists: a vector is a list,
//!   a matrix a list of rows, a product a list of parts.
//!
//! Feature flags
//! -------------
//! - `python-bindings`: PyO3 class and module initializer.
//! - `obs_slog`: `slog` records from the registry and a terminal logger in
//!   [`utils`].
//!
//! Testing notes
//! -------------
//! - Geometry and layout behavior is covered by unit tests in the inner
//!   modules and by `tests/integration_natural_manifolds.rs`.

pub mod manifolds;
pub mod natural;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    manifolds::traits::Manifold,
    natural::{Distribution, NaturalParametersManifold, get_natural_manifold},
    utils::{extract_conditioner, extract_f64_vector, point_from_py, point_to_py},
};

/// NaturalManifold — Python-facing wrapper for [`NaturalParametersManifold`].
///
/// Purpose
/// -------
/// Let Python callers resolve the natural-parameter manifold of a family and
/// translate parameter vectors to and from its point layout.
///
/// Parameters
/// ----------
/// Constructed from Python via `NaturalManifold(distribution, dims=(), conditioner=None)`:
/// - `distribution`: `str`
///   Family name, case-insensitive (e.g. `"Beta"`, `"MvNormalMeanCovariance"`).
/// - `dims`: `tuple[int, ...]`
///   `()` for univariate families, `(k,)` for vector families.
/// - `conditioner`: `float | array-like | None`
///   Optional fixed auxiliary parameter, stored unchanged.
///
/// Notes
/// -----
/// - Rust callers should use [`get_natural_manifold`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "expfam_manifolds")]
pub struct NaturalManifold {
    inner: NaturalParametersManifold,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl NaturalManifold {
    #[new]
    #[pyo3(
        signature = (distribution, dims = Vec::new(), conditioner = None),
        text_signature = "(distribution, dims=(), conditioner=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, distribution: &str, dims: Vec<usize>,
        conditioner: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Self> {
        let distribution: Distribution = distribution.parse()?;
        let conditioner = extract_conditioner(py, conditioner)?;
        let inner = get_natural_manifold(distribution, &dims, conditioner)?;
        Ok(NaturalManifold { inner })
    }

    /// Number of natural parameters.
    #[getter]
    pub fn dimension(&self) -> usize {
        self.inner.manifold_dimension()
    }

    #[getter]
    pub fn distribution(&self) -> String {
        self.inner.distribution().to_string()
    }

    /// Name of the resolved base manifold (e.g. `"ProductManifold"`).
    #[getter]
    pub fn base(&self) -> &'static str {
        self.inner.base().name()
    }

    /// Split a flat parameter vector into nested lists matching the base layout.
    pub fn partition_point<'py>(
        &self, py: Python<'py>, point: &Bound<'py, PyAny>,
    ) -> PyResult<PyObject> {
        let flat = extract_f64_vector(py, point)?;
        let partitioned = self.inner.partition_point(flat.view())?;
        point_to_py(py, &partitioned)
    }

    /// Inverse of `partition_point`.
    pub fn flatten_point<'py>(
        &self, py: Python<'py>, point: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let structured = point_from_py(py, self.inner.base(), point)?;
        Ok(self.inner.flatten_point(&structured)?.to_vec())
    }

    /// `True` iff the flat vector lies in the natural-parameter domain.
    pub fn is_point<'py>(&self, py: Python<'py>, point: &Bound<'py, PyAny>) -> PyResult<bool> {
        let flat = extract_f64_vector(py, point)?;
        if flat.len() != self.inner.manifold_dimension() {
            return Err(PyValueError::new_err(format!(
                "expected {} natural parameters, found {}",
                self.inner.manifold_dimension(),
                flat.len()
            )));
        }
        Ok(self.inner.check_natural_point(flat.view()).is_ok())
    }

    fn __repr__(&self) -> String {
        format!(
            "NaturalManifold(distribution={:?}, dims={:?}, dimension={})",
            self.inner.distribution().to_string(),
            self.inner.dims(),
            self.inner.manifold_dimension()
        )
    }
}

/// _expfam_manifolds — PyO3 module initializer for the Python extension.
///
/// Registers [`NaturalManifold`] and a `supported_distributions()` helper.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _expfam_manifolds<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<NaturalManifold>()?;
    m.add_function(wrap_pyfunction!(supported_distributions, m)?)?;
    Ok(())
}

/// Names of the families registered by default.
#[cfg(feature = "python-bindings")]
#[pyfunction]
fn supported_distributions() -> Vec<String> {
    crate::natural::default_registry()
        .distributions()
        .into_iter()
        .map(|d| d.to_string())
        .collect()
}
