//! Conversion helpers for the PyO3 boundary and the optional terminal logger.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyList},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::{
    manifolds::{base::BaseManifold, point::Point},
    natural::distribution::Conditioner,
};

#[cfg(feature = "obs_slog")]
use slog::{Drain, Level, Logger, o};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python 1-D float sequence into an owned `Array1`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("expected a 1-D contiguous float64 array or sequence")
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// `None` → no conditioner, a float → scalar, anything array-like → vector.
#[cfg(feature = "python-bindings")]
pub fn extract_conditioner<'py>(
    py: Python<'py>, raw: Option<&Bound<'py, PyAny>>,
) -> PyResult<Conditioner> {
    match raw {
        None => Ok(Conditioner::None),
        Some(obj) if obj.is_none() => Ok(Conditioner::None),
        Some(obj) => {
            if let Ok(value) = obj.extract::<f64>() {
                return Ok(Conditioner::Scalar(value));
            }
            Ok(Conditioner::Vector(extract_f64_vector(py, obj)?))
        }
    }
}

/// Vector → list, matrix → list of rows, product → list of parts.
#[cfg(feature = "python-bindings")]
pub fn point_to_py(py: Python<'_>, point: &Point) -> PyResult<PyObject> {
    let list = match point {
        Point::Vector(v) => PyList::new(py, v.iter().copied())?,
        Point::Matrix(m) => {
            let rows: Vec<Vec<f64>> = m.rows().into_iter().map(|row| row.to_vec()).collect();
            PyList::new(py, rows)?
        }
        Point::Product(parts) => {
            let items = parts.iter().map(|p| point_to_py(py, p)).collect::<PyResult<Vec<_>>>()?;
            PyList::new(py, items)?
        }
    };
    Ok(list.into_any().unbind())
}

/// Inverse of [`point_to_py`], guided by the structure of `base`.
#[cfg(feature = "python-bindings")]
pub fn point_from_py<'py>(
    py: Python<'py>, base: &BaseManifold, raw: &Bound<'py, PyAny>,
) -> PyResult<Point> {
    match base {
        BaseManifold::Product(product) => {
            let items: Vec<Bound<'py, PyAny>> = raw.extract()?;
            let factors = product.factors();
            if items.len() != factors.len() {
                return Err(PyValueError::new_err(format!(
                    "expected {} parts, found {}",
                    factors.len(),
                    items.len()
                )));
            }
            let parts = factors
                .iter()
                .zip(items.iter())
                .map(|(f, item)| point_from_py(py, f, item))
                .collect::<PyResult<Vec<_>>>()?;
            Ok(Point::Product(parts))
        }
        BaseManifold::SymmetricPositiveDefinite(_) | BaseManifold::SymmetricNegativeDefinite(_) => {
            let rows: Vec<Vec<f64>> = raw.extract()?;
            let n_rows = rows.len();
            let n_cols = rows.first().map_or(0, Vec::len);
            let flat: Vec<f64> = rows.into_iter().flatten().collect();
            let m = Array2::from_shape_vec((n_rows, n_cols), flat)
                .map_err(|_| PyValueError::new_err("matrix rows must have equal length"))?;
            Ok(Point::Matrix(m))
        }
        _ => Ok(Point::Vector(extract_f64_vector(py, raw)?)),
    }
}

/// Terminal logger (stderr, asynchronous drain) filtered at `level`.
///
/// Pass it to
/// [`ManifoldRegistry::with_logger`](crate::natural::registry::ManifoldRegistry::with_logger)
/// to see resolve/partition records.
#[cfg(feature = "obs_slog")]
pub fn terminal_logger(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().filter_level(level).fuse();
    Logger::root(drain, o!())
}
