//! natural::errors — error surface for the family registry.
//!
//! Purpose
//! -------
//! Define [`NaturalError`] and the [`NaturalResult`] alias returned by the
//! resolver, the partitioner and [`NaturalParametersManifold`] construction.
//!
//! Conventions
//! -----------
//! - `InvalidDims` is the argument-error class: the caller passed a `dims`
//!   tuple the family cannot use.
//! - Geometry failures keep their [`ManifoldError`] payload via
//!   `NaturalError::Manifold`, so a `DomainError` raised by a base manifold
//!   is still recognizable after crossing this layer.
//! - Converted to `PyValueError` at the PyO3 boundary.
//!
//! [`NaturalParametersManifold`]: crate::natural::manifold::NaturalParametersManifold
use crate::{manifolds::errors::ManifoldError, natural::distribution::Distribution};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for registry operations.
pub type NaturalResult<T> = Result<T, NaturalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum NaturalError {
    // ---- Dispatch ----
    /// No handler is registered for the distribution tag.
    UnsupportedDistribution { distribution: Distribution },

    /// A family name could not be parsed into a [`Distribution`].
    UnknownDistribution { name: String },

    // ---- Arguments ----
    /// `dims` does not have the arity/values the family expects.
    InvalidDims { distribution: Distribution, expected: &'static str, found: Vec<usize> },

    /// Flat parameter vector has the wrong number of entries.
    DimensionMismatch { expected: usize, found: usize },

    /// Structured point does not match the base manifold's layout.
    PointLayout { distribution: Distribution, reason: String },

    // ---- Geometry ----
    Manifold(ManifoldError),
}

impl std::error::Error for NaturalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NaturalError::Manifold(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for NaturalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dispatch ----
            NaturalError::UnsupportedDistribution { distribution } => {
                write!(f, "UnsupportedDistribution: no natural manifold registered for {distribution}")
            }
            NaturalError::UnknownDistribution { name } => {
                write!(f, "Unknown distribution name {name:?}")
            }
            // ---- Arguments ----
            NaturalError::InvalidDims { distribution, expected, found } => {
                write!(
                    f,
                    "ArgumentError: {distribution} expects dims {expected}, got {found:?}"
                )
            }
            NaturalError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "DimensionMismatch: expected {expected} natural parameters, found {found}"
                )
            }
            NaturalError::PointLayout { distribution, reason } => {
                write!(f, "Point does not match the {distribution} layout: {reason}")
            }
            // ---- Geometry ----
            NaturalError::Manifold(err) => write!(f, "{err}"),
        }
    }
}

impl From<ManifoldError> for NaturalError {
    fn from(err: ManifoldError) -> Self {
        NaturalError::Manifold(err)
    }
}

/// Convert a [`NaturalError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<NaturalError> for PyErr {
    fn from(err: NaturalError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
