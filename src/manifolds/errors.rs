//! manifolds::errors — error surface for manifold geometry operations.
//!
//! Purpose
//! -------
//! Define [`ManifoldError`] and the [`ManifoldResult`] alias shared by every
//! manifold in [`crate::manifolds`]: the upstream-style spaces (Euclidean,
//! positive numbers, SPD matrices, products) and the custom primitives built
//! on top of them (shifted half-lines, negative-definite matrices).
//!
//! Conventions
//! -----------
//! - `Domain` is the "point outside the manifold" condition (the
//!   `DomainError` class); everything else is a shape or usage problem.
//! - Messages name the manifold so that errors bubbling out of a product
//!   manifold still say which factor rejected the input.
//! - Converted to `PyValueError` at the PyO3 boundary.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for manifold operations.
pub type ManifoldResult<T> = Result<T, ManifoldError>;

/// Errors raised by manifold membership checks and geometric operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifoldError {
    // ---- Membership ----
    /// Point violates the manifold's defining constraint.
    Domain { manifold: &'static str, reason: String },

    /// An entry of a point or tangent vector is NaN/±inf.
    NonFinite { index: usize, value: f64 },

    // ---- Shape ----
    /// Array shape differs from the manifold's representation.
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },

    /// Point variant differs from what the manifold stores (vector/matrix/product).
    PointKind { expected: &'static str, found: &'static str },

    /// Product point has the wrong number of parts.
    FactorCountMismatch { expected: usize, found: usize },

    // ---- Construction ----
    /// Size parameter of a manifold is not admissible.
    InvalidSize { size: usize, reason: &'static str },

    /// Shift of a shifted half-line must be finite.
    InvalidShift { shift: f64 },

    // ---- Linear algebra ----
    /// Eigen-decomposition produced a value outside the expected domain.
    Decomposition { reason: String },
}

impl std::error::Error for ManifoldError {}

impl std::fmt::Display for ManifoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Membership ----
            ManifoldError::Domain { manifold, reason } => {
                write!(f, "DomainError: point is not on {manifold}: {reason}")
            }
            ManifoldError::NonFinite { index, value } => {
                write!(f, "Entry at index {index} must be finite, got {value}")
            }
            // ---- Shape ----
            ManifoldError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {expected:?}, found {found:?}")
            }
            ManifoldError::PointKind { expected, found } => {
                write!(f, "Point kind mismatch: expected {expected}, found {found}")
            }
            ManifoldError::FactorCountMismatch { expected, found } => {
                write!(f, "Product point must have {expected} parts, found {found}")
            }
            // ---- Construction ----
            ManifoldError::InvalidSize { size, reason } => {
                write!(f, "Invalid manifold size {size}: {reason}")
            }
            ManifoldError::InvalidShift { shift } => {
                write!(f, "Shift must be finite, got {shift}")
            }
            // ---- Linear algebra ----
            ManifoldError::Decomposition { reason } => {
                write!(f, "Eigen-decomposition failed: {reason}")
            }
        }
    }
}

/// Convert a [`ManifoldError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<ManifoldError> for PyErr {
    fn from(err: ManifoldError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display output carries the payload of each variant.
    fn display_embeds_payload() {
        let domain = ManifoldError::Domain {
            manifold: "ShiftedPositiveNumbers",
            reason: "x = -1 must be > -1".to_string(),
        };
        let msg = domain.to_string();
        assert!(msg.starts_with("DomainError"));
        assert!(msg.contains("ShiftedPositiveNumbers"));
        assert!(msg.contains("x = -1"));

        let shape = ManifoldError::ShapeMismatch { expected: vec![2, 2], found: vec![3] };
        assert!(shape.to_string().contains("[2, 2]"));
        assert!(shape.to_string().contains("[3]"));

        let size = ManifoldError::InvalidSize { size: 0, reason: "k must be > 0" };
        assert!(size.to_string().contains("k must be > 0"));
    }
}
