//! Shared shape and finiteness checks for manifold points.
//!
//! These helpers return [`ManifoldResult`] and never panic; each manifold's
//! `check_point` composes them before testing its own defining constraint.
use crate::manifolds::{
    errors::{ManifoldError, ManifoldResult},
    negated::MatrixAccess,
    numerics::{SYMMETRY_TOL, asymmetry},
};
use ndarray::{Array1, Array2};

/// Require a vector of exactly `n` finite entries.
pub fn validate_vector(v: &Array1<f64>, n: usize) -> ManifoldResult<()> {
    if v.len() != n {
        return Err(ManifoldError::ShapeMismatch { expected: vec![n], found: vec![v.len()] });
    }
    validate_finite(v.iter().copied())
}

/// Require a `k × k` matrix of finite entries.
pub fn validate_square(m: &Array2<f64>, k: usize) -> ManifoldResult<()> {
    if m.dim() != (k, k) {
        return Err(ManifoldError::ShapeMismatch {
            expected: vec![k, k],
            found: m.shape().to_vec(),
        });
    }
    validate_finite(m.iter().copied())
}

/// Require `|m_ij - m_ji| ≤ SYMMETRY_TOL · max(1, max |m|)`.
///
/// Reports a `Domain` error naming `manifold`, since asymmetry means the point
/// is off the manifold rather than malformed.
pub fn validate_symmetric<M: MatrixAccess + ?Sized>(
    m: &M, manifold: &'static str,
) -> ManifoldResult<()> {
    let dev = asymmetry(m);
    if dev > SYMMETRY_TOL {
        return Err(ManifoldError::Domain {
            manifold,
            reason: format!("matrix is not symmetric (relative deviation {dev:e})"),
        });
    }
    Ok(())
}

/// Require every value to be finite; reports the first offender.
pub fn validate_finite<I: IntoIterator<Item = f64>>(values: I) -> ManifoldResult<()> {
    match values.into_iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, value)) => Err(ManifoldError::NonFinite { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn vector_length_and_finiteness() {
        assert!(validate_vector(&array![1.0, 2.0], 2).is_ok());
        assert_eq!(
            validate_vector(&array![1.0], 2),
            Err(ManifoldError::ShapeMismatch { expected: vec![2], found: vec![1] })
        );
        assert!(matches!(
            validate_vector(&array![1.0, f64::NAN], 2),
            Err(ManifoldError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn square_shape_is_enforced() {
        assert!(validate_square(&Array2::eye(3), 3).is_ok());
        assert!(matches!(
            validate_square(&Array2::zeros((2, 3)), 2),
            Err(ManifoldError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn asymmetric_matrix_is_a_domain_error() {
        let m = array![[1.0, 0.2], [0.1, 1.0]];
        assert!(matches!(
            validate_symmetric(&m, "SymmetricPositiveDefinite"),
            Err(ManifoldError::Domain { manifold: "SymmetricPositiveDefinite", .. })
        ));
    }
}
