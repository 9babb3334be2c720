//! numerics — tolerances and eigen-based matrix functions.
//!
//! Purpose
//! -------
//! Centralize the small numerical tolerances used by membership checks and
//! the symmetric matrix functions (`sqrt`, `inv_sqrt`, `exp`, `log`) that the
//! affine-invariant SPD geometry is built from.
//!
//! Conventions
//! -----------
//! - Public arrays are `ndarray`; eigen-decompositions run on
//!   `nalgebra::DMatrix` via [`to_dmatrix`] / [`to_array2`], which are the only
//!   places that copy between the two libraries.
//! - Inputs are read through [`MatrixAccess`], so a lazily negated view can be
//!   decomposed without first building a negated `Array2`.
//! - Matrix functions symmetrize their input before decomposing; callers are
//!   expected to have checked symmetry already.
use crate::manifolds::{
    errors::{ManifoldError, ManifoldResult},
    negated::MatrixAccess,
};
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2};
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

/// Absolute/relative tolerance for `|m_ij - m_ji|` in symmetry checks.
pub const SYMMETRY_TOL: f64 = 1e-10;

/// Eigenvalues at or below this value are treated as non-positive when a
/// matrix function requires a strictly positive spectrum.
pub const EIGEN_EPS: f64 = 1e-300;

/// Copy any [`MatrixAccess`] into an owned `DMatrix`.
pub fn to_dmatrix<M: MatrixAccess + ?Sized>(m: &M) -> DMatrix<f64> {
    let (rows, cols) = m.dims();
    DMatrix::from_fn(rows, cols, |i, j| m.get(i, j))
}

/// Copy a `DMatrix` back into an `ndarray::Array2`.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn(m.shape(), |(i, j)| m[(i, j)])
}

/// `(m + mᵀ) / 2`.
pub fn symmetrize(m: &DMatrix<f64>) -> DMatrix<f64> {
    (m + m.transpose()) * 0.5
}

/// Largest symmetric deviation `max |m_ij - m_ji|`, relative to `max(1, max |m_ij|)`.
pub fn asymmetry<M: MatrixAccess + ?Sized>(m: &M) -> f64 {
    let (rows, _) = m.dims();
    let mut scale: f64 = 1.0;
    let mut worst: f64 = 0.0;
    for i in 0..rows {
        for j in 0..rows {
            let a = m.get(i, j);
            scale = scale.max(a.abs());
            if j > i {
                worst = worst.max((a - m.get(j, i)).abs());
            }
        }
    }
    worst / scale
}

/// Apply a scalar function to the spectrum of a symmetric matrix:
/// `V diag(f(λ)) Vᵀ`.
///
/// `positive` requires every eigenvalue to exceed [`EIGEN_EPS`]; used by the
/// functions (`log`, `sqrt`, inverse square root) that are only defined on
/// SPD inputs.
pub fn spectral_map<F>(m: &DMatrix<f64>, positive: bool, f: F) -> ManifoldResult<DMatrix<f64>>
where
    F: Fn(f64) -> f64,
{
    let eig = SymmetricEigen::new(symmetrize(m));
    if positive {
        if let Some(&bad) = eig.eigenvalues.iter().find(|&&l| !(l > EIGEN_EPS)) {
            return Err(ManifoldError::Decomposition {
                reason: format!("eigenvalue {bad} is not strictly positive"),
            });
        }
    }
    let mapped = eig.eigenvalues.map(f);
    let v = &eig.eigenvectors;
    Ok(symmetrize(&(v * DMatrix::from_diagonal(&mapped) * v.transpose())))
}

pub fn sym_sqrt(m: &DMatrix<f64>) -> ManifoldResult<DMatrix<f64>> {
    spectral_map(m, true, f64::sqrt)
}

pub fn sym_inv_sqrt(m: &DMatrix<f64>) -> ManifoldResult<DMatrix<f64>> {
    spectral_map(m, true, |l| 1.0 / l.sqrt())
}

pub fn sym_log(m: &DMatrix<f64>) -> ManifoldResult<DMatrix<f64>> {
    spectral_map(m, true, f64::ln)
}

pub fn sym_exp(m: &DMatrix<f64>) -> ManifoldResult<DMatrix<f64>> {
    spectral_map(m, false, f64::exp)
}

/// Smallest eigenvalue of the symmetric part of `m`.
pub fn min_eigenvalue(m: &DMatrix<f64>) -> f64 {
    SymmetricEigen::new(symmetrize(m)).eigenvalues.iter().copied().fold(f64::INFINITY, f64::min)
}

/// `n` independent standard-normal draws.
pub fn standard_normal_vec(n: usize, rng: &mut dyn RngCore) -> Array1<f64> {
    Array1::from_shape_fn(n, |_| StandardNormal.sample(rng))
}

/// Random symmetric `k × k` matrix `(A + Aᵀ) / 2` with standard-normal `A`.
pub fn standard_normal_sym(k: usize, rng: &mut dyn RngCore) -> Array2<f64> {
    let a: Array2<f64> = Array2::from_shape_fn((k, k), |_| StandardNormal.sample(rng));
    (&a + &a.t()) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifolds::negated::Negated;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn assert_dmatrix_close(a: &DMatrix<f64>, b: &DMatrix<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_relative_eq!(a[(i, j)], b[(i, j)], epsilon = tol);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // `sym_sqrt(m)²` reproduces `m` and `exp(log(m))` reproduces `m` for an
    // SPD input.
    fn matrix_functions_are_consistent() {
        let m = to_dmatrix(&array![[4.0, 1.0], [1.0, 3.0]]);
        let s = sym_sqrt(&m).unwrap();
        assert_dmatrix_close(&(&s * &s), &m, 1e-12);

        let back = sym_exp(&sym_log(&m).unwrap()).unwrap();
        assert_dmatrix_close(&back, &m, 1e-12);

        let is = sym_inv_sqrt(&m).unwrap();
        assert_dmatrix_close(&(&is * &m * &is), &DMatrix::identity(2, 2), 1e-12);
    }

    #[test]
    fn log_rejects_indefinite_input() {
        let m = to_dmatrix(&array![[1.0, 0.0], [0.0, -1.0]]);
        assert!(matches!(sym_log(&m), Err(ManifoldError::Decomposition { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A negated view converts to the negated matrix without an intermediate
    // array.
    fn to_dmatrix_reads_through_views() {
        let m = array![[-2.0, 0.5], [0.5, -1.0]];
        let d = to_dmatrix(&Negated::new(&m));
        assert_eq!(d[(0, 0)], 2.0);
        assert_eq!(d[(0, 1)], -0.5);
        assert!(min_eigenvalue(&d) > 0.0);
        assert_eq!(to_array2(&d), m.mapv(|x| -x));
    }

    #[test]
    fn asymmetry_detects_skew() {
        assert_eq!(asymmetry(&array![[1.0, 2.0], [2.0, 1.0]]), 0.0);
        assert!(asymmetry(&array![[1.0, 2.0], [2.5, 1.0]]) > SYMMETRY_TOL);
    }
}
