//! Symmetric positive-definite matrices with the affine-invariant metric.
//!
//! Purpose
//! -------
//! Provide `SymmetricPositiveDefinite(k)`, the manifold of `k × k` SPD
//! matrices, as the geometry that [`SymmetricNegativeDefinite`] mirrors by
//! sign inversion.
//!
//! Key behaviors
//! -------------
//! - Metric: `⟨X, Y⟩_P = tr(P⁻¹ X P⁻¹ Y)`.
//! - `exp_P(X) = P^{½} Exp(P^{-½} X P^{-½}) P^{½}` and
//!   `log_P(Q) = P^{½} Log(P^{-½} Q P^{-½}) P^{½}`.
//! - Parallel transport `X ↦ E X Eᵀ` with
//!   `E = (Q P⁻¹)^{½} = P^{½} (P^{-½} Q P^{-½})^{½} P^{-½}`.
//! - Tangent projection is symmetrization.
//!
//! Conventions
//! -----------
//! - The `*_matrix` kernels accept any [`MatrixAccess`] so callers can pass a
//!   [`Negated`](super::negated::Negated) view; they return owned
//!   `ndarray::Array2`.
//! - Kernels take the manifold name used in `Domain` errors, so a negated
//!   caller reports its own name instead of this one.
//!
//! [`SymmetricNegativeDefinite`]: super::negative_definite::SymmetricNegativeDefinite
use crate::manifolds::{
    errors::{ManifoldError, ManifoldResult},
    negated::MatrixAccess,
    numerics::{
        min_eigenvalue, spectral_map, standard_normal_sym, sym_exp, sym_inv_sqrt, sym_log,
        sym_sqrt, symmetrize, to_array2, to_dmatrix,
    },
    point::Point,
    traits::Manifold,
    validation::{validate_finite, validate_square, validate_symmetric},
};
use nalgebra::DMatrix;
use ndarray::Array2;
use rand::RngCore;

const NAME: &str = "SymmetricPositiveDefinite";

#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricPositiveDefinite {
    k: usize,
}

impl SymmetricPositiveDefinite {
    /// Manifold of `k × k` SPD matrices.
    ///
    /// # Errors
    /// [`ManifoldError::InvalidSize`] if `k == 0`.
    pub fn new(k: usize) -> ManifoldResult<Self> {
        if k == 0 {
            return Err(ManifoldError::InvalidSize { size: k, reason: "k must be > 0" });
        }
        Ok(SymmetricPositiveDefinite { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Check shape, finiteness, symmetry and strict positive-definiteness.
    pub fn check_matrix<M: MatrixAccess + ?Sized>(
        &self, p: &M, manifold: &'static str,
    ) -> ManifoldResult<()> {
        self.check_tangent_matrix(p, manifold)?;
        let lambda_min = min_eigenvalue(&to_dmatrix(p));
        if !(lambda_min > 0.0) {
            return Err(ManifoldError::Domain {
                manifold,
                reason: format!("smallest eigenvalue {lambda_min:e} is not strictly positive"),
            });
        }
        Ok(())
    }

    /// Check that `x` is a finite symmetric `k × k` matrix.
    pub fn check_tangent_matrix<M: MatrixAccess + ?Sized>(
        &self, x: &M, manifold: &'static str,
    ) -> ManifoldResult<()> {
        let (rows, cols) = x.dims();
        if (rows, cols) != (self.k, self.k) {
            return Err(ManifoldError::ShapeMismatch {
                expected: vec![self.k, self.k],
                found: vec![rows, cols],
            });
        }
        validate_finite((0..rows).flat_map(|i| (0..cols).map(move |j| x.get(i, j))))?;
        validate_symmetric(x, manifold)
    }

    /// `tr(P⁻¹ X P⁻¹ Y)`
    pub fn inner_matrix<P, X, Y>(&self, p: &P, x: &X, y: &Y) -> ManifoldResult<f64>
    where
        P: MatrixAccess + ?Sized,
        X: MatrixAccess + ?Sized,
        Y: MatrixAccess + ?Sized,
    {
        let p_inv = spectral_map(&to_dmatrix(p), true, |l| 1.0 / l)?;
        let lhs = &p_inv * to_dmatrix(x);
        let rhs = &p_inv * to_dmatrix(y);
        Ok((lhs * rhs).trace())
    }

    pub fn exp_matrix<P, X>(&self, p: &P, x: &X) -> ManifoldResult<Array2<f64>>
    where
        P: MatrixAccess + ?Sized,
        X: MatrixAccess + ?Sized,
    {
        let (sqrt_p, inv_sqrt_p) = self.half_powers(p)?;
        let inner = &inv_sqrt_p * to_dmatrix(x) * &inv_sqrt_p;
        let out = &sqrt_p * sym_exp(&inner)? * &sqrt_p;
        Ok(to_array2(&symmetrize(&out)))
    }

    pub fn log_matrix<P, Q>(&self, p: &P, q: &Q) -> ManifoldResult<Array2<f64>>
    where
        P: MatrixAccess + ?Sized,
        Q: MatrixAccess + ?Sized,
    {
        let (sqrt_p, inv_sqrt_p) = self.half_powers(p)?;
        let inner = &inv_sqrt_p * to_dmatrix(q) * &inv_sqrt_p;
        let out = &sqrt_p * sym_log(&inner)? * &sqrt_p;
        Ok(to_array2(&symmetrize(&out)))
    }

    pub fn transport_matrix<P, Q, X>(&self, p: &P, q: &Q, x: &X) -> ManifoldResult<Array2<f64>>
    where
        P: MatrixAccess + ?Sized,
        Q: MatrixAccess + ?Sized,
        X: MatrixAccess + ?Sized,
    {
        let (sqrt_p, inv_sqrt_p) = self.half_powers(p)?;
        let inner = &inv_sqrt_p * to_dmatrix(q) * &inv_sqrt_p;
        let e = &sqrt_p * sym_sqrt(&inner)? * &inv_sqrt_p;
        let out = &e * to_dmatrix(x) * e.transpose();
        Ok(to_array2(&symmetrize(&out)))
    }

    /// `(X + Xᵀ) / 2`
    pub fn project_matrix<X: MatrixAccess + ?Sized>(&self, x: &X) -> Array2<f64> {
        to_array2(&symmetrize(&to_dmatrix(x)))
    }

    fn half_powers<P: MatrixAccess + ?Sized>(
        &self, p: &P,
    ) -> ManifoldResult<(DMatrix<f64>, DMatrix<f64>)> {
        let p = to_dmatrix(p);
        Ok((sym_sqrt(&p)?, sym_inv_sqrt(&p)?))
    }

    fn matrix_point<'a>(&self, p: &'a Point) -> ManifoldResult<&'a Array2<f64>> {
        let m = p.as_matrix()?;
        self.check_matrix(m, NAME)?;
        Ok(m)
    }

    fn matrix_tangent<'a>(&self, x: &'a Point) -> ManifoldResult<&'a Array2<f64>> {
        let m = x.as_matrix()?;
        validate_square(m, self.k)?;
        validate_symmetric(m, NAME)?;
        Ok(m)
    }
}

impl Manifold for SymmetricPositiveDefinite {
    fn name(&self) -> &'static str {
        NAME
    }

    fn manifold_dimension(&self) -> usize {
        self.k * (self.k + 1) / 2
    }

    fn representation_size(&self) -> usize {
        self.k * self.k
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        self.matrix_point(p).map(|_| ())
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.matrix_point(p)?;
        self.matrix_tangent(x).map(|_| ())
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        let p = self.matrix_point(p)?;
        self.inner_matrix(p, self.matrix_tangent(x)?, self.matrix_tangent(y)?)
    }

    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        Ok(Point::Matrix(self.exp_matrix(p, self.matrix_tangent(x)?)?))
    }

    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        Ok(Point::Matrix(self.log_matrix(p, self.matrix_point(q)?)?))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.matrix_point(p)?;
        let x = x.as_matrix()?;
        validate_square(x, self.k)?;
        Ok(Point::Matrix(self.project_matrix(x)))
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        let q = self.matrix_point(q)?;
        Ok(Point::Matrix(self.transport_matrix(p, q, self.matrix_tangent(x)?)?))
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.matrix_point(p)?;
        Ok(Point::Matrix(Array2::zeros((self.k, self.k))))
    }

    /// `Exp(S)` for a random symmetric `S`; always SPD.
    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        let s = to_dmatrix(&standard_normal_sym(self.k, rng));
        match sym_exp(&s) {
            Ok(p) => Point::Matrix(to_array2(&p)),
            Err(_) => Point::Matrix(Array2::eye(self.k)),
        }
    }

    /// `P^{½} S P^{½}` for a random symmetric `S`.
    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        let (sqrt_p, _) = self.half_powers(p)?;
        let s = to_dmatrix(&standard_normal_sym(self.k, rng));
        Ok(Point::Matrix(to_array2(&symmetrize(&(&sqrt_p * s * &sqrt_p)))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Membership (symmetry, definiteness, shape).
    // - exp/log inverse pair and the closed-form distance.
    // - Isometry of parallel transport.
    // -------------------------------------------------------------------------

    fn assert_arrays_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, epsilon = tol);
        }
    }

    #[test]
    fn rejects_zero_size() {
        assert!(matches!(
            SymmetricPositiveDefinite::new(0),
            Err(ManifoldError::InvalidSize { size: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Membership accepts SPD input and rejects indefinite or asymmetric input
    // with a `Domain` error.
    fn membership() {
        let m = SymmetricPositiveDefinite::new(2).unwrap();
        assert!(m.is_point(&Point::Matrix(array![[4.0, 1.0], [1.0, 3.0]])));
        assert!(matches!(
            m.check_point(&Point::Matrix(array![[1.0, 2.0], [2.0, 1.0]])),
            Err(ManifoldError::Domain { .. })
        ));
        assert!(matches!(
            m.check_point(&Point::Matrix(array![[2.0, 0.5], [0.0, 2.0]])),
            Err(ManifoldError::Domain { .. })
        ));
        assert!(matches!(
            m.check_point(&Point::Matrix(Array2::eye(3))),
            Err(ManifoldError::ShapeMismatch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `exp_P(log_P(Q)) = Q` and `d(P, Q) = ‖Log(P^{-½} Q P^{-½})‖_F`.
    //
    // Given
    // -----
    // - P = diag(1, 1) so the distance reduces to ‖Log(Q)‖_F.
    fn exp_log_inverse_and_distance() {
        let m = SymmetricPositiveDefinite::new(2).unwrap();
        let p = Point::Matrix(array![[4.0, 1.0], [1.0, 3.0]]);
        let q = Point::Matrix(array![[5.0, 0.5], [0.5, 4.0]]);
        let x = m.log(&p, &q).unwrap();
        let back = m.exp(&p, &x).unwrap();
        assert_arrays_close(back.as_matrix().unwrap(), q.as_matrix().unwrap(), 1e-10);

        let id = Point::Matrix(Array2::eye(2));
        let diag = Point::Matrix(array![[std::f64::consts::E, 0.0], [0.0, 1.0]]);
        assert_relative_eq!(m.distance(&id, &diag).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn transport_preserves_norm() {
        let m = SymmetricPositiveDefinite::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let p = m.random_point(&mut rng);
        let q = m.random_point(&mut rng);
        let x = m.random_tangent(&p, &mut rng).unwrap();
        let moved = m.parallel_transport(&p, &q, &x).unwrap();
        assert_relative_eq!(
            m.norm(&p, &x).unwrap(),
            m.norm(&q, &moved).unwrap(),
            epsilon = 1e-8,
            max_relative = 1e-8
        );
    }

    #[test]
    fn random_points_are_members() {
        let m = SymmetricPositiveDefinite::new(4).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let p = m.random_point(&mut rng);
            assert!(m.is_point(&p));
        }
    }
}
