//! Symmetric negative-definite matrices.
//!
//! Purpose
//! -------
//! Provide `SymmetricNegativeDefinite(k)`, the manifold of `k × k` symmetric
//! matrices whose eigenvalues are all strictly negative. The second natural
//! parameter of a multivariate Normal (`-½Σ⁻¹`) lives here.
//!
//! Key behaviors
//! -------------
//! - Geometry is the pull-back of the affine-invariant SPD geometry under
//!   `P ↦ -P`: every operation wraps its arguments in [`Negated`] views,
//!   runs the matching SPD kernel and negates the result.
//! - `M` is accepted iff `SymmetricPositiveDefinite(k)` accepts `-M`;
//!   rejection is a `Domain` error naming this manifold.
//!
//! Invariants & assumptions
//! ------------------------
//! - `k > 0`; dimension `k(k+1)/2`; points and tangents are `k × k` matrices.
//! - Because negation is linear and the metric is bilinear,
//!   `⟨X, Y⟩_P = ⟨-X, -Y⟩^{SPD}_{-P} = ⟨X, Y⟩^{SPD}_{-P}`.
use crate::manifolds::{
    errors::ManifoldResult,
    negated::Negated,
    point::Point,
    spd::SymmetricPositiveDefinite,
    traits::Manifold,
    validation::{validate_square, validate_symmetric},
};
use ndarray::Array2;
use rand::RngCore;

const NAME: &str = "SymmetricNegativeDefinite";

#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricNegativeDefinite {
    spd: SymmetricPositiveDefinite,
}

impl SymmetricNegativeDefinite {
    /// Manifold of `k × k` symmetric negative-definite matrices.
    ///
    /// # Errors
    /// [`ManifoldError::InvalidSize`](crate::manifolds::errors::ManifoldError::InvalidSize)
    /// if `k == 0`.
    pub fn new(k: usize) -> ManifoldResult<Self> {
        Ok(SymmetricNegativeDefinite { spd: SymmetricPositiveDefinite::new(k)? })
    }

    pub fn k(&self) -> usize {
        self.spd.k()
    }

    fn matrix_point<'a>(&self, p: &'a Point) -> ManifoldResult<&'a Array2<f64>> {
        let m = p.as_matrix()?;
        self.spd.check_matrix(&Negated::new(m), NAME)?;
        Ok(m)
    }

    fn matrix_tangent<'a>(&self, x: &'a Point) -> ManifoldResult<&'a Array2<f64>> {
        let m = x.as_matrix()?;
        validate_square(m, self.k())?;
        validate_symmetric(m, NAME)?;
        Ok(m)
    }
}

impl Manifold for SymmetricNegativeDefinite {
    fn name(&self) -> &'static str {
        NAME
    }

    fn manifold_dimension(&self) -> usize {
        self.spd.manifold_dimension()
    }

    fn representation_size(&self) -> usize {
        self.spd.representation_size()
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
        let x = self.matrix_tangent(x)?;
        let y = self.matrix_tangent(y)?;
        self.spd.inner_matrix(&Negated::new(p), &Negated::new(x), &Negated::new(y))
    }

    /// `exp_P(X) = -exp^{SPD}_{-P}(-X)`
    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        let x = self.matrix_tangent(x)?;
        let out = self.spd.exp_matrix(&Negated::new(p), &Negated::new(x))?;
        Ok(Point::Matrix(Negated::new(&out).to_owned_array()))
    }

    /// `log_P(Q) = -log^{SPD}_{-P}(-Q)`
    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        let q = self.matrix_point(q)?;
        let out = self.spd.log_matrix(&Negated::new(p), &Negated::new(q))?;
        Ok(Point::Matrix(Negated::new(&out).to_owned_array()))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.matrix_point(p)?;
        let x = x.as_matrix()?;
        validate_square(x, self.k())?;
        // Symmetrization commutes with negation, so no sign flips are needed.
        Ok(Point::Matrix(self.spd.project_matrix(x)))
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        let q = self.matrix_point(q)?;
        let x = self.matrix_tangent(x)?;
        let out =
            self.spd.transport_matrix(&Negated::new(p), &Negated::new(q), &Negated::new(x))?;
        Ok(Point::Matrix(Negated::new(&out).to_owned_array()))
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.matrix_point(p)?;
        Ok(Point::Matrix(Array2::zeros((self.k(), self.k()))))
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        self.spd.random_point(rng).negated()
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        let p = self.matrix_point(p)?;
        let mirrored = Point::Matrix(Negated::new(p).to_owned_array());
        Ok(self.spd.random_tangent(&mirrored, rng)?.negated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifolds::errors::ManifoldError;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Membership mirrors SPD membership of the negation.
    // - exp/log and inner products agree with the SPD geometry at -P.
    // -------------------------------------------------------------------------

    #[test]
    fn dimension_is_triangular_number() {
        let m = SymmetricNegativeDefinite::new(3).unwrap();
        assert_eq!(m.manifold_dimension(), 6);
        assert_eq!(m.representation_size(), 9);
        assert!(SymmetricNegativeDefinite::new(0).is_err());
    }

    #[test]
    // Purpose
    // -------
    // `M` is accepted iff SPD accepts `-M`.
    //
    // Given
    // -----
    // - A negative-definite, a positive-definite, an indefinite and an
    //   asymmetric 2×2 matrix.
    //
    // Expect
    // ------
    // - Only the negative-definite matrix is accepted; the others fail with
    //   `Domain` errors naming this manifold.
    fn membership_mirrors_spd() {
        let snd = SymmetricNegativeDefinite::new(2).unwrap();
        let spd = SymmetricPositiveDefinite::new(2).unwrap();
        let candidates = [
            array![[-4.0, 1.0], [1.0, -3.0]],
            array![[4.0, 1.0], [1.0, 3.0]],
            array![[1.0, 0.0], [0.0, -1.0]],
            array![[-2.0, 0.5], [0.0, -2.0]],
        ];
        for m in candidates {
            let accepted = snd.is_point(&Point::Matrix(m.clone()));
            assert_eq!(accepted, spd.is_point(&Point::Matrix(m.mapv(|x| -x))));
        }
        assert!(snd.is_point(&Point::Matrix(array![[-4.0, 1.0], [1.0, -3.0]])));
        assert!(matches!(
            snd.check_point(&Point::Matrix(array![[4.0, 1.0], [1.0, 3.0]])),
            Err(ManifoldError::Domain { manifold: "SymmetricNegativeDefinite", .. })
        ));
        assert!(matches!(
            snd.check_point(&Point::Matrix(array![[-2.0, 0.5], [0.0, -2.0]])),
            Err(ManifoldError::Domain { manifold: "SymmetricNegativeDefinite", .. })
        ));
    }

    #[test]
    fn exp_log_inverse() {
        let m = SymmetricNegativeDefinite::new(2).unwrap();
        let p = Point::Matrix(array![[-4.0, 1.0], [1.0, -3.0]]);
        let q = Point::Matrix(array![[-5.0, 0.5], [0.5, -4.0]]);
        let x = m.log(&p, &q).unwrap();
        let back = m.exp(&p, &x).unwrap();
        for (a, b) in back.as_matrix().unwrap().iter().zip(q.as_matrix().unwrap().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
        assert!(m.is_point(&back));
    }

    #[test]
    // Purpose
    // -------
    // Distances equal the SPD distances between the negated points.
    fn distance_matches_spd_of_negation() {
        let snd = SymmetricNegativeDefinite::new(3).unwrap();
        let spd = SymmetricPositiveDefinite::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let p = snd.random_point(&mut rng);
        let q = snd.random_point(&mut rng);
        assert!(snd.is_point(&p) && snd.is_point(&q));
        assert_relative_eq!(
            snd.distance(&p, &q).unwrap(),
            spd.distance(&p.negated(), &q.negated()).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn transport_preserves_norm() {
        let m = SymmetricNegativeDefinite::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(19);
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
}
