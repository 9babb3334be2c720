//! Positive reals ℝ₊ with the log-Euclidean (scale-invariant) metric.
//!
//! Points are 1-element vectors `[p]` with `p > 0`; tangent vectors are
//! 1-element vectors. The metric is `⟨x, y⟩_p = xy / p²`, which makes
//! `t ↦ p·e^{t·x/p}` the geodesics.
//!
//! The scalar kernels (`*_scalar`) are public so that the shifted half-lines
//! can delegate to them after translating/reflecting their coordinate.
use crate::manifolds::{
    errors::{ManifoldError, ManifoldResult},
    point::Point,
    traits::Manifold,
    validation::validate_vector,
};
use ndarray::array;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositiveNumbers;

impl PositiveNumbers {
    pub fn new() -> Self {
        PositiveNumbers
    }

    /// Validate that `p > 0`.
    pub fn check_scalar(&self, p: f64) -> ManifoldResult<()> {
        if p > 0.0 {
            Ok(())
        } else {
            Err(ManifoldError::Domain {
                manifold: self.name(),
                reason: format!("x = {p} must be > 0"),
            })
        }
    }

    /// `⟨x, y⟩_p = xy / p²`
    pub fn inner_scalar(&self, p: f64, x: f64, y: f64) -> f64 {
        x * y / (p * p)
    }

    /// `exp_p(x) = p·exp(x / p)`
    pub fn exp_scalar(&self, p: f64, x: f64) -> f64 {
        p * (x / p).exp()
    }

    /// `log_p(q) = p·ln(q / p)`
    pub fn log_scalar(&self, p: f64, q: f64) -> f64 {
        p * (q / p).ln()
    }

    /// `P_{p→q}(x) = x·q / p`
    pub fn transport_scalar(&self, p: f64, q: f64, x: f64) -> f64 {
        x * q / p
    }

    /// Log-normal draw `exp(z)`, `z ~ N(0, 1)`; always `> 0`.
    pub fn sample_scalar(&self, rng: &mut dyn RngCore) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        z.exp()
    }
}

/// Read the single coordinate of a 1-element vector point.
pub fn scalar_coordinate(p: &Point) -> ManifoldResult<f64> {
    let v = p.as_vector()?;
    validate_vector(v, 1)?;
    Ok(v[0])
}

impl Manifold for PositiveNumbers {
    fn name(&self) -> &'static str {
        "PositiveNumbers"
    }

    fn manifold_dimension(&self) -> usize {
        1
    }

    fn representation_size(&self) -> usize {
        1
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        self.check_scalar(scalar_coordinate(p)?)
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.check_point(p)?;
        scalar_coordinate(x).map(|_| ())
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        self.check_point(p)?;
        let p = scalar_coordinate(p)?;
        Ok(self.inner_scalar(p, scalar_coordinate(x)?, scalar_coordinate(y)?))
    }

    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.check_point(p)?;
        let p = scalar_coordinate(p)?;
        Ok(Point::Vector(array![self.exp_scalar(p, scalar_coordinate(x)?)]))
    }

    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        self.check_point(p)?;
        self.check_point(q)?;
        let value = self.log_scalar(scalar_coordinate(p)?, scalar_coordinate(q)?);
        Ok(Point::Vector(array![value]))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.check_vector(p, x)?;
        Ok(x.clone())
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        self.check_point(p)?;
        self.check_point(q)?;
        let value =
            self.transport_scalar(scalar_coordinate(p)?, scalar_coordinate(q)?, scalar_coordinate(x)?);
        Ok(Point::Vector(array![value]))
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.check_point(p)?;
        Ok(Point::Vector(array![0.0]))
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        Point::Vector(array![self.sample_scalar(rng)])
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        self.check_point(p)?;
        let z: f64 = StandardNormal.sample(rng);
        Ok(Point::Vector(array![z * scalar_coordinate(p)?]))
    }
}
