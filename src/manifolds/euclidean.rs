//! Euclidean space ℝⁿ with the flat metric.
use crate::manifolds::{
    errors::ManifoldResult,
    numerics::standard_normal_vec,
    point::Point,
    traits::Manifold,
    validation::validate_vector,
};
use ndarray::Array1;
use rand::RngCore;

/// Euclidean space ℝⁿ; points and tangent vectors are length-`n` vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Euclidean {
    n: usize,
}

impl Euclidean {
    pub fn new(n: usize) -> Self {
        Euclidean { n }
    }

    fn vector_pair<'a>(
        &self, p: &'a Point, x: &'a Point,
    ) -> ManifoldResult<(&'a Array1<f64>, &'a Array1<f64>)> {
        let p = p.as_vector()?;
        let x = x.as_vector()?;
        validate_vector(p, self.n)?;
        validate_vector(x, self.n)?;
        Ok((p, x))
    }
}

impl Manifold for Euclidean {
    fn name(&self) -> &'static str {
        "Euclidean"
    }

    fn manifold_dimension(&self) -> usize {
        self.n
    }

    fn representation_size(&self) -> usize {
        self.n
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        validate_vector(p.as_vector()?, self.n)
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.vector_pair(p, x).map(|_| ())
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        let (_, x) = self.vector_pair(p, x)?;
        let y = y.as_vector()?;
        validate_vector(y, self.n)?;
        Ok(x.dot(y))
    }

    /// `exp_p(x) = p + x`
    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        let (p, x) = self.vector_pair(p, x)?;
        Ok(Point::Vector(p + x))
    }

    /// `log_p(q) = q - p`
    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        let (p, q) = self.vector_pair(p, q)?;
        Ok(Point::Vector(q - p))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        let (_, x) = self.vector_pair(p, x)?;
        Ok(Point::Vector(x.clone()))
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        self.check_point(q)?;
        self.project(p, x)
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.check_point(p)?;
        Ok(p.zeros_like())
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        Point::Vector(standard_normal_vec(self.n, rng))
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        self.check_point(p)?;
        Ok(Point::Vector(standard_normal_vec(self.n, rng)))
    }
}
