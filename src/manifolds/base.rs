//! Closed set of base manifolds a family can resolve to.
//!
//! [`BaseManifold`] is an enum rather than a boxed trait object so that
//! resolved manifolds are `Clone + PartialEq + Debug`, which lets callers and
//! tests compare them structurally (e.g. "Beta resolves to
//! `ShiftedPositive(-1) × ShiftedPositive(-1)`").
use crate::manifolds::{
    errors::ManifoldResult,
    euclidean::Euclidean,
    negative_definite::SymmetricNegativeDefinite,
    point::Point,
    positive::PositiveNumbers,
    product::ProductManifold,
    shifted::{ShiftedNegativeNumbers, ShiftedPositiveNumbers},
    spd::SymmetricPositiveDefinite,
    traits::Manifold,
};
use rand::RngCore;

#[derive(Debug, Clone, PartialEq)]
pub enum BaseManifold {
    Euclidean(Euclidean),
    PositiveNumbers(PositiveNumbers),
    ShiftedPositive(ShiftedPositiveNumbers),
    ShiftedNegative(ShiftedNegativeNumbers),
    SymmetricPositiveDefinite(SymmetricPositiveDefinite),
    SymmetricNegativeDefinite(SymmetricNegativeDefinite),
    Product(ProductManifold),
}

impl BaseManifold {
    /// Borrow the wrapped manifold as a trait object.
    pub fn as_manifold(&self) -> &dyn Manifold {
        match self {
            BaseManifold::Euclidean(m) => m,
            BaseManifold::PositiveNumbers(m) => m,
            BaseManifold::ShiftedPositive(m) => m,
            BaseManifold::ShiftedNegative(m) => m,
            BaseManifold::SymmetricPositiveDefinite(m) => m,
            BaseManifold::SymmetricNegativeDefinite(m) => m,
            BaseManifold::Product(m) => m,
        }
    }

    pub fn euclidean(n: usize) -> Self {
        BaseManifold::Euclidean(Euclidean::new(n))
    }

    pub fn shifted_positive(shift: f64) -> ManifoldResult<Self> {
        Ok(BaseManifold::ShiftedPositive(ShiftedPositiveNumbers::new(shift)?))
    }

    pub fn shifted_negative(shift: f64) -> ManifoldResult<Self> {
        Ok(BaseManifold::ShiftedNegative(ShiftedNegativeNumbers::new(shift)?))
    }

    pub fn negative_definite(k: usize) -> ManifoldResult<Self> {
        Ok(BaseManifold::SymmetricNegativeDefinite(SymmetricNegativeDefinite::new(k)?))
    }

    pub fn product(factors: Vec<BaseManifold>) -> Self {
        BaseManifold::Product(ProductManifold::new(factors))
    }

    /// Factors of a product, or `None` for a single manifold.
    pub fn factors(&self) -> Option<&[BaseManifold]> {
        match self {
            BaseManifold::Product(p) => Some(p.factors()),
            _ => None,
        }
    }
}

impl Manifold for BaseManifold {
    fn name(&self) -> &'static str {
        self.as_manifold().name()
    }

    fn manifold_dimension(&self) -> usize {
        self.as_manifold().manifold_dimension()
    }

    fn representation_size(&self) -> usize {
        self.as_manifold().representation_size()
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        self.as_manifold().check_point(p)
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.as_manifold().check_vector(p, x)
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        self.as_manifold().inner(p, x, y)
    }

    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.as_manifold().exp(p, x)
    }

    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        self.as_manifold().log(p, q)
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.as_manifold().project(p, x)
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        self.as_manifold().parallel_transport(p, q, x)
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.as_manifold().zero_vector(p)
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        self.as_manifold().random_point(rng)
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        self.as_manifold().random_tangent(p, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_name_and_dimension() {
        let m = BaseManifold::negative_definite(2).unwrap();
        assert_eq!(m.name(), "SymmetricNegativeDefinite");
        assert_eq!(m.manifold_dimension(), 3);
        assert!(m.factors().is_none());

        let p = BaseManifold::product(vec![BaseManifold::euclidean(2), m]);
        assert_eq!(p.manifold_dimension(), 5);
        assert_eq!(p.factors().map(<[BaseManifold]>::len), Some(2));
    }
}
