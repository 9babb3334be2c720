//! Product manifolds `M₁ × … × Mₙ`.
//!
//! Points are `Point::Product` with one part per factor. Every operation is
//! applied factor by factor; inner products add, so
//! `d(p, q)² = Σ dᵢ(pᵢ, qᵢ)²`.
use crate::manifolds::{
    base::BaseManifold,
    errors::{ManifoldError, ManifoldResult},
    point::Point,
    traits::Manifold,
};
use rand::RngCore;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductManifold {
    factors: Vec<BaseManifold>,
}

impl ProductManifold {
    pub fn new(factors: Vec<BaseManifold>) -> Self {
        ProductManifold { factors }
    }

    pub fn factors(&self) -> &[BaseManifold] {
        &self.factors
    }

    /// Split a product point into its parts, checking the part count.
    fn split<'a>(&self, p: &'a Point) -> ManifoldResult<&'a [Point]> {
        let parts = p.as_product()?;
        if parts.len() != self.factors.len() {
            return Err(ManifoldError::FactorCountMismatch {
                expected: self.factors.len(),
                found: parts.len(),
            });
        }
        Ok(parts)
    }

    fn map2<F>(&self, p: &Point, x: &Point, mut f: F) -> ManifoldResult<Point>
    where
        F: FnMut(&BaseManifold, &Point, &Point) -> ManifoldResult<Point>,
    {
        let ps = self.split(p)?;
        let xs = self.split(x)?;
        let parts = self
            .factors
            .iter()
            .zip(ps.iter().zip(xs))
            .map(|(m, (p, x))| f(m, p, x))
            .collect::<ManifoldResult<Vec<_>>>()?;
        Ok(Point::Product(parts))
    }
}

impl Manifold for ProductManifold {
    fn name(&self) -> &'static str {
        "ProductManifold"
    }

    fn manifold_dimension(&self) -> usize {
        self.factors.iter().map(Manifold::manifold_dimension).sum()
    }

    fn representation_size(&self) -> usize {
        self.factors.iter().map(Manifold::representation_size).sum()
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        let parts = self.split(p)?;
        self.factors.iter().zip(parts).try_for_each(|(m, p)| m.check_point(p))
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        let ps = self.split(p)?;
        let xs = self.split(x)?;
        self.factors
            .iter()
            .zip(ps.iter().zip(xs))
            .try_for_each(|(m, (p, x))| m.check_vector(p, x))
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        let ps = self.split(p)?;
        let xs = self.split(x)?;
        let ys = self.split(y)?;
        let mut total = 0.0;
        for (i, m) in self.factors.iter().enumerate() {
            total += m.inner(&ps[i], &xs[i], &ys[i])?;
        }
        Ok(total)
    }

    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.map2(p, x, |m, p, x| m.exp(p, x))
    }

    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        self.map2(p, q, |m, p, q| m.log(p, q))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.map2(p, x, |m, p, x| m.project(p, x))
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        let ps = self.split(p)?;
        let qs = self.split(q)?;
        let xs = self.split(x)?;
        let parts = (0..self.factors.len())
            .map(|i| self.factors[i].parallel_transport(&ps[i], &qs[i], &xs[i]))
            .collect::<ManifoldResult<Vec<_>>>()?;
        Ok(Point::Product(parts))
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        let parts = self.split(p)?;
        let zeros = self
            .factors
            .iter()
            .zip(parts)
            .map(|(m, p)| m.zero_vector(p))
            .collect::<ManifoldResult<Vec<_>>>()?;
        Ok(Point::Product(zeros))
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        Point::Product(self.factors.iter().map(|m| m.random_point(rng)).collect())
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        let parts = self.split(p)?;
        let tangents = self
            .factors
            .iter()
            .zip(parts)
            .map(|(m, p)| m.random_tangent(p, rng))
            .collect::<ManifoldResult<Vec<_>>>()?;
        Ok(Point::Product(tangents))
    }
}
