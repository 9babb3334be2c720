//! Manifold capability contract.
//!
//! Every space in this crate (upstream-style and custom) implements
//! [`Manifold`], so a Riemannian optimizer can drive any of them, including a
//! [`NaturalParametersManifold`](crate::natural::manifold::NaturalParametersManifold),
//! through one interface. The trait is object safe; sampling takes a
//! `&mut dyn RngCore`.
use crate::manifolds::{errors::ManifoldResult, point::Point};
use rand::RngCore;

/// Core trait for Riemannian manifolds.
///
/// Operations that take a point validate it with [`Manifold::check_point`]
/// first, so a point outside the manifold surfaces as a
/// [`ManifoldError::Domain`](crate::manifolds::errors::ManifoldError::Domain)
/// rather than a silently wrong result.
pub trait Manifold {
    /// Short human-readable name, used in error messages.
    fn name(&self) -> &'static str;

    /// Intrinsic dimension of the manifold.
    fn manifold_dimension(&self) -> usize;

    /// Number of scalars stored in a point.
    fn representation_size(&self) -> usize;

    /// Check that `p` lies on the manifold.
    fn check_point(&self, p: &Point) -> ManifoldResult<()>;

    /// Check that `x` is a valid tangent vector at `p`.
    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()>;

    /// Riemannian inner product of tangent vectors `x`, `y` at `p`.
    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64>;

    /// Exponential map: follow the geodesic from `p` in direction `x`.
    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point>;

    /// Logarithmic map: tangent vector at `p` pointing to `q`.
    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point>;

    /// Project an ambient vector onto the tangent space at `p`.
    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point>;

    /// Parallel transport of `x` from `p` to `q` along the connecting geodesic.
    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point>;

    /// Zero tangent vector at `p`.
    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point>;

    /// Draw a random point on the manifold.
    fn random_point(&self, rng: &mut dyn RngCore) -> Point;

    /// Draw a random tangent vector at `p`.
    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point>;

    fn is_point(&self, p: &Point) -> bool {
        self.check_point(p).is_ok()
    }

    fn norm(&self, p: &Point, x: &Point) -> ManifoldResult<f64> {
        Ok(self.inner(p, x, x)?.max(0.0).sqrt())
    }

    /// Geodesic distance, `‖log_p(q)‖_p`.
    fn distance(&self, p: &Point, q: &Point) -> ManifoldResult<f64> {
        let x = self.log(p, q)?;
        self.norm(p, &x)
    }

    /// Retraction; the exponential map unless a manifold overrides it.
    fn retract(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.exp(p, x)
    }

    /// Inverse retraction; the logarithmic map unless a manifold overrides it.
    fn inverse_retract(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        self.log(p, q)
    }
}
