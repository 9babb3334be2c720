//! natural::manifold — `NaturalParametersManifold` and the public entry points.
//!
//! Purpose
//! -------
//! Package a resolved base manifold together with the distribution tag,
//! `dims` and conditioner that produced it, and expose the free functions
//! callers use against the default registry:
//! [`get_natural_manifold`], [`get_natural_manifold_base`],
//! [`partition_point`] and [`flatten_point`].
//!
//! Key behaviors
//! -------------
//! - [`NaturalParametersManifold`] is a plain value (`Clone + PartialEq`,
//!   `Send + Sync`) with no mutable state.
//! - It implements [`Manifold`] by delegating to its base, so an optimizer can
//!   drive it directly on partitioned points.
//! - `base()` returns the stored base; nothing is recomputed.
//!
//! Conventions
//! -----------
//! - An instance keeps the partition/flatten functions of the handler that
//!   resolved it, so instances built from a custom registry translate points
//!   with that registry's layout.
use crate::{
    manifolds::{
        base::BaseManifold, errors::ManifoldResult, point::Point, traits::Manifold,
    },
    natural::{
        distribution::{Conditioner, Distribution},
        errors::NaturalResult,
        registry::{FamilyHandler, FlattenFn, PartitionFn, default_registry},
    },
};
use ndarray::{Array1, ArrayView1};
use rand::RngCore;

/// Natural-parameter manifold of one exponential family at fixed `dims`.
#[derive(Debug, Clone)]
pub struct NaturalParametersManifold {
    distribution: Distribution,
    dims: Vec<usize>,
    base: BaseManifold,
    conditioner: Conditioner,
    partition: PartitionFn,
    flatten: FlattenFn,
}

// Equality is structural; the layout functions are not compared.
impl PartialEq for NaturalParametersManifold {
    fn eq(&self, other: &Self) -> bool {
        self.distribution == other.distribution
            && self.dims == other.dims
            && self.base == other.base
            && self.conditioner == other.conditioner
    }
}

impl NaturalParametersManifold {
    pub(crate) fn from_parts(
        distribution: Distribution, dims: Vec<usize>, base: BaseManifold, conditioner: Conditioner,
        handler: &FamilyHandler,
    ) -> Self {
        NaturalParametersManifold {
            distribution,
            dims,
            base,
            conditioner,
            partition: handler.partition,
            flatten: handler.flatten,
        }
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn conditioner(&self) -> &Conditioner {
        &self.conditioner
    }

    /// The resolved base manifold.
    pub fn base(&self) -> &BaseManifold {
        &self.base
    }

    /// Number of natural parameters, i.e. the length of a flat point.
    pub fn manifold_dimension(&self) -> usize {
        self.base.manifold_dimension()
    }

    /// Split a flat natural-parameter vector into the base manifold's layout.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `point.len() != self.manifold_dimension()`.
    /// - Any error of the resolving handler's partition function.
    pub fn partition_point(&self, point: ArrayView1<'_, f64>) -> NaturalResult<Point> {
        (self.partition)(self.distribution, &self.base, point)
    }

    /// Inverse of [`NaturalParametersManifold::partition_point`].
    pub fn flatten_point(&self, point: &Point) -> NaturalResult<Array1<f64>> {
        (self.flatten)(self.distribution, &self.base, point)
    }

    /// Partition `flat` and check that the result lies on the base manifold.
    ///
    /// Fails with a `Domain` manifold error for vectors outside the
    /// natural-parameter domain (e.g. a Gamma rate coordinate `≥ 0`).
    pub fn check_natural_point(&self, flat: ArrayView1<'_, f64>) -> NaturalResult<Point> {
        let p = self.partition_point(flat)?;
        self.base.check_point(&p)?;
        Ok(p)
    }
}

impl Manifold for NaturalParametersManifold {
    fn name(&self) -> &'static str {
        "NaturalParametersManifold"
    }

    fn manifold_dimension(&self) -> usize {
        self.base.manifold_dimension()
    }

    fn representation_size(&self) -> usize {
        self.base.representation_size()
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        self.base.check_point(p)
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.base.check_vector(p, x)
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        self.base.inner(p, x, y)
    }

    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.base.exp(p, x)
    }

    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        self.base.log(p, q)
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.base.project(p, x)
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        self.base.parallel_transport(p, q, x)
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.base.zero_vector(p)
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        self.base.random_point(rng)
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        self.base.random_tangent(p, rng)
    }
}

// ---- Entry points over the default registry ----

/// Build the natural-parameter manifold of `distribution` with shape `dims`.
///
/// # Errors
/// - `UnsupportedDistribution` for tags without a default handler.
/// - `InvalidDims` if `dims` does not fit the family.
pub fn get_natural_manifold(
    distribution: Distribution, dims: &[usize], conditioner: Conditioner,
) -> NaturalResult<NaturalParametersManifold> {
    default_registry().natural_manifold(distribution, dims, conditioner)
}

/// Resolve only the base manifold of `distribution` with shape `dims`.
pub fn get_natural_manifold_base(
    distribution: Distribution, dims: &[usize], conditioner: &Conditioner,
) -> NaturalResult<BaseManifold> {
    default_registry().natural_manifold_base(distribution, dims, conditioner)
}

/// Split a flat natural-parameter vector into the point layout of the
/// family's base manifold.
pub fn partition_point(
    distribution: Distribution, dims: &[usize], point: ArrayView1<'_, f64>,
    conditioner: &Conditioner,
) -> NaturalResult<Point> {
    default_registry().partition_point(distribution, dims, point, conditioner)
}

/// Inverse of [`partition_point`].
pub fn flatten_point(
    distribution: Distribution, dims: &[usize], point: &Point, conditioner: &Conditioner,
) -> NaturalResult<Array1<f64>> {
    default_registry().flatten_point(distribution, dims, point, conditioner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manifolds::errors::ManifoldError, natural::errors::NaturalError};
    use ndarray::array;

    #[test]
    fn base_accessor_matches_resolver() {
        let m = get_natural_manifold(Distribution::Gamma, &[], Conditioner::None).unwrap();
        let base = get_natural_manifold_base(Distribution::Gamma, &[], &Conditioner::None).unwrap();
        assert_eq!(m.base(), &base);
        assert_eq!(m.distribution(), Distribution::Gamma);
        assert!(m.dims().is_empty());
        assert!(m.conditioner().is_none());
    }

    #[test]
    fn conditioner_is_stored_unchanged() {
        let m = get_natural_manifold(Distribution::Laplace, &[], Conditioner::Scalar(0.5)).unwrap();
        assert_eq!(m.conditioner(), &Conditioner::Scalar(0.5));
        let plain = get_natural_manifold(Distribution::Laplace, &[], Conditioner::None).unwrap();
        assert_eq!(m.base(), plain.base());
    }

    #[test]
    // Purpose
    // -------
    // `check_natural_point` surfaces a domain error for a flat vector outside
    // the natural-parameter domain.
    //
    // Given
    // -----
    // - Gamma with natural parameters (α - 1, -β).
    //
    // Expect
    // ------
    // - [1.0, -2.0] is accepted; [1.0, 2.0] fails in ShiftedNegativeNumbers.
    fn check_natural_point_reports_domain() {
        let m = get_natural_manifold(Distribution::Gamma, &[], Conditioner::None).unwrap();
        assert!(m.check_natural_point(array![1.0, -2.0].view()).is_ok());
        let err = m.check_natural_point(array![1.0, 2.0].view()).unwrap_err();
        assert!(matches!(
            err,
            NaturalError::Manifold(ManifoldError::Domain { manifold: "ShiftedNegativeNumbers", .. })
        ));
    }

    #[test]
    fn free_functions_round_trip() {
        let flat = array![0.3, -0.7];
        let p = partition_point(Distribution::NormalMeanVariance, &[], flat.view(), &Conditioner::None)
            .unwrap();
        assert_eq!(p, Point::Product(vec![Point::Vector(array![0.3]), Point::Vector(array![-0.7])]));
        let back =
            flatten_point(Distribution::NormalMeanVariance, &[], &p, &Conditioner::None).unwrap();
        assert_eq!(back, flat);
    }
}
