//! natural::registry — dispatch table from distribution tag to family handler.
//!
//! Purpose
//! -------
//! Map each [`Distribution`] to a [`FamilyHandler`] bundling three plain
//! function pointers (resolve the base manifold, partition a flat vector,
//! flatten a structured point). The table is explicit and closed at
//! construction; extension happens through [`ManifoldRegistry::register`].
//!
//! Key behaviors
//! -------------
//! - [`ManifoldRegistry::with_defaults`] installs the built-in families.
//! - [`default_registry`] returns a process-wide instance built once in a
//!   `OnceLock` and read-only afterwards; the free functions in
//!   [`crate::natural::manifold`] go through it.
//! - Looking up an unregistered tag fails with
//!   [`NaturalError::UnsupportedDistribution`] for every operation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Resolvers are pure and deterministic in `(distribution, dims,
//!   conditioner)`.
//! - A handler's partition and flatten are mutual inverses for every base its
//!   resolver can return.
//!
//! Feature flags
//! -------------
//! With `obs_slog`, the registry carries a `slog::Logger` (discarding by
//! default, see [`ManifoldRegistry::with_logger`]) and emits `debug!` records
//! for each resolution and partition.
use crate::{
    manifolds::{base::BaseManifold, point::Point},
    natural::{
        distribution::{Conditioner, Distribution},
        errors::{NaturalError, NaturalResult},
        families,
        manifold::NaturalParametersManifold,
    },
};
use ndarray::{Array1, ArrayView1};
use std::{collections::HashMap, fmt, sync::OnceLock};

#[cfg(feature = "obs_slog")]
use crate::manifolds::traits::Manifold;
#[cfg(feature = "obs_slog")]
use slog::{Logger, debug, o};

/// Builds the base manifold of a family.
pub type ResolveFn = fn(Distribution, &[usize], &Conditioner) -> NaturalResult<BaseManifold>;

/// Splits a flat natural-parameter vector into a point of the base manifold.
pub type PartitionFn = fn(Distribution, &BaseManifold, ArrayView1<'_, f64>) -> NaturalResult<Point>;

/// Inverse of [`PartitionFn`].
pub type FlattenFn = fn(Distribution, &BaseManifold, &Point) -> NaturalResult<Array1<f64>>;

/// Per-family behavior stored in the registry.
#[derive(Debug, Clone, Copy)]
pub struct FamilyHandler {
    pub resolve_base: ResolveFn,
    pub partition: PartitionFn,
    pub flatten: FlattenFn,
}

impl FamilyHandler {
    /// Handler using the generic layout translation of
    /// [`families::partition_by_layout`] / [`families::flatten_by_layout`].
    pub fn new(resolve_base: ResolveFn) -> Self {
        FamilyHandler {
            resolve_base,
            partition: families::partition_by_layout,
            flatten: families::flatten_by_layout,
        }
    }

    /// Handler with a custom point layout.
    pub fn with_layout(resolve_base: ResolveFn, partition: PartitionFn, flatten: FlattenFn) -> Self {
        FamilyHandler { resolve_base, partition, flatten }
    }
}

/// Dispatch table from [`Distribution`] to [`FamilyHandler`].
#[derive(Clone)]
pub struct ManifoldRegistry {
    handlers: HashMap<Distribution, FamilyHandler>,
    #[cfg(feature = "obs_slog")]
    logger: Logger,
}

impl fmt::Debug for ManifoldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifoldRegistry").field("distributions", &self.distributions()).finish()
    }
}

impl Default for ManifoldRegistry {
    fn default() -> Self {
        ManifoldRegistry::with_defaults()
    }
}

impl ManifoldRegistry {
    /// Registry with no handlers.
    pub fn empty() -> Self {
        ManifoldRegistry {
            handlers: HashMap::new(),
            #[cfg(feature = "obs_slog")]
            logger: Logger::root(slog::Discard, o!()),
        }
    }

    /// Registry populated with every built-in family.
    pub fn with_defaults() -> Self {
        use Distribution as D;

        let table: [(Distribution, ResolveFn); 19] = [
            (D::Bernoulli, families::real_line),
            (D::Binomial, families::real_line),
            (D::Poisson, families::real_line),
            (D::Geometric, families::negative_half_line),
            (D::Exponential, families::negative_half_line),
            (D::Rayleigh, families::negative_half_line),
            (D::Weibull, families::negative_half_line),
            (D::Laplace, families::negative_half_line),
            (D::Pareto, families::below_minus_one),
            (D::Chisq, families::above_minus_one),
            (D::Beta, families::beta),
            (D::Gamma, families::gamma),
            (D::LogNormal, families::location_precision),
            (D::NormalMeanVariance, families::location_precision),
            (D::NormalMeanPrecision, families::location_precision),
            (D::Dirichlet, families::real_vector),
            (D::Categorical, families::real_vector),
            (D::MvNormalMeanCovariance, families::mv_normal),
            (D::MvNormalMeanPrecision, families::mv_normal),
        ];

        let mut registry = ManifoldRegistry::empty();
        for (distribution, resolve) in table {
            registry.register(distribution, FamilyHandler::new(resolve));
        }
        registry
    }

    /// Attach a logger for resolve/partition records.
    #[cfg(feature = "obs_slog")]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Install (or replace) the handler for `distribution`, returning the
    /// previous one.
    pub fn register(
        &mut self, distribution: Distribution, handler: FamilyHandler,
    ) -> Option<FamilyHandler> {
        self.handlers.insert(distribution, handler)
    }

    pub fn is_registered(&self, distribution: Distribution) -> bool {
        self.handlers.contains_key(&distribution)
    }

    /// Registered tags in declaration order.
    pub fn distributions(&self) -> Vec<Distribution> {
        let mut out: Vec<Distribution> = self.handlers.keys().copied().collect();
        out.sort();
        out
    }

    /// # Errors
    /// [`NaturalError::UnsupportedDistribution`] if no handler is registered.
    pub fn handler(&self, distribution: Distribution) -> NaturalResult<&FamilyHandler> {
        self.handlers
            .get(&distribution)
            .ok_or(NaturalError::UnsupportedDistribution { distribution })
    }

    /// Resolve the base manifold of `distribution` with shape `dims`.
    pub fn natural_manifold_base(
        &self, distribution: Distribution, dims: &[usize], conditioner: &Conditioner,
    ) -> NaturalResult<BaseManifold> {
        let handler = self.handler(distribution)?;
        let base = (handler.resolve_base)(distribution, dims, conditioner)?;
        #[cfg(feature = "obs_slog")]
        debug!(self.logger, "resolved natural manifold";
            "distribution" => %distribution,
            "dims" => ?dims,
            "base" => base.name(),
            "dimension" => base.manifold_dimension());
        Ok(base)
    }

    /// Resolve and package a [`NaturalParametersManifold`].
    pub fn natural_manifold(
        &self, distribution: Distribution, dims: &[usize], conditioner: Conditioner,
    ) -> NaturalResult<NaturalParametersManifold> {
        let handler = self.handler(distribution)?;
        let base = self.natural_manifold_base(distribution, dims, &conditioner)?;
        Ok(NaturalParametersManifold::from_parts(
            distribution,
            dims.to_vec(),
            base,
            conditioner,
            handler,
        ))
    }

    /// Split a flat natural-parameter vector into the base manifold's layout.
    pub fn partition_point(
        &self, distribution: Distribution, dims: &[usize], point: ArrayView1<'_, f64>,
        conditioner: &Conditioner,
    ) -> NaturalResult<Point> {
        let base = self.natural_manifold_base(distribution, dims, conditioner)?;
        self.partition_with_base(distribution, &base, point)
    }

    /// Inverse of [`ManifoldRegistry::partition_point`].
    pub fn flatten_point(
        &self, distribution: Distribution, dims: &[usize], point: &Point, conditioner: &Conditioner,
    ) -> NaturalResult<Array1<f64>> {
        let base = self.natural_manifold_base(distribution, dims, conditioner)?;
        self.flatten_with_base(distribution, &base, point)
    }

    /// Partition against an already-resolved base.
    pub fn partition_with_base(
        &self, distribution: Distribution, base: &BaseManifold, point: ArrayView1<'_, f64>,
    ) -> NaturalResult<Point> {
        let handler = self.handler(distribution)?;
        let partitioned = (handler.partition)(distribution, base, point)?;
        #[cfg(feature = "obs_slog")]
        debug!(self.logger, "partitioned natural parameters";
            "distribution" => %distribution,
            "entries" => point.len(),
            "layout" => partitioned.kind());
        Ok(partitioned)
    }

    /// Flatten against an already-resolved base.
    pub fn flatten_with_base(
        &self, distribution: Distribution, base: &BaseManifold, point: &Point,
    ) -> NaturalResult<Array1<f64>> {
        let handler = self.handler(distribution)?;
        (handler.flatten)(distribution, base, point)
    }
}

/// Process-wide registry with the built-in families.
pub fn default_registry() -> &'static ManifoldRegistry {
    static DEFAULT: OnceLock<ManifoldRegistry> = OnceLock::new();
    DEFAULT.get_or_init(ManifoldRegistry::with_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifolds::traits::Manifold;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Default table coverage and unsupported tags.
    // - Registration of a custom family with its own resolver.
    // -------------------------------------------------------------------------

    fn spd_resolver(
        d: Distribution, dims: &[usize], _: &Conditioner,
    ) -> NaturalResult<BaseManifold> {
        let k = families::vector_dims(d, dims)?;
        Ok(BaseManifold::SymmetricPositiveDefinite(
            crate::manifolds::spd::SymmetricPositiveDefinite::new(k)?,
        ))
    }

    #[test]
    fn defaults_cover_known_families() {
        let registry = ManifoldRegistry::with_defaults();
        assert_eq!(registry.distributions().len(), 19);
        for d in [Distribution::Wishart, Distribution::InverseWishart, Distribution::VonMises] {
            assert!(!registry.is_registered(d));
            assert_eq!(
                registry.natural_manifold_base(d, &[], &Conditioner::None),
                Err(NaturalError::UnsupportedDistribution { distribution: d })
            );
        }
    }

    #[test]
    fn unsupported_partition_matches_resolver() {
        let registry = ManifoldRegistry::with_defaults();
        let err = registry
            .partition_point(Distribution::VonMises, &[], array![1.0, 2.0].view(), &Conditioner::None)
            .unwrap_err();
        assert_eq!(err, NaturalError::UnsupportedDistribution { distribution: Distribution::VonMises });
    }

    #[test]
    // Purpose
    // -------
    // A caller-registered family resolves and partitions like a built-in one.
    //
    // Given
    // -----
    // - Wishart registered with an SPD(k) resolver and the generic layout.
    //
    // Expect
    // ------
    // - dims [2] gives dimension 3 and [4, 1, 3] partitions to [[4,1],[1,3]].
    // - The registration replaced nothing.
    fn custom_registration() {
        let mut registry = ManifoldRegistry::with_defaults();
        let previous = registry.register(Distribution::Wishart, FamilyHandler::new(spd_resolver));
        assert!(previous.is_none());

        let m = registry.natural_manifold(Distribution::Wishart, &[2], Conditioner::None).unwrap();
        assert_eq!(m.manifold_dimension(), 3);
        let p = registry
            .partition_point(Distribution::Wishart, &[2], array![4.0, 1.0, 3.0].view(), &Conditioner::None)
            .unwrap();
        assert_eq!(p, Point::Matrix(array![[4.0, 1.0], [1.0, 3.0]]));
        assert!(m.is_point(&p));
    }

    #[test]
    // Purpose
    // -------
    // A manifold built from a custom registry partitions and flattens through
    // the handler that resolved it, not through the process-wide table.
    //
    // Given
    // -----
    // - Wishart registered locally with an SPD(k) resolver; absent from the
    //   default registry.
    //
    // Expect
    // ------
    // - The instance maps [4, 1, 3] to [[4,1],[1,3]] and back.
    fn instance_uses_resolving_handler() {
        let mut registry = ManifoldRegistry::with_defaults();
        registry.register(Distribution::Wishart, FamilyHandler::new(spd_resolver));
        assert!(!default_registry().is_registered(Distribution::Wishart));

        let m = registry.natural_manifold(Distribution::Wishart, &[2], Conditioner::None).unwrap();
        let flat = array![4.0, 1.0, 3.0];
        let p = m.partition_point(flat.view()).unwrap();
        assert_eq!(p, Point::Matrix(array![[4.0, 1.0], [1.0, 3.0]]));
        assert!(m.check_natural_point(flat.view()).is_ok());
        assert_eq!(m.flatten_point(&p).unwrap(), flat);
    }

    #[test]
    fn instance_honors_replaced_layout() {
        fn reversed(
            _: Distribution, base: &BaseManifold, point: ArrayView1<'_, f64>,
        ) -> NaturalResult<Point> {
            let n = base.manifold_dimension();
            if point.len() != n {
                return Err(NaturalError::DimensionMismatch { expected: n, found: point.len() });
            }
            Ok(Point::Vector(point.iter().rev().copied().collect()))
        }
        let mut registry = ManifoldRegistry::with_defaults();
        let handler = FamilyHandler::with_layout(
            families::real_vector,
            reversed,
            families::flatten_by_layout,
        );
        registry.register(Distribution::Dirichlet, handler);

        let m = registry.natural_manifold(Distribution::Dirichlet, &[3], Conditioner::None).unwrap();
        let p = m.partition_point(array![1.0, 2.0, 3.0].view()).unwrap();
        assert_eq!(p, Point::Vector(array![3.0, 2.0, 1.0]));

        let default = default_registry()
            .natural_manifold(Distribution::Dirichlet, &[3], Conditioner::None)
            .unwrap();
        assert_eq!(default, m);
        assert_eq!(
            default.partition_point(array![1.0, 2.0, 3.0].view()).unwrap(),
            Point::Vector(array![1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn with_layout_installs_all_three_functions() {
        fn circle(_: Distribution, _: &[usize], _: &Conditioner) -> NaturalResult<BaseManifold> {
            Ok(BaseManifold::euclidean(2))
        }
        let mut registry = ManifoldRegistry::empty();
        registry.register(
            Distribution::VonMises,
            FamilyHandler::with_layout(circle, families::partition_by_layout, families::flatten_by_layout),
        );
        assert_eq!(registry.distributions(), vec![Distribution::VonMises]);
        let flat = array![0.5, -1.5];
        let p = registry
            .partition_point(Distribution::VonMises, &[], flat.view(), &Conditioner::None)
            .unwrap();
        let back = registry.flatten_point(Distribution::VonMises, &[], &p, &Conditioner::None).unwrap();
        assert_eq!(back, flat);
    }

    #[test]
    fn default_registry_is_shared() {
        assert!(std::ptr::eq(default_registry(), default_registry()));
        assert!(default_registry().is_registered(Distribution::Beta));
    }
}
