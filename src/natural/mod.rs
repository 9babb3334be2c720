//! natural — from exponential-family type to natural-parameter manifold.
//!
//! Purpose
//! -------
//! Decide, for each distribution type, which Riemannian manifold its natural
//! parameters live on, and translate between a flat natural-parameter vector
//! and that manifold's structured point representation.
//!
//! Key behaviors
//! -------------
//! - [`distribution`]: the [`Distribution`] dispatch tag and the opaque
//!   [`Conditioner`].
//! - [`families`]: built-in resolvers and the layout-driven
//!   partition/flatten pair.
//! - [`registry`]: [`ManifoldRegistry`] (tag → [`FamilyHandler`]) and the
//!   process-wide [`default_registry`].
//! - [`manifold`]: [`NaturalParametersManifold`] and the entry points
//!   [`get_natural_manifold`], [`get_natural_manifold_base`],
//!   [`partition_point`], [`flatten_point`].
//! - [`errors`]: [`NaturalError`] / [`NaturalResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The number of natural parameters of a family equals the intrinsic
//!   dimension of its base manifold; this is the length a flat point must
//!   have.
//! - `flatten_point(partition_point(x)) == x` for every registered family.
//!
//! Conventions
//! -----------
//! - Resolution and partitioning are synchronous and pure; the default
//!   registry is built once and never mutated.
pub mod distribution;
pub mod errors;
pub mod families;
pub mod manifold;
pub mod registry;

pub use self::distribution::{Conditioner, Distribution};
pub use self::errors::{NaturalError, NaturalResult};
pub use self::manifold::{
    NaturalParametersManifold, flatten_point, get_natural_manifold, get_natural_manifold_base,
    partition_point,
};
pub use self::registry::{FamilyHandler, ManifoldRegistry, default_registry};

pub mod prelude {
    pub use super::{
        Conditioner, Distribution, NaturalError, NaturalParametersManifold, NaturalResult,
        flatten_point, get_natural_manifold, get_natural_manifold_base, partition_point,
    };
}
