//! manifolds — Riemannian geometry for natural-parameter spaces.
//!
//! Purpose
//! -------
//! Provide the spaces that natural parameters of exponential families live on
//! behind one object-safe [`Manifold`] trait: the general-purpose spaces the
//! registry delegates to (Euclidean, positive reals, SPD matrices, products)
//! and the custom primitives built from them by translation, reflection or
//! negation.
//!
//! Key behaviors
//! -------------
//! - [`shifted`]: `ShiftedPositiveNumbers(s)` / `ShiftedNegativeNumbers(s)`,
//!   open half-lines reusing the [`PositiveNumbers`] geometry.
//! - [`negative_definite`]: `SymmetricNegativeDefinite(k)`, mirroring
//!   [`SymmetricPositiveDefinite`] through zero-copy [`Negated`] views.
//! - [`base`]: [`BaseManifold`], the closed enum a family resolves to.
//! - [`numerics`] / [`validation`]: eigen-based matrix functions on
//!   `nalgebra` and shared shape/finiteness checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - Points and tangent vectors are [`Point`] values; which one a value is
//!   follows from the argument position.
//! - Any operation taking a point validates it first; off-manifold input
//!   yields [`ManifoldError::Domain`], never a silent result.
//! - Manifolds are immutable after construction and `Send + Sync`.
//!
//! Conventions
//! -----------
//! - Scalar manifolds store points as 1-element vectors.
//! - Public arrays are `ndarray`; `nalgebra` is confined to [`numerics`].
pub mod base;
pub mod errors;
pub mod euclidean;
pub mod negated;
pub mod negative_definite;
pub mod numerics;
pub mod point;
pub mod positive;
pub mod product;
pub mod shifted;
pub mod spd;
pub mod traits;
pub mod validation;

pub use self::base::BaseManifold;
pub use self::errors::{ManifoldError, ManifoldResult};
pub use self::euclidean::Euclidean;
pub use self::negated::{MatrixAccess, Negated};
pub use self::negative_definite::SymmetricNegativeDefinite;
pub use self::point::Point;
pub use self::positive::PositiveNumbers;
pub use self::product::ProductManifold;
pub use self::shifted::{ShiftedNegativeNumbers, ShiftedPositiveNumbers};
pub use self::spd::SymmetricPositiveDefinite;
pub use self::traits::Manifold;

pub mod prelude {
    pub use super::{
        BaseManifold, Manifold, ManifoldError, ManifoldResult, Negated, Point,
        ShiftedNegativeNumbers, ShiftedPositiveNumbers, SymmetricNegativeDefinite,
    };
}
