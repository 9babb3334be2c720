//! Shifted half-lines `(shift, ∞)` and `(-∞, shift)`.
//!
//! Purpose
//! -------
//! Natural parameters of many exponential families are constrained to an open
//! half-line whose endpoint is not zero (e.g. `α - 1 > -1` for Beta) or whose
//! orientation is negative (e.g. `-λ < 0` for Exponential). These two
//! manifolds cover both cases by reusing the [`PositiveNumbers`] geometry.
//!
//! Key behaviors
//! -------------
//! - `ShiftedPositiveNumbers(s)`: chart `x ↦ x - s` onto ℝ₊; tangent vectors
//!   are unchanged by the translation.
//! - `ShiftedNegativeNumbers(s)`: chart `x ↦ s - x` onto ℝ₊; tangent vectors
//!   flip sign under the reflection.
//! - Every operation maps into the chart, calls the ℝ₊ scalar kernel and maps
//!   the result back, so both are isometric to `PositiveNumbers`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `shift` is finite; points are 1-element vectors.
//! - Membership is strict: the endpoint itself is rejected.
use crate::manifolds::{
    errors::{ManifoldError, ManifoldResult},
    point::Point,
    positive::{PositiveNumbers, scalar_coordinate},
    traits::Manifold,
};
use ndarray::array;
use rand::RngCore;

fn finite_shift(shift: f64) -> ManifoldResult<f64> {
    if shift.is_finite() { Ok(shift) } else { Err(ManifoldError::InvalidShift { shift }) }
}

fn scalar_point(x: f64) -> Point {
    Point::Vector(array![x])
}

/// Open half-line `(shift, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedPositiveNumbers {
    shift: f64,
    pos: PositiveNumbers,
}

impl ShiftedPositiveNumbers {
    /// # Errors
    /// [`ManifoldError::InvalidShift`] if `shift` is NaN or infinite.
    pub fn new(shift: f64) -> ManifoldResult<Self> {
        Ok(ShiftedPositiveNumbers { shift: finite_shift(shift)?, pos: PositiveNumbers::new() })
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Chart coordinate `x - shift` of a validated point.
    fn chart(&self, p: &Point) -> ManifoldResult<f64> {
        let x = scalar_coordinate(p)?;
        if x > self.shift {
            Ok(x - self.shift)
        } else {
            Err(ManifoldError::Domain {
                manifold: self.name(),
                reason: format!("x = {x} must be > {}", self.shift),
            })
        }
    }
}

impl Manifold for ShiftedPositiveNumbers {
    fn name(&self) -> &'static str {
        "ShiftedPositiveNumbers"
    }

    fn manifold_dimension(&self) -> usize {
        1
    }

    fn representation_size(&self) -> usize {
        1
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        self.chart(p).map(|_| ())
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.chart(p)?;
        scalar_coordinate(x).map(|_| ())
    }

    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        let p = self.chart(p)?;
        Ok(self.pos.inner_scalar(p, scalar_coordinate(x)?, scalar_coordinate(y)?))
    }

    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        Ok(scalar_point(self.pos.exp_scalar(p, scalar_coordinate(x)?) + self.shift))
    }

    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        let q = self.chart(q)?;
        Ok(scalar_point(self.pos.log_scalar(p, q)))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.check_vector(p, x)?;
        Ok(x.clone())
    }

    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        let q = self.chart(q)?;
        Ok(scalar_point(self.pos.transport_scalar(p, q, scalar_coordinate(x)?)))
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.chart(p)?;
        Ok(scalar_point(0.0))
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        scalar_point(self.pos.sample_scalar(rng) + self.shift)
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        self.pos.random_tangent(&scalar_point(p), rng)
    }
}

/// Open half-line `(-∞, shift)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedNegativeNumbers {
    shift: f64,
    pos: PositiveNumbers,
}

impl ShiftedNegativeNumbers {
    /// # Errors
    /// [`ManifoldError::InvalidShift`] if `shift` is NaN or infinite.
    pub fn new(shift: f64) -> ManifoldResult<Self> {
        Ok(ShiftedNegativeNumbers { shift: finite_shift(shift)?, pos: PositiveNumbers::new() })
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Chart coordinate `shift - x` of a validated point.
    fn chart(&self, p: &Point) -> ManifoldResult<f64> {
        let x = scalar_coordinate(p)?;
        if x < self.shift {
            Ok(self.shift - x)
        } else {
            Err(ManifoldError::Domain {
                manifold: self.name(),
                reason: format!("x = {x} must be < {}", self.shift),
            })
        }
    }
}

impl Manifold for ShiftedNegativeNumbers {
    fn name(&self) -> &'static str {
        "ShiftedNegativeNumbers"
    }

    fn manifold_dimension(&self) -> usize {
        1
    }

    fn representation_size(&self) -> usize {
        1
    }

    fn check_point(&self, p: &Point) -> ManifoldResult<()> {
        self.chart(p).map(|_| ())
    }

    fn check_vector(&self, p: &Point, x: &Point) -> ManifoldResult<()> {
        self.chart(p)?;
        scalar_coordinate(x).map(|_| ())
    }

    // (-x)(-y) = xy, so the reflection does not touch the metric.
    fn inner(&self, p: &Point, x: &Point, y: &Point) -> ManifoldResult<f64> {
        let p = self.chart(p)?;
        Ok(self.pos.inner_scalar(p, scalar_coordinate(x)?, scalar_coordinate(y)?))
    }

    /// `exp_p(x) = shift - exp⁺_{shift - p}(-x)`
    fn exp(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        Ok(scalar_point(self.shift - self.pos.exp_scalar(p, -scalar_coordinate(x)?)))
    }

    /// `log_p(q) = -log⁺_{shift - p}(shift - q)`
    fn log(&self, p: &Point, q: &Point) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        let q = self.chart(q)?;
        Ok(scalar_point(-self.pos.log_scalar(p, q)))
    }

    fn project(&self, p: &Point, x: &Point) -> ManifoldResult<Point> {
        self.check_vector(p, x)?;
        Ok(x.clone())
    }

    // Transport is linear in x, so the two sign flips cancel.
    fn parallel_transport(&self, p: &Point, q: &Point, x: &Point) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        let q = self.chart(q)?;
        Ok(scalar_point(self.pos.transport_scalar(p, q, scalar_coordinate(x)?)))
    }

    fn zero_vector(&self, p: &Point) -> ManifoldResult<Point> {
        self.chart(p)?;
        Ok(scalar_point(0.0))
    }

    fn random_point(&self, rng: &mut dyn RngCore) -> Point {
        scalar_point(self.shift - self.pos.sample_scalar(rng))
    }

    fn random_tangent(&self, p: &Point, rng: &mut dyn RngCore) -> ManifoldResult<Point> {
        let p = self.chart(p)?;
        Ok(self.pos.random_tangent(&scalar_point(p), rng)?.negated())
    }
}
