//! Point and tangent-vector representation shared by all manifolds.
//!
//! A [`Point`] is either a vector, a matrix, or a product of parts (one part
//! per factor of a [`ProductManifold`](super::product::ProductManifold)).
//! Tangent vectors use the same type; which one a value denotes is decided by
//! the argument position of the manifold operation it is passed to.
use crate::manifolds::errors::{ManifoldError, ManifoldResult};
use ndarray::{Array1, Array2};

/// Point on (or tangent vector to) a manifold.
#[derive(Debug, Clone, PartialEq)]
pub enum Point {
    /// Flat vector, e.g. a point of `Euclidean(n)` or a 1-element half-line point.
    Vector(Array1<f64>),
    /// Square matrix, e.g. a point of `SymmetricPositiveDefinite(k)`.
    Matrix(Array2<f64>),
    /// One part per factor of a product manifold.
    Product(Vec<Point>),
}

impl Point {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Point::Vector(_) => "vector",
            Point::Matrix(_) => "matrix",
            Point::Product(_) => "product",
        }
    }

    /// Total number of stored scalars.
    pub fn len(&self) -> usize {
        match self {
            Point::Vector(v) => v.len(),
            Point::Matrix(m) => m.len(),
            Point::Product(parts) => parts.iter().map(Point::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_vector(&self) -> ManifoldResult<&Array1<f64>> {
        match self {
            Point::Vector(v) => Ok(v),
            other => Err(ManifoldError::PointKind { expected: "vector", found: other.kind() }),
        }
    }

    pub fn as_matrix(&self) -> ManifoldResult<&Array2<f64>> {
        match self {
            Point::Matrix(m) => Ok(m),
            other => Err(ManifoldError::PointKind { expected: "matrix", found: other.kind() }),
        }
    }

    pub fn as_product(&self) -> ManifoldResult<&[Point]> {
        match self {
            Point::Product(parts) => Ok(parts),
            other => Err(ManifoldError::PointKind { expected: "product", found: other.kind() }),
        }
    }

    /// Same structure with every entry negated.
    pub fn negated(&self) -> Point {
        match self {
            Point::Vector(v) => Point::Vector(v.mapv(|x| -x)),
            Point::Matrix(m) => Point::Matrix(m.mapv(|x| -x)),
            Point::Product(parts) => Point::Product(parts.iter().map(Point::negated).collect()),
        }
    }

    /// Same structure with every entry set to zero.
    pub fn zeros_like(&self) -> Point {
        match self {
            Point::Vector(v) => Point::Vector(Array1::zeros(v.len())),
            Point::Matrix(m) => Point::Matrix(Array2::zeros(m.raw_dim())),
            Point::Product(parts) => Point::Product(parts.iter().map(Point::zeros_like).collect()),
        }
    }
}

impl From<Array1<f64>> for Point {
    fn from(v: Array1<f64>) -> Self {
        Point::Vector(v)
    }
}

impl From<Array2<f64>> for Point {
    fn from(m: Array2<f64>) -> Self {
        Point::Matrix(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn len_counts_all_parts() {
        let p = Point::Product(vec![
            Point::Vector(array![1.0, 2.0]),
            Point::Matrix(array![[1.0, 0.0], [0.0, 1.0]]),
        ]);
        assert_eq!(p.len(), 6);
        assert!(!p.is_empty());
        assert_eq!(p.kind(), "product");
    }

    #[test]
    fn accessors_reject_wrong_kind() {
        let p = Point::Vector(array![1.0]);
        assert!(p.as_vector().is_ok());
        assert_eq!(
            p.as_matrix(),
            Err(ManifoldError::PointKind { expected: "matrix", found: "vector" })
        );
        assert!(p.as_product().is_err());
    }

    #[test]
    fn negated_and_zeros_keep_structure() {
        let p = Point::Product(vec![Point::Vector(array![1.5]), Point::Vector(array![-2.0])]);
        assert_eq!(
            p.negated(),
            Point::Product(vec![Point::Vector(array![-1.5]), Point::Vector(array![2.0])])
        );
        assert_eq!(
            p.zeros_like(),
            Point::Product(vec![Point::Vector(array![0.0]), Point::Vector(array![0.0])])
        );
    }
}
