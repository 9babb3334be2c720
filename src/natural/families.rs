//! natural::families — default resolvers and the layout-driven partitioner.
//!
//! Purpose
//! -------
//! Hold the per-family rules that turn `(distribution, dims, conditioner)`
//! into a [`BaseManifold`], plus the generic translation between a flat
//! natural-parameter vector and the [`Point`] layout of a base manifold.
//!
//! Key behaviors
//! -------------
//! - Resolvers check the `dims` arity first (`[]` for univariate families,
//!   `[k]` with `k > 0` for vector families) and fail with
//!   [`NaturalError::InvalidDims`] otherwise.
//! - [`partition_by_layout`] walks the base manifold: vector-shaped factors
//!   consume `manifold_dimension()` entries, matrix factors consume the
//!   packed upper triangle, products recurse.
//! - [`flatten_by_layout`] is the exact inverse.
//!
//! Conventions
//! -----------
//! - A `k × k` symmetric matrix is packed as its row-major upper triangle
//!   `(0,0), (0,1), …, (0,k−1), (1,1), …, (k−1,k−1)`, which is `k(k+1)/2`
//!   entries. Unpacking mirrors the triangle into the lower half.
//! - The conditioner never changes which manifold a default resolver picks;
//!   it is accepted so custom resolvers can share the signature.
use crate::{
    manifolds::{base::BaseManifold, point::Point, traits::Manifold},
    natural::{
        distribution::{Conditioner, Distribution},
        errors::{NaturalError, NaturalResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1};

// ---- dims checks ----

/// Require `dims == []`.
pub fn scalar_dims(distribution: Distribution, dims: &[usize]) -> NaturalResult<()> {
    if dims.is_empty() {
        Ok(())
    } else {
        Err(NaturalError::InvalidDims { distribution, expected: "[]", found: dims.to_vec() })
    }
}

/// Require `dims == [k]` with `k > 0` and return `k`.
pub fn vector_dims(distribution: Distribution, dims: &[usize]) -> NaturalResult<usize> {
    match dims {
        [k] if *k > 0 => Ok(*k),
        _ => Err(NaturalError::InvalidDims {
            distribution,
            expected: "[k] with k > 0",
            found: dims.to_vec(),
        }),
    }
}

// ---- Default resolvers ----

/// Unconstrained scalar natural parameter (Bernoulli logit, Poisson log-rate).
pub fn real_line(d: Distribution, dims: &[usize], _: &Conditioner) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::euclidean(1))
}

/// Single strictly negative natural parameter, `η < 0`.
pub fn negative_half_line(
    d: Distribution, dims: &[usize], _: &Conditioner,
) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::shifted_negative(0.0)?)
}

/// Pareto: `η = -α - 1 < -1`.
pub fn below_minus_one(
    d: Distribution, dims: &[usize], _: &Conditioner,
) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::shifted_negative(-1.0)?)
}

/// Chi-squared: `η = ν/2 - 1 > -1`.
pub fn above_minus_one(
    d: Distribution, dims: &[usize], _: &Conditioner,
) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::shifted_positive(-1.0)?)
}

/// Beta: `(α - 1, β - 1)`, both `> -1`.
pub fn beta(d: Distribution, dims: &[usize], _: &Conditioner) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::product(vec![
        BaseManifold::shifted_positive(-1.0)?,
        BaseManifold::shifted_positive(-1.0)?,
    ]))
}

/// Gamma: `(α - 1, -β)`.
pub fn gamma(d: Distribution, dims: &[usize], _: &Conditioner) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::product(vec![
        BaseManifold::shifted_positive(-1.0)?,
        BaseManifold::shifted_negative(0.0)?,
    ]))
}

/// Normal-type scalar families: `(μ/σ², -1/(2σ²))`.
pub fn location_precision(
    d: Distribution, dims: &[usize], _: &Conditioner,
) -> NaturalResult<BaseManifold> {
    scalar_dims(d, dims)?;
    Ok(BaseManifold::product(vec![BaseManifold::euclidean(1), BaseManifold::shifted_negative(0.0)?]))
}

/// Unconstrained k-vector (Dirichlet `α - 1`, Categorical log-probabilities).
pub fn real_vector(
    d: Distribution, dims: &[usize], _: &Conditioner,
) -> NaturalResult<BaseManifold> {
    let k = vector_dims(d, dims)?;
    Ok(BaseManifold::euclidean(k))
}

/// Multivariate Normal: `(Σ⁻¹μ, -½Σ⁻¹)`.
pub fn mv_normal(d: Distribution, dims: &[usize], _: &Conditioner) -> NaturalResult<BaseManifold> {
    let k = vector_dims(d, dims)?;
    Ok(BaseManifold::product(vec![BaseManifold::euclidean(k), BaseManifold::negative_definite(k)?]))
}

// ---- Layout translation ----

/// Split a flat natural-parameter vector into the point layout of `base`.
///
/// # Errors
/// [`NaturalError::DimensionMismatch`] if `point.len()` differs from
/// `base.manifold_dimension()`.
pub fn partition_by_layout(
    _: Distribution, base: &BaseManifold, point: ArrayView1<'_, f64>,
) -> NaturalResult<Point> {
    let expected = base.manifold_dimension();
    if point.len() != expected {
        return Err(NaturalError::DimensionMismatch { expected, found: point.len() });
    }
    let mut offset = 0;
    Ok(take_part(base, point, &mut offset))
}

/// Inverse of [`partition_by_layout`].
///
/// # Errors
/// [`NaturalError::PointLayout`] if `point` does not have the structure of
/// `base` (wrong variant, length, shape or part count).
pub fn flatten_by_layout(
    distribution: Distribution, base: &BaseManifold, point: &Point,
) -> NaturalResult<Array1<f64>> {
    let mut out = Vec::with_capacity(base.manifold_dimension());
    push_part(distribution, base, point, &mut out)?;
    Ok(Array1::from(out))
}

fn take_part(base: &BaseManifold, flat: ArrayView1<'_, f64>, offset: &mut usize) -> Point {
    match base {
        BaseManifold::Product(product) => Point::Product(
            product.factors().iter().map(|factor| take_part(factor, flat, offset)).collect(),
        ),
        BaseManifold::SymmetricPositiveDefinite(m) => {
            Point::Matrix(unpack_symmetric(flat, offset, m.k()))
        }
        BaseManifold::SymmetricNegativeDefinite(m) => {
            Point::Matrix(unpack_symmetric(flat, offset, m.k()))
        }
        other => {
            let n = other.manifold_dimension();
            let part = flat.slice(ndarray::s![*offset..*offset + n]).to_owned();
            *offset += n;
            Point::Vector(part)
        }
    }
}

fn push_part(
    distribution: Distribution, base: &BaseManifold, point: &Point, out: &mut Vec<f64>,
) -> NaturalResult<()> {
    let layout_error = |reason: String| NaturalError::PointLayout { distribution, reason };
    match base {
        BaseManifold::Product(product) => {
            let factors = product.factors();
            let parts = point.as_product().map_err(|e| layout_error(e.to_string()))?;
            if parts.len() != factors.len() {
                return Err(layout_error(format!(
                    "expected {} parts, found {}",
                    factors.len(),
                    parts.len()
                )));
            }
            factors.iter().zip(parts).try_for_each(|(f, p)| push_part(distribution, f, p, out))
        }
        BaseManifold::SymmetricPositiveDefinite(m) => {
            let matrix = point.as_matrix().map_err(|e| layout_error(e.to_string()))?;
            pack_symmetric(matrix, m.k(), out).map_err(layout_error)
        }
        BaseManifold::SymmetricNegativeDefinite(m) => {
            let matrix = point.as_matrix().map_err(|e| layout_error(e.to_string()))?;
            pack_symmetric(matrix, m.k(), out).map_err(layout_error)
        }
        other => {
            let v = point.as_vector().map_err(|e| layout_error(e.to_string()))?;
            let n = other.manifold_dimension();
            if v.len() != n {
                return Err(layout_error(format!("expected {n} entries, found {}", v.len())));
            }
            out.extend(v.iter().copied());
            Ok(())
        }
    }
}

/// Rebuild a symmetric `k × k` matrix from its packed upper triangle.
fn unpack_symmetric(flat: ArrayView1<'_, f64>, offset: &mut usize, k: usize) -> Array2<f64> {
    let mut m = Array2::zeros((k, k));
    for i in 0..k {
        for j in i..k {
            let v = flat[*offset];
            *offset += 1;
            m[[i, j]] = v;
            m[[j, i]] = v;
        }
    }
    m
}

fn pack_symmetric(m: &Array2<f64>, k: usize, out: &mut Vec<f64>) -> Result<(), String> {
    if m.dim() != (k, k) {
        return Err(format!("expected a {k}x{k} matrix, found shape {:?}", m.shape()));
    }
    for i in 0..k {
        for j in i..k {
            out.push(m[[i, j]]);
        }
    }
    Ok(())
}
