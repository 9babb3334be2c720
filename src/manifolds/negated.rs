//! negated — lazy, read-only negation view over a matrix.
//!
//! Purpose
//! -------
//! Provide [`Negated`], a zero-copy view whose every entry reads as the
//! arithmetic negation of the wrapped matrix. The negative-definite manifold
//! uses it to hand `-p` to the positive-definite routines without first
//! materializing a negated copy of each argument.
//!
//! Key behaviors
//! -------------
//! - [`MatrixAccess`] is the element-access capability: a shape query plus a
//!   by-value `get(i, j)`. It is implemented for `ndarray` arrays and views,
//!   `nalgebra::DMatrix`, `RefCell<M>` and `Negated` itself.
//! - `Negated::new(&m)` stores only the reference; `get(i, j)` returns
//!   `-m.get(i, j)` on every call. No write path exists.
//!
//! Borrow rule
//! -----------
//! - A `Negated<'a, M>` holds `&'a M` and never owns it, so the wrapped
//!   matrix must outlive the view. The borrow checker enforces this for plain
//!   references.
//! - Wrapping a `RefCell<M>` makes later mutation of the source visible
//!   through the view. Each `get` takes a short shared borrow, so the caller
//!   must not read through the view while holding a `borrow_mut` of the cell
//!   (that read panics, as any `RefCell` double borrow does).
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use std::cell::RefCell;

/// Read access to the entries of a 2-D matrix.
pub trait MatrixAccess {
    /// `(rows, cols)`.
    fn dims(&self) -> (usize, usize);

    /// Entry at row `i`, column `j`. Indices must be in bounds.
    fn get(&self, i: usize, j: usize) -> f64;
}

impl MatrixAccess for Array2<f64> {
    fn dims(&self) -> (usize, usize) {
        self.dim()
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self[[i, j]]
    }
}

impl MatrixAccess for ArrayView2<'_, f64> {
    fn dims(&self) -> (usize, usize) {
        self.dim()
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self[[i, j]]
    }
}

impl MatrixAccess for DMatrix<f64> {
    fn dims(&self) -> (usize, usize) {
        self.shape()
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self[(i, j)]
    }
}

impl<M: MatrixAccess> MatrixAccess for RefCell<M> {
    fn dims(&self) -> (usize, usize) {
        self.borrow().dims()
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.borrow().get(i, j)
    }
}

/// Lazily negated view of a matrix.
///
/// Reads go through to the wrapped matrix with a sign flip; nothing is
/// copied. See the module docs for the borrow rule.
#[derive(Debug)]
pub struct Negated<'a, M: MatrixAccess + ?Sized> {
    inner: &'a M,
}

impl<'a, M: MatrixAccess + ?Sized> Negated<'a, M> {
    pub fn new(inner: &'a M) -> Self {
        Negated { inner }
    }

    /// The wrapped (un-negated) matrix.
    pub fn inner(&self) -> &'a M {
        self.inner
    }

    /// Materialize the negation into a new array.
    pub fn to_owned_array(&self) -> Array2<f64> {
        let (rows, cols) = self.dims();
        Array2::from_shape_fn((rows, cols), |(i, j)| self.get(i, j))
    }
}

impl<M: MatrixAccess + ?Sized> MatrixAccess for Negated<'_, M> {
    fn dims(&self) -> (usize, usize) {
        self.inner.dims()
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        -self.inner.get(i, j)
    }
}
