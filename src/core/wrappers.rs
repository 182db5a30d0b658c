//! Expression-contract implementations for borrowed expressions, `faer` dense matrices and `Vec<T>`.
//!
//! This module lets third-party storage take part in assignment and in the iterative solver
//! without being copied into a [`Matrix`](crate::matrix::Matrix) first.
//!
//! # Features
//! - `&E` is an expression whenever `E` is, so combinators can hold named containers by reference.
//! - `faer::Mat<T>` is a dynamic-by-dynamic container (read, write, matrix-vector product).
//! - `Vec<T>` is a dynamic column vector.
//! - Inner products and norms over `Vec<T>` and [`DVector<T>`], with optional Rayon parallelism.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::shape::{Const, Dyn, Shape};
use crate::core::traits::{
    Expr, ExprFlags, ExprMut, Indexing, InnerProduct, LinalgScalar, MatVec, Scalar,
};
use crate::expr::Product;
use crate::matrix::DVector;
use faer::Mat;

/// A borrowed expression reads exactly like the expression itself.
impl<E: Expr> Expr for &E {
    type Scalar = E::Scalar;
    type Rows = E::Rows;
    type Cols = E::Cols;

    const SHAPE: Shape = E::SHAPE;
    const FLAGS: ExprFlags = E::FLAGS;
    const COEFF_READ_COST: usize = E::COEFF_READ_COST;

    #[inline(always)]
    fn rows(&self) -> usize {
        (**self).rows()
    }
    #[inline(always)]
    fn cols(&self) -> usize {
        (**self).cols()
    }
    #[inline(always)]
    fn coeff(&self, row: usize, col: usize) -> E::Scalar {
        (**self).coeff(row, col)
    }
    #[inline(always)]
    fn coeff_linear(&self, index: usize) -> E::Scalar {
        (**self).coeff_linear(index)
    }
}

/// `faer::Mat` as a dynamic container.
impl<T: Scalar> Expr for Mat<T> {
    type Scalar = T;
    type Rows = Dyn;
    type Cols = Dyn;

    const FLAGS: ExprFlags = ExprFlags::LVALUE;

    fn rows(&self) -> usize {
        self.nrows()
    }
    fn cols(&self) -> usize {
        self.ncols()
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}

impl<T: Scalar> ExprMut for Mat<T> {
    type CoeffMut<'a> = &'a mut T
    where
        Self: 'a;

    #[inline]
    fn coeff_ref(&mut self, row: usize, col: usize) -> &mut T {
        &mut self[(row, col)]
    }
}

/// Computes `y = A * x` for a `faer` dense matrix through a lazy product expression.
impl<T: Scalar> MatVec<DVector<T>> for Mat<T> {
    fn matvec(&self, x: &DVector<T>, y: &mut DVector<T>) {
        assert_eq!(self.nrows(), y.rows(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.rows(), "Input vector x has incorrect length");
        // y never aliases self or x, so the product is written without a temporary.
        crate::assign::lazy_assign(y, &Product::new(self, x));
    }
}

/// Implements the `Indexing` trait for `faer::Mat`.
impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

/// `Vec<T>` as a dynamic column vector.
impl<T: Scalar> Expr for Vec<T> {
    type Scalar = T;
    type Rows = Dyn;
    type Cols = Const<1>;

    const FLAGS: ExprFlags = ExprFlags::LVALUE;

    fn rows(&self) -> usize {
        self.len()
    }
    fn cols(&self) -> usize {
        1
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        debug_assert_eq!(col, 0, "column index out of range for a column vector");
        self[row]
    }
    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self[index]
    }
}

impl<T: Scalar> ExprMut for Vec<T> {
    type CoeffMut<'a> = &'a mut T
    where
        Self: 'a;

    #[inline]
    fn coeff_ref(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert_eq!(col, 0, "column index out of range for a column vector");
        &mut self[row]
    }
    #[inline]
    fn coeff_ref_linear(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }
}

/// Implements the `Indexing` trait for `Vec<T>`, treating a vector as a column vector.
impl<T> Indexing for Vec<T> {
    /// Returns the number of rows (length) of the vector.
    fn nrows(&self) -> usize {
        self.len()
    }
    fn ncols(&self) -> usize {
        1
    }
}

/// Hermitian dot product `Σ conj(xᵢ) yᵢ` of two equally long slices, with optional Rayon
/// parallelism.
fn slice_dot<T: LinalgScalar>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        x.par_iter()
            .zip(y.par_iter())
            .map(|(xi, yi)| xi.conj() * *yi)
            .reduce(|| T::zero(), |acc, v| acc + v)
    }
    #[cfg(not(feature = "rayon"))]
    {
        x.iter()
            .zip(y.iter())
            .map(|(xi, yi)| xi.conj() * *yi)
            .fold(T::zero(), |acc, v| acc + v)
    }
}

fn slice_norm<T: LinalgScalar>(x: &[T]) -> T::Real {
    let zero = <T::Real as num_traits::Zero>::zero();
    #[cfg(feature = "rayon")]
    let sum = {
        use rayon::prelude::*;
        x.par_iter().map(|xi| xi.abs2()).reduce(|| zero, |acc, v| acc + v)
    };
    #[cfg(not(feature = "rayon"))]
    let sum = x.iter().map(|xi| xi.abs2()).fold(zero, |acc, v| acc + v);
    num_traits::Float::sqrt(sum)
}

/// Implements inner product and norm for `Vec<T>`.
impl<T: LinalgScalar> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    type Real = T::Real;
    /// Computes the dot product of two vectors: `x^H y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        slice_dot(x, y)
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T::Real {
        slice_norm(x)
    }
}

/// Implements inner product and norm for [`DVector<T>`], the solver's working vector type.
impl<T: LinalgScalar> InnerProduct<DVector<T>> for () {
    type Scalar = T;
    type Real = T::Real;
    fn dot(&self, x: &DVector<T>, y: &DVector<T>) -> T {
        slice_dot(x.as_slice(), y.as_slice())
    }
    fn norm(&self, x: &DVector<T>) -> T::Real {
        slice_norm(x.as_slice())
    }
}
