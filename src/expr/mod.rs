//! Expression combinators.
//!
//! Every node here implements [`Expr`] by forwarding to its operands; nothing is computed until
//! the tree is assigned into a container. The nodes hold their operands by value, so named
//! containers enter a tree by reference (`&a`), which is itself an expression.
//!
//! # Features
//! - [`Transpose`], [`CwiseUnary`], [`CwiseBinary`] and [`Product`] nodes.
//! - [`Lazy`], which clears [`ExprFlags::EVAL_BEFORE_ASSIGNING`] for callers that know the
//!   destination does not alias the source.
//! - [`ExprExt`], method-style construction for any expression.
//! - Operator overloads (`+`, `-`, `*`, unary `-`) on borrowed containers and on the nodes.

pub mod cwise;
pub mod ops;
pub mod product;
pub mod transpose;

pub use cwise::{
    Abs, BinaryOp, CwiseBinary, CwiseProd, CwiseUnary, Difference, Negate, Quotient,
    ScalarMultiple, Sum, UnaryOp,
};
pub use product::Product;
pub use transpose::Transpose;

use crate::core::traits::{Expr, ExprFlags};
use crate::matrix::Matrix;

/// Forwards to `inner` with [`ExprFlags::EVAL_BEFORE_ASSIGNING`] cleared.
///
/// Assigning a `Lazy` into a container that the wrapped expression also reads is a logic error:
/// the result is whatever the interleaved reads and writes happen to produce.
#[derive(Debug, Clone, Copy)]
pub struct Lazy<E> {
    inner: E,
}

impl<E: Expr> Lazy<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Expr> Expr for Lazy<E> {
    type Scalar = E::Scalar;
    type Rows = E::Rows;
    type Cols = E::Cols;

    const FLAGS: ExprFlags = E::FLAGS.difference(ExprFlags::EVAL_BEFORE_ASSIGNING);
    const COEFF_READ_COST: usize = E::COEFF_READ_COST;

    fn rows(&self) -> usize {
        self.inner.rows()
    }
    fn cols(&self) -> usize {
        self.inner.cols()
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> E::Scalar {
        self.inner.coeff(row, col)
    }
    #[inline]
    fn coeff_linear(&self, index: usize) -> E::Scalar {
        self.inner.coeff_linear(index)
    }
}

/// Builder methods available on every expression.
pub trait ExprExt: Expr + Sized {
    fn transposed(self) -> Transpose<Self> {
        Transpose::new(self)
    }

    fn negate(self) -> CwiseUnary<Negate, Self> {
        CwiseUnary::new(Negate, self)
    }

    /// Every coefficient multiplied by `factor`.
    fn scale(self, factor: Self::Scalar) -> CwiseUnary<ScalarMultiple<Self::Scalar>, Self> {
        CwiseUnary::new(ScalarMultiple(factor), self)
    }

    fn cwise_abs(self) -> CwiseUnary<Abs, Self>
    where
        Self::Scalar: PartialOrd,
    {
        CwiseUnary::new(Abs, self)
    }

    fn plus<R: Expr<Scalar = Self::Scalar>>(self, rhs: R) -> CwiseBinary<Sum, Self, R> {
        CwiseBinary::new(Sum, self, rhs)
    }

    fn minus<R: Expr<Scalar = Self::Scalar>>(self, rhs: R) -> CwiseBinary<Difference, Self, R> {
        CwiseBinary::new(Difference, self, rhs)
    }

    fn cwise_product<R: Expr<Scalar = Self::Scalar>>(
        self,
        rhs: R,
    ) -> CwiseBinary<CwiseProd, Self, R> {
        CwiseBinary::new(CwiseProd, self, rhs)
    }

    fn cwise_quotient<R: Expr<Scalar = Self::Scalar>>(
        self,
        rhs: R,
    ) -> CwiseBinary<Quotient, Self, R> {
        CwiseBinary::new(Quotient, self, rhs)
    }

    /// Matrix product. Panics if the inner extents differ.
    fn product<R: Expr<Scalar = Self::Scalar>>(self, rhs: R) -> Product<Self, R> {
        Product::new(self, rhs)
    }

    /// Promise that the destination of the next assignment does not alias this expression.
    fn lazy(self) -> Lazy<Self> {
        Lazy::new(self)
    }

    /// Materialize into a fresh container of the same static shape.
    fn eval(&self) -> Matrix<Self::Scalar, Self::Rows, Self::Cols> {
        Matrix::from_expr(self)
    }

    /// Sum of coefficient-wise products, without conjugation. Panics if the sizes differ.
    fn dot<R: Expr<Scalar = Self::Scalar>>(&self, rhs: &R) -> Self::Scalar {
        assert_eq!(self.size(), rhs.size(), "dot product of expressions of different size");
        let mut acc = <Self::Scalar as num_traits::Zero>::zero();
        for k in 0..self.size() {
            acc = acc + self.coeff_linear(k) * rhs.coeff_linear(k);
        }
        acc
    }

    fn squared_norm(&self) -> Self::Scalar {
        self.dot(self)
    }
}

impl<E: Expr> ExprExt for E {}

/// Sum of all coefficients.
pub fn sum<E: Expr>(expr: &E) -> E::Scalar {
    let mut acc = <E::Scalar as num_traits::Zero>::zero();
    for k in 0..expr.size() {
        acc = acc + expr.coeff_linear(k);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DMatrix, Matrix2, SMatrix, Vector3};

    #[test]
    fn lazy_clears_only_the_materialization_flag() {
        let a = Matrix2::<f64>::identity();
        let p = (&a).product(&a);
        assert!(ExprFlags::EVAL_BEFORE_ASSIGNING.intersects(flags_of(&p)));
        let l = p.lazy();
        assert!(flags_of(&l).is_empty());
    }

    fn flags_of<E: Expr>(_: &E) -> ExprFlags {
        E::FLAGS
    }

    #[test]
    fn combinators_compose() {
        let a = SMatrix::<i32, 2, 3>::from_row_slice(&[1, 2, 3, 4, 5, 6]);
        let b = SMatrix::<i32, 2, 3>::from_row_slice(&[6, 5, 4, 3, 2, 1]);
        let e = (&a).plus(&b).scale(2).transposed();
        assert_eq!((e.rows(), e.cols()), (3, 2));
        assert_eq!(e.coeff(2, 1), 14);
        assert_eq!((&a).minus(&b).cwise_abs().coeff(0, 0), 5);
    }

    #[test]
    fn eval_matches_coefficients() {
        let a = DMatrix::from_fn(3, 2, |i, j| (i * 2 + j) as f64);
        let t = (&a).transposed().eval();
        assert_eq!((t.rows(), t.cols()), (2, 3));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t[(i, j)], a[(j, i)]);
            }
        }
    }

    #[test]
    fn dot_and_norm() {
        let v = Vector3::from_row_slice(&[1.0, 2.0, 2.0]);
        assert_eq!(v.squared_norm(), 9.0);
        assert_eq!(sum(&v), 5.0);
    }
}
