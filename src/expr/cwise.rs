//! Coefficient-wise combinators.
//!
//! Both node kinds are parameterized by a small functor type so that the cost model can
//! charge each operator separately and the whole tree stays statically dispatched.

use crate::core::traits::{Expr, ExprFlags, INHERITED_FLAGS, Scalar};

/// Scalar function applied to every coefficient.
pub trait UnaryOp<T> {
    const COST: usize = 1;
    fn call(&self, x: T) -> T;
}

/// Scalar function combining two coefficients at the same position.
pub trait BinaryOp<T> {
    const COST: usize = 1;
    fn call(&self, a: T, b: T) -> T;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Negate;

impl<T: Scalar> UnaryOp<T> for Negate {
    #[inline]
    fn call(&self, x: T) -> T {
        T::zero() - x
    }
}

/// Multiplication by a fixed scalar.
#[derive(Debug, Clone, Copy)]
pub struct ScalarMultiple<T>(pub T);

impl<T: Scalar> UnaryOp<T> for ScalarMultiple<T> {
    #[inline]
    fn call(&self, x: T) -> T {
        x * self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Abs;

impl<T: Scalar + PartialOrd> UnaryOp<T> for Abs {
    #[inline]
    fn call(&self, x: T) -> T {
        if x < T::zero() { T::zero() - x } else { x }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<T: Scalar> BinaryOp<T> for Sum {
    #[inline]
    fn call(&self, a: T, b: T) -> T {
        a + b
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Difference;

impl<T: Scalar> BinaryOp<T> for Difference {
    #[inline]
    fn call(&self, a: T, b: T) -> T {
        a - b
    }
}

/// Coefficient-wise (Hadamard) product.
#[derive(Debug, Clone, Copy, Default)]
pub struct CwiseProd;

impl<T: Scalar> BinaryOp<T> for CwiseProd {
    #[inline]
    fn call(&self, a: T, b: T) -> T {
        a * b
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Quotient;

impl<T: Scalar> BinaryOp<T> for Quotient {
    const COST: usize = 4;
    #[inline]
    fn call(&self, a: T, b: T) -> T {
        a / b
    }
}

/// `op(inner[k])` at every position.
#[derive(Debug, Clone, Copy)]
pub struct CwiseUnary<Op, E> {
    op: Op,
    inner: E,
}

impl<Op, E> CwiseUnary<Op, E>
where
    E: Expr,
    Op: UnaryOp<E::Scalar>,
{
    pub fn new(op: Op, inner: E) -> Self {
        Self { op, inner }
    }
}

impl<Op, E> Expr for CwiseUnary<Op, E>
where
    E: Expr,
    Op: UnaryOp<E::Scalar>,
{
    type Scalar = E::Scalar;
    type Rows = E::Rows;
    type Cols = E::Cols;

    const FLAGS: ExprFlags = E::FLAGS.intersection(INHERITED_FLAGS);
    const COEFF_READ_COST: usize =
        E::COEFF_READ_COST.saturating_add(<Op as UnaryOp<E::Scalar>>::COST);

    fn rows(&self) -> usize {
        self.inner.rows()
    }
    fn cols(&self) -> usize {
        self.inner.cols()
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> E::Scalar {
        self.op.call(self.inner.coeff(row, col))
    }
    #[inline]
    fn coeff_linear(&self, index: usize) -> E::Scalar {
        self.op.call(self.inner.coeff_linear(index))
    }
}

/// `op(lhs[k], rhs[k])` at every position. Shapes follow the left operand.
#[derive(Debug, Clone, Copy)]
pub struct CwiseBinary<Op, L, R> {
    op: Op,
    lhs: L,
    rhs: R,
}

impl<Op, L, R> CwiseBinary<Op, L, R>
where
    L: Expr,
    R: Expr<Scalar = L::Scalar>,
    Op: BinaryOp<L::Scalar>,
{
    /// Panics if the operands differ in shape.
    pub fn new(op: Op, lhs: L, rhs: R) -> Self {
        assert!(
            lhs.rows() == rhs.rows() && lhs.cols() == rhs.cols(),
            "coefficient-wise operands differ in shape: {}x{} vs {}x{}",
            lhs.rows(),
            lhs.cols(),
            rhs.rows(),
            rhs.cols()
        );
        Self { op, lhs, rhs }
    }
}

impl<Op, L, R> Expr for CwiseBinary<Op, L, R>
where
    L: Expr,
    R: Expr<Scalar = L::Scalar>,
    Op: BinaryOp<L::Scalar>,
{
    type Scalar = L::Scalar;
    type Rows = L::Rows;
    type Cols = L::Cols;

    const FLAGS: ExprFlags = L::FLAGS.union(R::FLAGS).intersection(INHERITED_FLAGS);
    const COEFF_READ_COST: usize = L::COEFF_READ_COST
        .saturating_add(R::COEFF_READ_COST)
        .saturating_add(<Op as BinaryOp<L::Scalar>>::COST);

    fn rows(&self) -> usize {
        self.lhs.rows()
    }
    fn cols(&self) -> usize {
        self.lhs.cols()
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> L::Scalar {
        self.op.call(self.lhs.coeff(row, col), self.rhs.coeff(row, col))
    }
    #[inline]
    fn coeff_linear(&self, index: usize) -> L::Scalar {
        self.op.call(self.lhs.coeff_linear(index), self.rhs.coeff_linear(index))
    }
}
