use crate::core::traits::{Expr, ExprFlags, INHERITED_FLAGS};

/// Transposed view of an expression.
#[derive(Debug, Clone, Copy)]
pub struct Transpose<E> {
    inner: E,
}

impl<E: Expr> Transpose<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Expr> Expr for Transpose<E> {
    type Scalar = E::Scalar;
    type Rows = E::Cols;
    type Cols = E::Rows;

    const FLAGS: ExprFlags = E::FLAGS.intersection(INHERITED_FLAGS);
    const COEFF_READ_COST: usize = E::COEFF_READ_COST;

    fn rows(&self) -> usize {
        self.inner.cols()
    }
    fn cols(&self) -> usize {
        self.inner.rows()
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> E::Scalar {
        self.inner.coeff(col, row)
    }
}
