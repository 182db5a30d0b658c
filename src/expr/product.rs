//! Matrix product expression.
//!
//! A product reads every coefficient of a row of `lhs` and a column of `rhs` for each
//! coefficient it yields, so assigning it into one of its own operands would read values the
//! same assignment already overwrote. The node therefore carries
//! [`ExprFlags::EVAL_BEFORE_ASSIGNING`]; [`Lazy`](super::Lazy) strips it when the caller knows
//! the destination is disjoint.

use crate::core::shape::{Dim, Dimension};
use crate::core::traits::{Expr, ExprFlags, INHERITED_FLAGS};

/// Read cost charged for a product whose inner extent is only known at run time.
pub const DYNAMIC_PRODUCT_COST: usize = usize::MAX;

/// Inner extent of `lhs * rhs`: whichever side fixes it.
const fn inner_dim(lhs_cols: Dim, rhs_rows: Dim) -> Dim {
    match lhs_cols {
        Dim::Fixed(_) => lhs_cols,
        Dim::Dynamic => rhs_rows,
    }
}

/// `k` multiplies, `k - 1` adds, plus the operand reads.
const fn product_cost(inner: Dim, lhs_cost: usize, rhs_cost: usize) -> usize {
    match inner {
        Dim::Fixed(0) => 0,
        Dim::Fixed(k) => k
            .saturating_mul(lhs_cost.saturating_add(rhs_cost).saturating_add(1))
            .saturating_add(k - 1),
        Dim::Dynamic => DYNAMIC_PRODUCT_COST,
    }
}

/// `lhs * rhs`.
#[derive(Debug, Clone, Copy)]
pub struct Product<L, R> {
    lhs: L,
    rhs: R,
}

impl<L, R> Product<L, R>
where
    L: Expr,
    R: Expr<Scalar = L::Scalar>,
{
    /// Panics unless `lhs.cols() == rhs.rows()`.
    pub fn new(lhs: L, rhs: R) -> Self {
        assert_eq!(
            lhs.cols(),
            rhs.rows(),
            "invalid matrix product: {}x{} times {}x{}",
            lhs.rows(),
            lhs.cols(),
            rhs.rows(),
            rhs.cols()
        );
        Self { lhs, rhs }
    }

    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<L, R> Expr for Product<L, R>
where
    L: Expr,
    R: Expr<Scalar = L::Scalar>,
{
    type Scalar = L::Scalar;
    type Rows = L::Rows;
    type Cols = R::Cols;

    const FLAGS: ExprFlags = L::FLAGS
        .union(R::FLAGS)
        .intersection(INHERITED_FLAGS)
        .union(ExprFlags::EVAL_BEFORE_ASSIGNING);
    const COEFF_READ_COST: usize = product_cost(
        inner_dim(<L::Cols as Dimension>::DIM, <R::Rows as Dimension>::DIM),
        L::COEFF_READ_COST,
        R::COEFF_READ_COST,
    );

    fn rows(&self) -> usize {
        self.lhs.rows()
    }
    fn cols(&self) -> usize {
        self.rhs.cols()
    }

    fn coeff(&self, row: usize, col: usize) -> L::Scalar {
        let inner = self.lhs.cols();
        if inner == 0 {
            return num_traits::Zero::zero();
        }
        let mut acc = self.lhs.coeff(row, 0) * self.rhs.coeff(0, col);
        for k in 1..inner {
            acc = acc + self.lhs.coeff(row, k) * self.rhs.coeff(k, col);
        }
        acc
    }
}
