//! Self-adjoint views: a square matrix read through one stored triangle.
//!
//! Symmetric and Hermitian operators are usually stored with only one triangle filled in.
//! [`SelfAdjointView`] reads the diagonal and the chosen triangle and mirrors the other one
//! with conjugation, so the untouched half of the storage is never read. The conjugate
//! gradient front end reads its operator through such a view, chosen by an [`OperatorView`]
//! marker: [`Lower`] (the default), [`Upper`], or [`Full`] for operators that only provide a
//! matrix-vector product.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::core::traits::{Expr, ExprFlags, Indexing, LinalgScalar, MatVec, INHERITED_FLAGS};
use crate::expr::Product;
use crate::matrix::DVector;

/// Which triangle of a self-adjoint matrix holds the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpLo {
    Lower,
    Upper,
}

/// Type-level triangle selector.
pub trait Triangle {
    const UPLO: UpLo;
}

/// Read the lower triangle and the diagonal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lower;

/// Read the upper triangle and the diagonal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Upper;

/// Read the operator as is, through its own [`MatVec`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Full;

impl Triangle for Lower {
    const UPLO: UpLo = UpLo::Lower;
}

impl Triangle for Upper {
    const UPLO: UpLo = UpLo::Upper;
}

/// `matrix` read as a self-adjoint matrix.
///
/// Coefficients of the stored triangle are used as is, the opposite triangle is their
/// conjugate mirror, and only the real part of the diagonal is read.
#[derive(Debug)]
pub struct SelfAdjointView<'a, M, U = Lower> {
    matrix: &'a M,
    _uplo: PhantomData<U>,
}

impl<M, U> Clone for SelfAdjointView<'_, M, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, U> Copy for SelfAdjointView<'_, M, U> {}

impl<'a, M, U> SelfAdjointView<'a, M, U> {
    pub fn new(matrix: &'a M) -> Self {
        Self { matrix, _uplo: PhantomData }
    }

    /// The underlying storage.
    pub fn matrix(&self) -> &'a M {
        self.matrix
    }
}

impl<M, U> Expr for SelfAdjointView<'_, M, U>
where
    M: Expr,
    M::Scalar: LinalgScalar,
    U: Triangle,
{
    type Scalar = M::Scalar;
    type Rows = M::Rows;
    type Cols = M::Cols;

    const FLAGS: ExprFlags = M::FLAGS.intersection(INHERITED_FLAGS);
    const COEFF_READ_COST: usize = M::COEFF_READ_COST.saturating_add(1);

    fn rows(&self) -> usize {
        self.matrix.rows()
    }
    fn cols(&self) -> usize {
        self.matrix.cols()
    }

    fn coeff(&self, row: usize, col: usize) -> M::Scalar {
        let stored = match row.cmp(&col) {
            Ordering::Equal => {
                return <M::Scalar as LinalgScalar>::from_real(self.matrix.coeff(row, row).re());
            }
            Ordering::Greater => U::UPLO == UpLo::Lower,
            Ordering::Less => U::UPLO == UpLo::Upper,
        };
        if stored {
            self.matrix.coeff(row, col)
        } else {
            self.matrix.coeff(col, row).conj()
        }
    }
}

impl<M: Expr, U> Indexing for SelfAdjointView<'_, M, U> {
    fn nrows(&self) -> usize {
        self.matrix.rows()
    }
    fn ncols(&self) -> usize {
        self.matrix.cols()
    }
}

impl<M, T, U> MatVec<DVector<T>> for SelfAdjointView<'_, M, U>
where
    M: Expr<Scalar = T>,
    T: LinalgScalar,
    U: Triangle,
{
    fn matvec(&self, x: &DVector<T>, y: &mut DVector<T>) {
        assert_eq!(self.rows(), y.rows(), "Output vector y has incorrect length");
        assert_eq!(self.cols(), x.rows(), "Input vector x has incorrect length");
        crate::assign::lazy_assign(y, &Product::new(self, x));
    }
}

/// How a solver reads the operator it is bound to.
pub trait OperatorView {
    type Operator<'a, A: 'a>;

    fn view<'a, A: 'a>(a: &'a A) -> Self::Operator<'a, A>;
}

impl OperatorView for Lower {
    type Operator<'a, A: 'a> = SelfAdjointView<'a, A, Lower>;

    fn view<'a, A: 'a>(a: &'a A) -> Self::Operator<'a, A> {
        SelfAdjointView::new(a)
    }
}

impl OperatorView for Upper {
    type Operator<'a, A: 'a> = SelfAdjointView<'a, A, Upper>;

    fn view<'a, A: 'a>(a: &'a A) -> Self::Operator<'a, A> {
        SelfAdjointView::new(a)
    }
}

impl OperatorView for Full {
    type Operator<'a, A: 'a> = &'a A;

    fn view<'a, A: 'a>(a: &'a A) -> Self::Operator<'a, A> {
        a
    }
}
