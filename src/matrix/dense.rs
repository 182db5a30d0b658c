//! Owned dense container, generic over fixed and dynamic dimensions.
//!
//! `Matrix<T, R, C>` stores its coefficients column-major in a `Vec<T>`. `R` and `C` are
//! [`Const<N>`] or [`Dyn`], so the same type covers fixed-size matrices (`Matrix3<f64>`),
//! fully dynamic ones (`DMatrix<f64>`), and the mixed cases the assignment engine plans
//! traversal order for.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::core::shape::{Const, Dimension, Dyn};
use crate::core::traits::{Expr, ExprFlags, ExprMut, Indexing, MatVec, Scalar};
use crate::expr::Product;

/// Column-major owned matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T, R: Dimension, C: Dimension> {
    data: Vec<T>,
    rows: R,
    cols: C,
}

pub type SMatrix<T, const R: usize, const C: usize> = Matrix<T, Const<R>, Const<C>>;
pub type SVector<T, const N: usize> = Matrix<T, Const<N>, Const<1>>;
pub type Matrix2<T> = SMatrix<T, 2, 2>;
pub type Matrix3<T> = SMatrix<T, 3, 3>;
pub type Matrix4<T> = SMatrix<T, 4, 4>;
pub type Vector2<T> = SVector<T, 2>;
pub type Vector3<T> = SVector<T, 3>;
pub type Vector4<T> = SVector<T, 4>;
pub type DMatrix<T> = Matrix<T, Dyn, Dyn>;
pub type DVector<T> = Matrix<T, Dyn, Const<1>>;
pub type RowDVector<T> = Matrix<T, Const<1>, Dyn>;

impl<T: Scalar, R: Dimension, C: Dimension> Matrix<T, R, C> {
    /// Zero matrix with the given (type-level) dimensions.
    pub fn zeros_generic(rows: R, cols: C) -> Self {
        let len = rows.value() * cols.value();
        Self { data: vec![T::zero(); len], rows, cols }
    }

    /// Build from `f(row, col)`, evaluated in column-major order.
    pub fn from_fn_generic<F: FnMut(usize, usize) -> T>(rows: R, cols: C, mut f: F) -> Self {
        let (nr, nc) = (rows.value(), cols.value());
        let mut data = Vec::with_capacity(nr * nc);
        for j in 0..nc {
            for i in 0..nr {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    /// Wrap column-major storage. Panics if `data.len() != rows * cols`.
    pub fn from_column_major_generic(rows: R, cols: C, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows.value() * cols.value(),
            "storage length does not match a {}x{} matrix",
            rows.value(),
            cols.value()
        );
        Self { data, rows, cols }
    }

    /// Build from row-major coefficients, the natural order for literals.
    pub fn from_row_slice_generic(rows: R, cols: C, values: &[T]) -> Self {
        let nc = cols.value();
        assert_eq!(
            values.len(),
            rows.value() * nc,
            "{} values cannot fill a {}x{} matrix",
            values.len(),
            rows.value(),
            nc
        );
        Self::from_fn_generic(rows, cols, |i, j| values[i * nc + j])
    }

    /// Ones on the diagonal, zeros elsewhere.
    pub fn identity_generic(rows: R, cols: C) -> Self {
        Self::from_fn_generic(rows, cols, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Materialize any expression of the same static shape into a new container.
    ///
    /// The fresh container cannot alias `expr`, so it is filled through
    /// [`lazy_assign`](crate::assign::lazy_assign).
    pub fn from_expr<E>(expr: &E) -> Self
    where
        E: Expr<Scalar = T, Rows = R, Cols = C>,
    {
        let mut m = Self::zeros_generic(R::from_usize(expr.rows()), C::from_usize(expr.cols()));
        crate::assign::lazy_assign(&mut m, expr);
        m
    }

    /// Column-major coefficient storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Mutable coefficient, as a plain reference.
    #[inline]
    pub fn coeff_mut(&mut self, row: usize, col: usize) -> &mut T {
        let k = self.offset(row, col);
        &mut self.data[k]
    }

    #[inline(always)]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.rows.value() && col < self.cols.value(),
            "coefficient ({}, {}) out of range for a {}x{} matrix",
            row,
            col,
            self.rows.value(),
            self.cols.value()
        );
        col * self.rows.value() + row
    }
}

impl<T: Scalar, const R: usize, const C: usize> SMatrix<T, R, C> {
    pub fn zeros() -> Self {
        Self::zeros_generic(Const, Const)
    }

    pub fn from_fn<F: FnMut(usize, usize) -> T>(f: F) -> Self {
        Self::from_fn_generic(Const, Const, f)
    }

    pub fn from_row_slice(values: &[T]) -> Self {
        Self::from_row_slice_generic(Const, Const, values)
    }

    pub fn identity() -> Self {
        Self::identity_generic(Const, Const)
    }
}

impl<T: Scalar> DMatrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::zeros_generic(Dyn(rows), Dyn(cols))
    }

    pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, f: F) -> Self {
        Self::from_fn_generic(Dyn(rows), Dyn(cols), f)
    }

    pub fn from_row_slice(rows: usize, cols: usize, values: &[T]) -> Self {
        Self::from_row_slice_generic(Dyn(rows), Dyn(cols), values)
    }

    pub fn identity(n: usize) -> Self {
        Self::identity_generic(Dyn(n), Dyn(n))
    }
}

impl<T: Scalar> DVector<T> {
    pub fn zeros(len: usize) -> Self {
        Self::zeros_generic(Dyn(len), Const)
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        let len = values.len();
        Self::from_column_major_generic(Dyn(len), Const, values)
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self::from_vec(values.to_vec())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Scalar> From<Vec<T>> for DVector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T, R: Dimension, C: Dimension> AsRef<[T]> for Matrix<T, R, C> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> Expr for Matrix<T, R, C> {
    type Scalar = T;
    type Rows = R;
    type Cols = C;

    const FLAGS: ExprFlags = ExprFlags::LVALUE;

    #[inline(always)]
    fn rows(&self) -> usize {
        self.rows.value()
    }
    #[inline(always)]
    fn cols(&self) -> usize {
        self.cols.value()
    }
    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self.data[self.offset(row, col)]
    }
    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self.data[index]
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> ExprMut for Matrix<T, R, C> {
    type CoeffMut<'a>
        = &'a mut T
    where
        Self: 'a;

    #[inline]
    fn coeff_ref(&mut self, row: usize, col: usize) -> &mut T {
        self.coeff_mut(row, col)
    }
    #[inline]
    fn coeff_ref_linear(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        self.coeff_mut(row, col)
    }
}

/// Column-major linear indexing.
impl<T: Scalar, R: Dimension, C: Dimension> Index<usize> for Matrix<T, R, C> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> IndexMut<usize> for Matrix<T, R, C> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> Indexing for Matrix<T, R, C> {
    fn nrows(&self) -> usize {
        self.rows.value()
    }
    fn ncols(&self) -> usize {
        self.cols.value()
    }
}

/// Computes `y = A * x` by writing a lazy product expression straight into `y`.
impl<T: Scalar, R: Dimension, C: Dimension> MatVec<DVector<T>> for Matrix<T, R, C> {
    fn matvec(&self, x: &DVector<T>, y: &mut DVector<T>) {
        assert_eq!(self.rows(), y.rows(), "Output vector y has incorrect length");
        assert_eq!(self.cols(), x.rows(), "Input vector x has incorrect length");
        crate::assign::lazy_assign(y, &Product::new(self, x));
    }
}

impl<T, R, C> fmt::Display for Matrix<T, R, C>
where
    T: Scalar + fmt::Display,
    R: Dimension,
    C: Dimension,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.coeff(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
