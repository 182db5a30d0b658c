//! Reference-counted handles onto one [`Matrix`].
//!
//! Safe Rust will not let an expression borrow a container that is being written, so a
//! read/write alias can only exist through shared ownership. `Shared` is that case: every
//! clone observes the same coefficients, and assigning an expression built from one handle
//! into another is exactly the situation the assignment engine's materialization gate exists
//! for.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::core::shape::Dimension;
use crate::core::traits::{Expr, ExprFlags, ExprMut, Scalar};
use crate::matrix::dense::Matrix;

/// Handle onto a matrix whose storage may be shared with other handles.
#[derive(Debug)]
pub struct Shared<T, R: Dimension, C: Dimension> {
    inner: Rc<RefCell<Matrix<T, R, C>>>,
}

impl<T, R: Dimension, C: Dimension> Clone for Shared<T, R, C> {
    /// Another handle onto the same storage.
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> Shared<T, R, C> {
    pub fn new(matrix: Matrix<T, R, C>) -> Self {
        Self { inner: Rc::new(RefCell::new(matrix)) }
    }

    /// Copy of the current coefficients.
    pub fn to_matrix(&self) -> Matrix<T, R, C> {
        self.inner.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, Matrix<T, R, C>> {
        self.inner.borrow()
    }

    /// `true` if both handles observe the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> From<Matrix<T, R, C>> for Shared<T, R, C> {
    fn from(matrix: Matrix<T, R, C>) -> Self {
        Self::new(matrix)
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> Expr for Shared<T, R, C> {
    type Scalar = T;
    type Rows = R;
    type Cols = C;

    const FLAGS: ExprFlags = ExprFlags::LVALUE;

    fn rows(&self) -> usize {
        self.inner.borrow().rows()
    }
    fn cols(&self) -> usize {
        self.inner.borrow().cols()
    }
    fn coeff(&self, row: usize, col: usize) -> T {
        self.inner.borrow().coeff(row, col)
    }
    fn coeff_linear(&self, index: usize) -> T {
        self.inner.borrow().coeff_linear(index)
    }
}

impl<T: Scalar, R: Dimension, C: Dimension> ExprMut for Shared<T, R, C> {
    type CoeffMut<'a>
        = RefMut<'a, T>
    where
        Self: 'a;

    /// The handle holds the storage mutably borrowed until it is dropped; reads through
    /// other handles in the meantime panic.
    fn coeff_ref(&mut self, row: usize, col: usize) -> RefMut<'_, T> {
        RefMut::map(self.inner.borrow_mut(), |m| m.coeff_mut(row, col))
    }
    fn coeff_ref_linear(&mut self, index: usize) -> RefMut<'_, T> {
        RefMut::map(self.inner.borrow_mut(), |m| &mut m[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix2;

    #[test]
    fn clones_share_storage() {
        let a = Shared::new(Matrix2::from_row_slice(&[1, 2, 3, 4]));
        let mut b = a.clone();
        *b.coeff_ref(0, 1) = 20;
        assert!(a.ptr_eq(&b));
        assert_eq!(a.coeff(0, 1), 20);
    }

    #[test]
    fn to_matrix_detaches() {
        let a = Shared::new(Matrix2::from_row_slice(&[1.0, 2.0, 3.0, 4.0]));
        let snapshot = a.to_matrix();
        let mut b = a.clone();
        *b.coeff_ref_linear(0) = -1.0;
        assert_eq!(snapshot.coeff(0, 0), 1.0);
        assert_eq!(a.coeff(0, 0), -1.0);
    }
}
