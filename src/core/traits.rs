//! Core capability traits for lineval.
//!
//! [`Expr`] is the contract every container and every algebraic combinator satisfies:
//! dimension queries, coefficient reads, and static metadata (shape, per-coefficient read
//! cost, [`ExprFlags`]). [`ExprMut`] adds mutable coefficient access and is implemented
//! only by nodes that own storage. [`MatVec`], [`InnerProduct`] and [`Indexing`] are the
//! seams the iterative solver consumes.

use std::ops::DerefMut;

use bitflags::bitflags;
use num_complex::Complex;

use crate::core::shape::{Dimension, Shape};

/// Coefficient type usable inside expressions.
pub trait Scalar: num_traits::Num + Copy + std::fmt::Debug + 'static {}

impl<T> Scalar for T where T: num_traits::Num + Copy + std::fmt::Debug + 'static {}

/// Real floating-point coefficient type, as required by the iterative solver.
pub trait RealScalar: Scalar + num_traits::Float {}

impl<T> RealScalar for T where T: Scalar + num_traits::Float {}

/// Field the iterative solver works over: real floats and complex numbers.
///
/// For real types `conj` and `re` are the identity; for complex types they let a Hermitian
/// inner product return its real part exactly.
pub trait LinalgScalar: Scalar + Send + Sync {
    /// Type of `re()`, norms, tolerances and error estimates.
    type Real: RealScalar + Send + Sync;

    fn conj(self) -> Self;
    fn re(self) -> Self::Real;
    fn from_real(re: Self::Real) -> Self;
    /// `|self|²`
    fn abs2(self) -> Self::Real;
}

macro_rules! impl_real_linalg_scalar {
    ($($t:ty),*) => {$(
        impl LinalgScalar for $t {
            type Real = $t;

            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn re(self) -> $t {
                self
            }
            #[inline]
            fn from_real(re: $t) -> Self {
                re
            }
            #[inline]
            fn abs2(self) -> $t {
                self * self
            }
        }
    )*};
}

impl_real_linalg_scalar!(f32, f64);

impl<R: RealScalar + Send + Sync> LinalgScalar for Complex<R> {
    type Real = R;

    #[inline]
    fn conj(self) -> Self {
        Complex::new(self.re, -self.im)
    }
    #[inline]
    fn re(self) -> R {
        self.re
    }
    #[inline]
    fn from_real(re: R) -> Self {
        Complex::new(re, R::zero())
    }
    #[inline]
    fn abs2(self) -> R {
        self.re * self.re + self.im * self.im
    }
}

bitflags! {
    /// Static per-kind capability tags of an expression node.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ExprFlags: u32 {
        /// The node owns writable coefficient storage.
        const LVALUE                = 0b0000_0001;
        /// Reading coefficients while the destination is being written may observe
        /// already-overwritten values; the source has to be materialized first.
        const EVAL_BEFORE_ASSIGNING = 0b0000_0010;
    }
}

/// Flags a combinator inherits from one of its operands.
pub const INHERITED_FLAGS: ExprFlags = ExprFlags::EVAL_BEFORE_ASSIGNING;

/// Read side of the expression contract.
pub trait Expr {
    type Scalar: Scalar;
    /// Row extent at the type level.
    type Rows: Dimension;
    /// Column extent at the type level.
    type Cols: Dimension;

    const SHAPE: Shape = Shape::new(
        <Self::Rows as Dimension>::DIM,
        <Self::Cols as Dimension>::DIM,
    );
    const FLAGS: ExprFlags = ExprFlags::empty();
    /// Abstract cost of one `coeff` call, in scalar reads/ops.
    const COEFF_READ_COST: usize = 1;

    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    fn size(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Run-time vector test: one row or one column.
    fn is_vector(&self) -> bool {
        self.rows() == 1 || self.cols() == 1
    }

    /// Coefficient at `(row, col)`.
    fn coeff(&self, row: usize, col: usize) -> Self::Scalar;

    /// Coefficient at a column-major linear index in `[0, size())`.
    #[inline]
    fn coeff_linear(&self, index: usize) -> Self::Scalar {
        let rows = self.rows();
        self.coeff(index % rows, index / rows)
    }

    fn requires_eval_before_assign() -> bool
    where
        Self: Sized,
    {
        Self::FLAGS.contains(ExprFlags::EVAL_BEFORE_ASSIGNING)
    }
}

/// Write side of the expression contract, for nodes that own their coefficients.
pub trait ExprMut: Expr {
    /// Mutable handle to one stored coefficient.
    type CoeffMut<'a>: DerefMut<Target = Self::Scalar>
    where
        Self: 'a;

    fn coeff_ref(&mut self, row: usize, col: usize) -> Self::CoeffMut<'_>;

    #[inline]
    fn coeff_ref_linear(&mut self, index: usize) -> Self::CoeffMut<'_> {
        let rows = self.rows();
        self.coeff_ref(index % rows, index / rows)
    }

    /// `self = src`, materializing `src` first when it is flagged as alias-unsafe.
    fn assign<S>(&mut self, src: &S) -> &mut Self
    where
        Self: Sized,
        S: Expr<Scalar = Self::Scalar>,
    {
        crate::assign::assign(self, src);
        self
    }

    /// `self = src` without the materialization gate.
    fn lazy_assign<S>(&mut self, src: &S) -> &mut Self
    where
        Self: Sized,
        S: Expr<Scalar = Self::Scalar>,
    {
        crate::assign::lazy_assign(self, src);
        self
    }

    /// Fill every coefficient with `value`.
    fn fill(&mut self, value: Self::Scalar) -> &mut Self
    where
        Self: Sized,
    {
        for k in 0..self.size() {
            *self.coeff_ref_linear(k) = value;
        }
        self
    }
}

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy;
    /// Type of norms.
    type Real: Copy + PartialOrd;
    /// Compute dot(x, y) = xᴴ y, conjugating `x`.
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Real;
}

/// Uniform dimension queries for linear operators.
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
}

impl<A: MatVec<V> + ?Sized, V> MatVec<V> for &A {
    fn matvec(&self, x: &V, y: &mut V) {
        (**self).matvec(x, y)
    }
}

impl<A: Indexing + ?Sized> Indexing for &A {
    fn nrows(&self) -> usize {
        (**self).nrows()
    }
    fn ncols(&self) -> usize {
        (**self).ncols()
    }
}
