//! Assignment engine: copies an expression's coefficients into a writable container.
//!
//! Every entry point checks shapes before touching the destination, then walks the
//! coefficients along the path chosen by [`plan`] for the concrete `(destination, source)` pair.
//! [`assign`] and the compound variants first copy sources flagged
//! [`ExprFlags::EVAL_BEFORE_ASSIGNING`] into a temporary, so an expression that reads its own
//! destination (through [`Shared`](crate::matrix::Shared) handles) still sees the old values.
//!
//! # Features
//! - Fully unrolled copies for small fixed-size shapes, looped copies otherwise.
//! - Column- or row-major loop order chosen from which extents are static.
//! - Panicking ([`assign`]) and fallible ([`try_assign`]) entry points.
//! - Compound assignment: [`add_assign`], [`sub_assign`], [`compound_assign`], [`scale_assign`].

pub mod plan;

pub use plan::{Plan, Traversal, UNROLLING_LIMIT, lazy_plan, plan, traversal};

use crate::core::shape::Dim;
use crate::core::traits::{Expr, ExprFlags, ExprMut};
use crate::error::LError;
use crate::matrix::Matrix;

/// `dst = src`.
///
/// Panics, before writing anything, if the shapes differ. Sources flagged
/// [`ExprFlags::EVAL_BEFORE_ASSIGNING`] are materialized first.
#[track_caller]
pub fn assign<D, S>(dst: &mut D, src: &S)
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
{
    if let Some(err) = shape_error(dst, src) {
        panic!("{err}");
    }
    if const { S::FLAGS.contains(ExprFlags::EVAL_BEFORE_ASSIGNING) } {
        log::trace!("materializing a {}x{} source before assignment", src.rows(), src.cols());
        let tmp = Matrix::<S::Scalar, S::Rows, S::Cols>::from_expr(src);
        traverse(dst, &tmp, |d, v| *d = v);
    } else {
        traverse(dst, src, |d, v| *d = v);
    }
}

/// `dst = src` without the materialization gate.
///
/// The caller asserts that `src` does not read `dst`.
#[track_caller]
pub fn lazy_assign<D, S>(dst: &mut D, src: &S)
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
{
    if let Some(err) = shape_error(dst, src) {
        panic!("{err}");
    }
    traverse(dst, src, |d, v| *d = v);
}

/// [`assign`], reporting a shape mismatch instead of panicking. Nothing is written on error.
pub fn try_assign<D, S>(dst: &mut D, src: &S) -> Result<(), LError>
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
{
    if let Some(err) = shape_error(dst, src) {
        return Err(err);
    }
    assign(dst, src);
    Ok(())
}

/// `dst[k] = f(dst[k], src[k])` at every position, with the same checks and gate as [`assign`].
#[track_caller]
pub fn compound_assign<D, S, F>(dst: &mut D, src: &S, f: F)
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
    F: Fn(D::Scalar, D::Scalar) -> D::Scalar,
{
    if let Some(err) = shape_error(dst, src) {
        panic!("{err}");
    }
    if const { S::FLAGS.contains(ExprFlags::EVAL_BEFORE_ASSIGNING) } {
        log::trace!("materializing a {}x{} source before update", src.rows(), src.cols());
        let tmp = Matrix::<S::Scalar, S::Rows, S::Cols>::from_expr(src);
        traverse(dst, &tmp, |d, v| *d = f(*d, v));
    } else {
        traverse(dst, src, |d, v| *d = f(*d, v));
    }
}

/// `dst += src`.
#[track_caller]
pub fn add_assign<D, S>(dst: &mut D, src: &S)
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
{
    compound_assign(dst, src, |a, b| a + b);
}

/// `dst -= src`.
#[track_caller]
pub fn sub_assign<D, S>(dst: &mut D, src: &S)
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
{
    compound_assign(dst, src, |a, b| a - b);
}

/// `dst *= factor`.
pub fn scale_assign<D: ExprMut>(dst: &mut D, factor: D::Scalar) {
    for k in 0..dst.size() {
        let mut c = dst.coeff_ref_linear(k);
        *c = *c * factor;
    }
}

/// Shape mismatch between `dst` and `src`, if any. Two statically vector-shaped operands only
/// need the same length.
fn shape_error<D: Expr, S: Expr>(dst: &D, src: &S) -> Option<LError> {
    let vectors = const { D::SHAPE.is_vector() && S::SHAPE.is_vector() };
    let compatible = if vectors {
        dst.size() == src.size()
    } else {
        dst.rows() == src.rows() && dst.cols() == src.cols()
    };
    if compatible {
        None
    } else {
        Some(LError::ShapeMismatch {
            dst_rows: dst.rows(),
            dst_cols: dst.cols(),
            src_rows: src.rows(),
            src_cols: src.cols(),
        })
    }
}

/// Visit every coefficient once along the planned path, calling `f(&mut dst[k], src[k])`.
///
/// The source coefficient is read before the destination handle is taken, so a shared
/// destination is never borrowed mutably while the source reads it.
#[inline(always)]
fn traverse<D, S, F>(dst: &mut D, src: &S, mut f: F)
where
    D: ExprMut,
    S: Expr<Scalar = D::Scalar>,
    F: FnMut(&mut D::Scalar, D::Scalar),
{
    match const { traversal::<D, S>() } {
        Traversal::UnrolledLinear => {
            let n = const { plan::static_size::<D>() };
            debug_assert_eq!(n, dst.size());
            for k in 0..n {
                let v = src.coeff_linear(k);
                f(&mut *dst.coeff_ref_linear(k), v);
            }
        }
        Traversal::UnrolledColumnMajor => {
            let n = const { plan::static_size::<D>() };
            let rows = const {
                match D::SHAPE.rows {
                    Dim::Fixed(r) if r > 0 => r,
                    _ => 1,
                }
            };
            debug_assert_eq!(n, dst.size());
            for k in 0..n {
                let (row, col) = (k % rows, k / rows);
                let v = src.coeff(row, col);
                f(&mut *dst.coeff_ref(row, col), v);
            }
        }
        Traversal::Linear => {
            for k in 0..dst.size() {
                let v = src.coeff_linear(k);
                f(&mut *dst.coeff_ref_linear(k), v);
            }
        }
        Traversal::ColumnMajor => {
            let (rows, cols) = (dst.rows(), dst.cols());
            for col in 0..cols {
                for row in 0..rows {
                    let v = src.coeff(row, col);
                    f(&mut *dst.coeff_ref(row, col), v);
                }
            }
        }
        Traversal::RowMajor => {
            let (rows, cols) = (dst.rows(), dst.cols());
            for row in 0..rows {
                for col in 0..cols {
                    let v = src.coeff(row, col);
                    f(&mut *dst.coeff_ref(row, col), v);
                }
            }
        }
    }
}
