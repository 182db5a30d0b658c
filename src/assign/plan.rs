//! Compile-time planning of an assignment.
//!
//! Everything here is a `const fn` over the static metadata of the destination and source
//! types, so the chosen path is fixed per instantiation and the dispatch in
//! [`assign`](super::assign) folds away.

use crate::core::shape::Dim;
use crate::core::traits::{Expr, ExprFlags};
use crate::matrix::Matrix;

/// Largest `size * COEFF_READ_COST` for which a fixed-size assignment is fully unrolled.
pub const UNROLLING_LIMIT: usize = 100;

/// How the coefficients of an assignment are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Vector-shaped, fixed size, over a compile-time index range.
    UnrolledLinear,
    /// Vector-shaped, ascending linear index.
    Linear,
    /// Matrix-shaped, fixed size, compile-time index range mapped to `(k % rows, k / rows)`.
    UnrolledColumnMajor,
    /// Columns outer, rows inner.
    ColumnMajor,
    /// Rows outer, columns inner.
    RowMajor,
}

impl Traversal {
    pub const fn is_unrolled(self) -> bool {
        matches!(self, Traversal::UnrolledLinear | Traversal::UnrolledColumnMajor)
    }
}

/// Path taken by one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub traversal: Traversal,
    /// The source is copied into a temporary before the destination is written.
    pub materialize: bool,
}

/// `true` iff a destination of static size `size` reading a source of cost `cost` is unrolled.
pub const fn should_unroll(size: Dim, cost: usize) -> bool {
    match size {
        Dim::Fixed(n) => n.saturating_mul(cost) <= UNROLLING_LIMIT,
        Dim::Dynamic => false,
    }
}

/// Order in which a looped, matrix-shaped assignment visits coefficients.
pub const fn matrix_order(rows: Dim, cols: Dim) -> Traversal {
    if cols.is_dynamic() || !rows.is_dynamic() {
        Traversal::ColumnMajor
    } else {
        Traversal::RowMajor
    }
}

/// Traversal for writing `S` into `D`, ignoring the materialization gate.
pub const fn traversal<D: Expr, S: Expr>() -> Traversal {
    let dst = D::SHAPE;
    let vector = dst.is_vector() && S::SHAPE.is_vector();
    let unroll = should_unroll(dst.size(), S::COEFF_READ_COST);
    match (vector, unroll) {
        (true, true) => Traversal::UnrolledLinear,
        (true, false) => Traversal::Linear,
        (false, true) => Traversal::UnrolledColumnMajor,
        (false, false) => matrix_order(dst.rows, dst.cols),
    }
}

/// Complete plan for `assign::<D, S>`: when the gate fires, the traversal is the one used to
/// copy the materialized temporary.
pub const fn plan<D: Expr, S: Expr>() -> Plan {
    if S::FLAGS.contains(ExprFlags::EVAL_BEFORE_ASSIGNING) {
        Plan {
            traversal: traversal::<D, Matrix<S::Scalar, S::Rows, S::Cols>>(),
            materialize: true,
        }
    } else {
        Plan { traversal: traversal::<D, S>(), materialize: false }
    }
}

/// Plan for `lazy_assign::<D, S>`, which never materializes.
pub const fn lazy_plan<D: Expr, S: Expr>() -> Plan {
    Plan { traversal: traversal::<D, S>(), materialize: false }
}

/// Static element count of `D`, or 0 when it is only known at run time.
pub const fn static_size<D: Expr>() -> usize {
    match D::SHAPE.size() {
        Dim::Fixed(n) => n,
        Dim::Dynamic => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::{Const, Dyn};
    use crate::expr::{CwiseBinary, Product, Sum};
    use crate::matrix::{DMatrix, DVector, Matrix2, Matrix4, SMatrix, Vector3};

    #[test]
    fn unrolls_small_fixed_copies() {
        assert_eq!(traversal::<Matrix4<f64>, Matrix4<f64>>(), Traversal::UnrolledColumnMajor);
        assert_eq!(traversal::<Vector3<f64>, Vector3<f64>>(), Traversal::UnrolledLinear);
        assert_eq!(
            traversal::<SMatrix<f64, 10, 10>, SMatrix<f64, 10, 10>>(),
            Traversal::UnrolledColumnMajor
        );
        assert_eq!(
            traversal::<SMatrix<f64, 11, 10>, SMatrix<f64, 11, 10>>(),
            Traversal::ColumnMajor
        );
    }

    #[test]
    fn source_cost_counts_against_the_budget() {
        type Plus<'a> = CwiseBinary<Sum, &'a SMatrix<f64, 6, 6>, &'a SMatrix<f64, 6, 6>>;
        // 36 coefficients at cost 3
        assert_eq!(traversal::<SMatrix<f64, 6, 6>, Plus<'_>>(), Traversal::ColumnMajor);
        type SmallPlus<'a> = CwiseBinary<Sum, &'a SMatrix<f64, 5, 5>, &'a SMatrix<f64, 5, 5>>;
        assert_eq!(
            traversal::<SMatrix<f64, 5, 5>, SmallPlus<'_>>(),
            Traversal::UnrolledColumnMajor
        );
    }

    #[test]
    fn dynamic_sizes_never_unroll() {
        assert_eq!(traversal::<DMatrix<f64>, DMatrix<f64>>(), Traversal::ColumnMajor);
        assert_eq!(traversal::<DVector<f64>, DVector<f64>>(), Traversal::Linear);
        assert!(!should_unroll(Dim::Dynamic, 0));
    }

    #[test]
    fn mixed_extents_pick_the_loop_order() {
        assert_eq!(
            traversal::<Matrix<f64, Const<3>, Dyn>, Matrix<f64, Const<3>, Dyn>>(),
            Traversal::ColumnMajor
        );
        assert_eq!(
            traversal::<Matrix<f64, Dyn, Const<3>>, Matrix<f64, Dyn, Const<3>>>(),
            Traversal::RowMajor
        );
    }

    #[test]
    fn products_materialize_through_a_cheap_temporary() {
        type P<'a> = Product<&'a Matrix2<f64>, &'a Matrix2<f64>>;
        let p = plan::<Matrix2<f64>, P<'_>>();
        assert!(p.materialize);
        assert_eq!(p.traversal, Traversal::UnrolledColumnMajor);
        assert!(!lazy_plan::<Matrix2<f64>, P<'_>>().materialize);
    }

    #[test]
    fn static_size_is_zero_for_dynamic() {
        assert_eq!(static_size::<Matrix4<f32>>(), 16);
        assert_eq!(static_size::<DMatrix<f32>>(), 0);
    }
}
