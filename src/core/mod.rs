//! Shape metadata, the expression contract, and its implementations for third-party storage.

pub mod shape;
pub mod traits;
pub mod wrappers;

pub use shape::{Const, Dim, Dimension, Dyn, Shape};
pub use traits::{
    Expr, ExprFlags, ExprMut, Indexing, InnerProduct, LinalgScalar, MatVec, RealScalar, Scalar,
};
