//! lineval: lazily evaluated matrix expressions and a generic Conjugate Gradient solver
//!
//! Containers and algebraic combinators share one expression contract ([`Expr`] /
//! [`ExprMut`]). Assigning an expression into a container decides, from static metadata
//! alone, whether to unroll the copy, which traversal order to use, and whether the source
//! must be materialized first because it may read the destination. The Conjugate Gradient
//! solver is written entirely against that contract plus a matrix-vector product and a
//! preconditioner.

pub mod assign;
pub mod config;
pub mod core;
pub mod error;
pub mod expr;
pub mod matrix;
pub mod preconditioner;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use self::assign::{
    add_assign, assign, compound_assign, lazy_assign, scale_assign, sub_assign, try_assign,
};
pub use self::config::SolverOptions;
pub use self::core::{
    Const, Dim, Dimension, Dyn, Expr, ExprFlags, ExprMut, Indexing, InnerProduct, LinalgScalar,
    MatVec, RealScalar, Scalar, Shape,
};
pub use self::error::LError;
pub use self::expr::{ExprExt, Lazy, Product, Transpose};
pub use self::matrix::*;
pub use num_complex::Complex;
pub use self::preconditioner::{IdentityPreconditioner, Jacobi, Preconditioner};
pub use self::solver::{ConjugateGradient, conjugate_gradient};
pub use self::utils::{ComputationInfo, Convergence, SolveStats};
