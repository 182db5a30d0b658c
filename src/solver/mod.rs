//! Iterative solver interfaces.

pub mod cg;
pub use cg::{ConjugateGradient, conjugate_gradient};
