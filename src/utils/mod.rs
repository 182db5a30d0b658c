pub mod convergence;

pub use convergence::{ComputationInfo, Convergence, SolveStats};
