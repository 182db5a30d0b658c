//! Solver options.
//!
//! `SolverOptions` holds the settings a [`ConjugateGradient`](crate::solver::ConjugateGradient)
//! carries between solves: the iteration budget and the relative tolerance on the
//! preconditioned residual.

/// Iteration budget and tolerance for the iterative solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions<T> {
    /// Maximum number of iterations (default 1000).
    pub max_iterations: usize,

    /// Relative tolerance (default machine epsilon).
    pub tolerance: T,
}

impl<T: num_traits::Float> Default for SolverOptions<T> {
    fn default() -> Self {
        Self { max_iterations: 1000, tolerance: T::epsilon() }
    }
}

impl<T: num_traits::Float> SolverOptions<T> {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Panics unless `tolerance > 0`.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        self.tolerance = tolerance;
        self
    }
}
