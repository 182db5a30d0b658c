//! Convergence tracking & tolerance checks for iterative solvers.

/// Outcome of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputationInfo {
    Success,
    /// The iteration budget ran out, or the error became non-finite.
    NoConvergence,
}

/// Stopping criteria.
#[derive(Clone, Copy, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveStats<T> {
    pub iterations: usize,
    /// Relative residual `sqrt(|r·M⁻¹r| / |r₀·M⁻¹r₀|)` at exit.
    pub error: T,
    pub info: ComputationInfo,
}

impl<T> SolveStats<T> {
    pub fn converged(&self) -> bool {
        self.info == ComputationInfo::Success
    }
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// Squared threshold on the preconditioned residual: iterate while `abs_new > tol² * abs_init`.
    pub fn threshold(&self, abs_init: T) -> T {
        self.tol * self.tol * abs_init
    }

    /// `sqrt(|abs_new / abs_init|)`.
    pub fn relative_error(&self, abs_new: T, abs_init: T) -> T {
        (abs_new / abs_init).abs().sqrt()
    }

    /// Success iff `error <= tol`. A NaN error never converges.
    pub fn status(&self, error: T) -> ComputationInfo {
        if error <= self.tol {
            ComputationInfo::Success
        } else {
            ComputationInfo::NoConvergence
        }
    }

    /// Stats for a solve that stopped after `iterations` with the given residual products.
    pub fn check(&self, abs_new: T, abs_init: T, iterations: usize) -> SolveStats<T> {
        let error = self.relative_error(abs_new, abs_init);
        SolveStats { iterations, error, info: self.status(error) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_tolerance() {
        let conv = Convergence { tol: 1e-6_f64, max_iters: 10 };
        assert_eq!(conv.status(1e-7), ComputationInfo::Success);
        assert_eq!(conv.status(1e-5), ComputationInfo::NoConvergence);
        assert_eq!(conv.status(f64::NAN), ComputationInfo::NoConvergence);
    }

    #[test]
    fn check_reports_relative_error() {
        let conv = Convergence { tol: 0.5_f64, max_iters: 3 };
        let stats = conv.check(1.0, 16.0, 2);
        assert_eq!(stats.error, 0.25);
        assert!(stats.converged());
        assert_eq!(conv.threshold(16.0), 4.0);
    }
}
