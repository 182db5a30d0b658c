//! Preconditioners for the conjugate-gradient solver.
//!
//! This module defines the [`Preconditioner`] trait and the two implementations the solver is
//! used with: [`IdentityPreconditioner`] and the diagonal [`Jacobi`] preconditioner.

use crate::error::LError;

/// A preconditioner M ≈ A⁻¹.
pub trait Preconditioner<M, V> {
    /// Apply M⁻¹ to r, writing z = M⁻¹ r
    fn apply(&self, r: &V, z: &mut V) -> Result<(), LError>;
    /// Optionally: setup/factorize from A
    fn setup(&mut self, _a: &M) -> Result<(), LError> {
        Ok(())
    }
}

pub mod identity;
pub mod jacobi;

pub use identity::IdentityPreconditioner;
pub use jacobi::Jacobi;
