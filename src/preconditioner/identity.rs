use crate::core::traits::ExprMut;
use crate::error::LError;
use crate::preconditioner::Preconditioner;

/// M⁻¹ = I: `apply` copies the residual.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPreconditioner;

impl IdentityPreconditioner {
    pub fn new() -> Self {
        Self
    }
}

impl<M, V: ExprMut> Preconditioner<M, V> for IdentityPreconditioner {
    fn apply(&self, r: &V, z: &mut V) -> Result<(), LError> {
        if r.size() != z.size() {
            return Err(LError::DimensionMismatch { expected: r.size(), found: z.size() });
        }
        z.lazy_assign(r);
        Ok(())
    }
}
