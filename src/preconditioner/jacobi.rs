// Jacobi preconditioner implementation

use crate::core::traits::{ExprMut, Indexing, MatVec, Scalar};
use crate::error::LError;
use crate::expr::ExprExt;
use crate::matrix::DVector;
use crate::preconditioner::Preconditioner;

/// Jacobi preconditioner: M⁻¹ = D⁻¹
///
/// A zero diagonal entry is treated as 1, so the corresponding residual component passes
/// through unchanged.
#[derive(Debug, Clone)]
pub struct Jacobi<T> {
    pub(crate) inv_diag: DVector<T>,
}

impl<T: Scalar> Jacobi<T> {
    /// new with empty state; user must call `setup`.
    pub fn new() -> Self {
        Self { inv_diag: DVector::zeros(0) }
    }

    /// Inverted diagonal computed by the last `setup`.
    pub fn inv_diag(&self) -> &DVector<T> {
        &self.inv_diag
    }
}

impl<T: Scalar> Default for Jacobi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, V, T> Preconditioner<M, V> for Jacobi<T>
where
    M: MatVec<V> + Indexing,
    V: ExprMut<Scalar = T> + From<Vec<T>>,
    T: Scalar,
{
    /// Probes the diagonal of `a` with one unit-vector product per column.
    fn setup(&mut self, a: &M) -> Result<(), LError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(LError::NotSquare { rows: n, cols: a.ncols() });
        }
        let mut e = vec![T::zero(); n];
        let mut col = V::from(vec![T::zero(); n]);
        let mut diag = Vec::with_capacity(n);
        for i in 0..n {
            e[i] = T::one();
            a.matvec(&V::from(e.clone()), &mut col);
            e[i] = T::zero();
            diag.push(col.coeff_linear(i));
        }
        self.inv_diag = diag
            .into_iter()
            .map(|d| if d != T::zero() { T::one() / d } else { T::one() })
            .collect::<Vec<_>>()
            .into();
        log::debug!("jacobi: inverted diagonal of a {n}x{n} operator");
        Ok(())
    }

    fn apply(&self, r: &V, z: &mut V) -> Result<(), LError> {
        let n = self.inv_diag.len();
        for found in [r.size(), z.size()] {
            if found != n {
                return Err(LError::DimensionMismatch { expected: n, found });
            }
        }
        z.lazy_assign(&(&self.inv_diag).cwise_product(r));
        Ok(())
    }
}
