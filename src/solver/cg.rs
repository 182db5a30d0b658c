//! Preconditioned Conjugate Gradient for self-adjoint positive definite operators.
//!
//! [`conjugate_gradient`] is the bare kernel: it runs the iteration from whatever is in `x`
//! and reports how it stopped. [`ConjugateGradient`] wraps it with a bound operator, a
//! preconditioner set up once per operator, solver options, and the statistics of the last
//! solve. The front end reads the operator through a
//! [`SelfAdjointView`](crate::matrix::SelfAdjointView) of its lower triangle unless told
//! otherwise, so only half of a symmetric or Hermitian matrix needs to be stored.
//!
//! Scalars are real or complex ([`LinalgScalar`]); tolerances and error estimates are in the
//! associated real type.
//!
//! Every working-vector update (`x += αp`, `r -= αAp`, `p = z + βp`) is written through the
//! assignment engine, so any operator implementing [`MatVec`] over [`DVector`] can be solved
//! without further glue.
//!
//! # References
//! - Y. Saad, *Iterative Methods for Sparse Linear Systems*, 2nd ed., §9.2 (preconditioned CG).

use crate::assign::{add_assign, assign, compound_assign, sub_assign};
use crate::config::options::SolverOptions;
use std::marker::PhantomData;

use crate::core::traits::{Expr, ExprMut, Indexing, InnerProduct, LinalgScalar, MatVec};
use crate::error::LError;
use crate::expr::ExprExt;
use crate::matrix::selfadjoint::{Lower, OperatorView};
use crate::matrix::DVector;
use crate::preconditioner::{Jacobi, Preconditioner};
use crate::utils::convergence::{ComputationInfo, Convergence, SolveStats};

/// Run preconditioned CG on `a x = rhs`, starting from and overwriting `x`.
///
/// Stops after `conv.max_iters` iterations or once `re(rᴴM⁻¹r) <= tol² · re(r₀ᴴM⁻¹r₀)`. The
/// returned error is `sqrt(|rᴴM⁻¹r / r₀ᴴM⁻¹r₀|)`; a zero initial residual returns immediately
/// with error 0. A breakdown (`pᴴAp = 0`) is not repaired: it surfaces as a non-finite error
/// and [`ComputationInfo::NoConvergence`].
///
/// `a` is used as given; wrap it in a [`SelfAdjointView`](crate::matrix::SelfAdjointView) to
/// read a single triangle.
///
/// Panics unless `rhs` and `x` are columns of `a.nrows()` coefficients. Preconditioner
/// failures are propagated.
pub fn conjugate_gradient<A, B, X, P, T>(
    a: &A,
    rhs: &B,
    x: &mut X,
    precond: &P,
    conv: &Convergence<T::Real>,
) -> Result<SolveStats<T::Real>, LError>
where
    A: MatVec<DVector<T>> + Indexing,
    B: Expr<Scalar = T>,
    X: ExprMut<Scalar = T>,
    P: Preconditioner<A, DVector<T>>,
    T: LinalgScalar,
    (): InnerProduct<DVector<T>, Scalar = T>,
{
    let n = a.nrows();
    assert!(
        rhs.rows() == n && rhs.cols() == 1,
        "right-hand side has incorrect length: expected {n}x1, found {}x{}",
        rhs.rows(),
        rhs.cols()
    );
    assert!(
        x.rows() == n && x.cols() == 1,
        "solution vector has incorrect length: expected {n}x1, found {}x{}",
        x.rows(),
        x.cols()
    );
    let ip = ();

    let mut xv = DVector::zeros(n);
    assign(&mut xv, x);

    // r = b - A x
    let mut residual = DVector::zeros(n);
    a.matvec(&xv, &mut residual);
    compound_assign(&mut residual, rhs, |ax, b| b - ax);

    let mut p = DVector::zeros(n);
    precond.apply(&residual, &mut p)?;

    let mut abs_new = ip.dot(&residual, &p).re();
    let abs_init = abs_new;
    if abs_init == <T::Real as num_traits::Zero>::zero() {
        log::debug!("cg: initial residual is zero");
        return Ok(SolveStats {
            iterations: 0,
            error: num_traits::zero(),
            info: ComputationInfo::Success,
        });
    }
    let threshold = conv.threshold(abs_init);

    let mut z = DVector::zeros(n);
    let mut tmp = DVector::zeros(n);
    let mut i = 0;
    while i < conv.max_iters && abs_new > threshold {
        a.matvec(&p, &mut tmp);

        let alpha = T::from_real(abs_new) / ip.dot(&p, &tmp);
        add_assign(&mut xv, &(&p).scale(alpha));
        sub_assign(&mut residual, &(&tmp).scale(alpha));
        precond.apply(&residual, &mut z)?;

        let abs_old = abs_new;
        abs_new = ip.dot(&residual, &z).re();
        let beta = T::from_real(abs_new / abs_old);
        compound_assign(&mut p, &z, |p, z| z + beta * p);
        i += 1;
        log::trace!("cg: iteration {i}, r·z = {abs_new:?}");
    }

    assign(x, &xv);
    let stats = conv.check(abs_new, abs_init, i);
    log::debug!(
        "cg: {:?} after {} iterations, estimated error {:?}",
        stats.info,
        stats.iterations,
        stats.error
    );
    Ok(stats)
}

/// Conjugate Gradient solver bound to one operator.
///
/// `U` selects how the operator is read: [`Lower`] (default) or
/// [`Upper`](crate::matrix::Upper) treat it as self-adjoint and read only that triangle,
/// [`Full`](crate::matrix::Full) uses the operator's own [`MatVec`].
///
/// ```
/// use lineval::{ConjugateGradient, DMatrix, DVector};
///
/// let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![1.0, 2.0]);
/// let mut cg: ConjugateGradient<_, f64> = ConjugateGradient::new();
/// cg.compute(&a).unwrap();
/// let x = cg.solve(&b).unwrap();
/// assert!(cg.info() == lineval::ComputationInfo::Success);
/// assert!((4.0 * x[0] + x[1] - 1.0_f64).abs() < 1e-12);
/// ```
pub struct ConjugateGradient<'a, A, T: LinalgScalar, P = Jacobi<T>, U = Lower> {
    matrix: Option<&'a A>,
    preconditioner: P,
    options: SolverOptions<T::Real>,
    stats: Option<SolveStats<T::Real>>,
    _uplo: PhantomData<U>,
}

impl<'a, A, T, P, U> ConjugateGradient<'a, A, T, P, U>
where
    A: 'a,
    U: OperatorView,
    U::Operator<'a, A>: MatVec<DVector<T>> + Indexing,
    T: LinalgScalar,
    P: Preconditioner<U::Operator<'a, A>, DVector<T>>,
    (): InnerProduct<DVector<T>, Scalar = T>,
{
    /// Unbound solver with default options and a default preconditioner.
    pub fn new() -> Self
    where
        P: Default,
    {
        Self::with_preconditioner(P::default())
    }

    pub fn with_preconditioner(preconditioner: P) -> Self {
        Self {
            matrix: None,
            preconditioner,
            options: SolverOptions::default(),
            stats: None,
            _uplo: PhantomData,
        }
    }

    pub fn with_options(mut self, options: SolverOptions<T::Real>) -> Self {
        self.options = options;
        self
    }

    /// Shortcut for [`new`](Self::new) followed by [`compute`](Self::compute).
    pub fn from_operator(a: &'a A) -> Result<Self, LError>
    where
        P: Default,
    {
        let mut cg = Self::new();
        cg.compute(a)?;
        Ok(cg)
    }

    /// Bind `a` and set the preconditioner up for it.
    ///
    /// The solver keeps a reference to `a`; later solves reuse it. Statistics of earlier
    /// solves are discarded.
    pub fn compute(&mut self, a: &'a A) -> Result<&mut Self, LError> {
        let op = U::view(a);
        let (rows, cols) = (op.nrows(), op.ncols());
        if rows != cols {
            return Err(LError::NotSquare { rows, cols });
        }
        self.preconditioner.setup(&op)?;
        self.matrix = Some(a);
        self.stats = None;
        log::debug!("cg: bound a {rows}x{cols} operator");
        Ok(self)
    }

    pub fn is_initialized(&self) -> bool {
        self.matrix.is_some()
    }

    pub fn max_iterations(&self) -> usize {
        self.options.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.options.max_iterations = max_iterations;
        self
    }

    pub fn tolerance(&self) -> T::Real {
        self.options.tolerance
    }

    /// Panics unless `tolerance > 0`.
    pub fn set_tolerance(&mut self, tolerance: T::Real) -> &mut Self {
        assert!(
            tolerance > <T::Real as num_traits::Zero>::zero(),
            "tolerance must be positive"
        );
        self.options.tolerance = tolerance;
        self
    }

    pub fn options(&self) -> &SolverOptions<T::Real> {
        &self.options
    }

    pub fn preconditioner(&self) -> &P {
        &self.preconditioner
    }

    pub fn preconditioner_mut(&mut self) -> &mut P {
        &mut self.preconditioner
    }

    /// Solve `A x = b` starting from `x = 0`.
    pub fn solve<B: Expr<Scalar = T>>(&mut self, b: &B) -> Result<DVector<T>, LError> {
        let mut x = DVector::zeros(self.size());
        self.solve_in_place(b, &mut x)?;
        Ok(x)
    }

    /// Solve `A x = b` starting from `guess`.
    pub fn solve_with_guess<B, G>(&mut self, b: &B, guess: &G) -> Result<DVector<T>, LError>
    where
        B: Expr<Scalar = T>,
        G: Expr<Scalar = T>,
    {
        let n = self.size();
        assert!(
            guess.rows() == n && guess.cols() == 1,
            "initial guess has incorrect length: expected {n}x1, found {}x{}",
            guess.rows(),
            guess.cols()
        );
        let mut x = DVector::zeros(n);
        assign(&mut x, guess);
        self.solve_in_place(b, &mut x)?;
        Ok(x)
    }

    /// Solve `A x = b` starting from, and overwriting, `x`.
    pub fn solve_in_place<B, X>(
        &mut self,
        b: &B,
        x: &mut X,
    ) -> Result<SolveStats<T::Real>, LError>
    where
        B: Expr<Scalar = T>,
        X: ExprMut<Scalar = T>,
    {
        let op = U::view(self.operator());
        let conv = Convergence {
            tol: self.options.tolerance,
            max_iters: self.options.max_iterations,
        };
        let stats = conjugate_gradient(&op, b, x, &self.preconditioner, &conv)?;
        self.stats = Some(stats);
        Ok(stats)
    }

    /// Iterations performed by the last solve. Panics before the first solve.
    pub fn iterations(&self) -> usize {
        self.solved().iterations
    }

    /// Estimated relative error of the last solve. Panics before the first solve.
    pub fn error(&self) -> T::Real {
        self.solved().error
    }

    /// Outcome of the last solve. Panics before the first solve.
    pub fn info(&self) -> ComputationInfo {
        self.solved().info
    }

    pub fn last_stats(&self) -> Option<SolveStats<T::Real>> {
        self.stats
    }

    /// Row count of the bound operator.
    fn size(&self) -> usize {
        U::view(self.operator()).nrows()
    }

    fn operator(&self) -> &'a A {
        match self.matrix {
            Some(a) => a,
            None => panic!("ConjugateGradient is not initialized: call compute() first"),
        }
    }

    fn solved(&self) -> &SolveStats<T::Real> {
        match &self.stats {
            Some(stats) => stats,
            None => panic!("no solve has been performed yet"),
        }
    }
}

impl<'a, A, T, P, U> Default for ConjugateGradient<'a, A, T, P, U>
where
    A: 'a,
    U: OperatorView,
    U::Operator<'a, A>: MatVec<DVector<T>> + Indexing,
    T: LinalgScalar,
    P: Preconditioner<U::Operator<'a, A>, DVector<T>> + Default,
    (): InnerProduct<DVector<T>, Scalar = T>,
{
    fn default() -> Self {
        Self::new()
    }
}
