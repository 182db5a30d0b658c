//! Integration tests for preconditioners and the Conjugate Gradient solver.
//!
//! This module verifies that the identity and Jacobi preconditioners work correctly with the
//! CG kernel and front end on small test matrices. It checks convergence, solution accuracy,
//! and correct preconditioner application, for both the owned container and `faer::Mat`
//! operators.

use approx::assert_abs_diff_eq;
use faer::Mat;
use lineval::preconditioner::{IdentityPreconditioner, Jacobi, Preconditioner};
use lineval::{ComputationInfo, ConjugateGradient, Convergence, DMatrix, DVector, conjugate_gradient};

/// Construct a symmetric positive definite (SPD) tridiagonal matrix of size `n`.
/// Returns the matrix, the right-hand side vector `b` for the solution x = [1, ..., 1],
/// and the true solution vector.
fn spd_matrix(n: usize) -> (Mat<f64>, DVector<f64>, Vec<f64>) {
    let mut a = Mat::zeros(n, n);
    for i in 0..n {
        a[(i, i)] = 2.0;
        if i > 0 {
            a[(i, i - 1)] = -1.0;
            a[(i - 1, i)] = -1.0;
        }
    }
    let x_true = vec![1.0; n];
    let mut b = vec![0.0; n];
    for i in 0..n {
        for j in 0..n {
            b[i] += a[(i, j)] * x_true[j];
        }
    }
    (a, DVector::from_vec(b), x_true)
}

/// Compute the relative L2 error between two vectors.
fn rel_error(x: &[f64], x_true: &[f64]) -> f64 {
    let num: f64 = x.iter().zip(x_true).map(|(xi, ti)| (xi - ti).powi(2)).sum();
    let denom: f64 = x_true.iter().map(|ti| ti.powi(2)).sum();
    (num / denom).sqrt()
}

/// Build a badly conditioned diagonal matrix of size `n` with condition number `kappa`.
/// Returns the matrix and a right-hand side vector of all ones.
fn ill_cond(n: usize, kappa: f64) -> (Mat<f64>, DVector<f64>) {
    let mut diag = vec![1.0; n];
    diag[n - 1] = kappa;
    let mut a = Mat::zeros(n, n);
    for i in 0..n {
        a[(i, i)] = diag[i];
    }
    let b = DVector::from_vec(vec![1.0; n]);
    (a, b)
}

/// Test: Jacobi set up on an ill-conditioned diagonal matrix is its exact inverse, so CG
/// converges in a single iteration.
#[test]
fn cg_with_jacobi_on_diagonal() {
    let (a, b) = ill_cond(5, 1e6);
    let mut pc = Jacobi::new();
    <Jacobi<f64> as Preconditioner<Mat<f64>, DVector<f64>>>::setup(&mut pc, &a).unwrap();
    let mut r_out = DVector::zeros(b.len());
    <Jacobi<f64> as Preconditioner<Mat<f64>, DVector<f64>>>::apply(&pc, &b, &mut r_out).unwrap();
    assert_abs_diff_eq!(r_out[4], 1e-6, epsilon = 1e-18);

    let mut x = DVector::zeros(5);
    let conv = Convergence { tol: 1e-10, max_iters: 1000 };
    let stats = conjugate_gradient(&a, &b, &mut x, &pc, &conv).unwrap();
    assert!(stats.converged());
    assert_eq!(stats.iterations, 1);
    assert_abs_diff_eq!(x[4], 1e-6, epsilon = 1e-15);
}

/// Test: without preconditioning the same system takes more iterations, but still converges
/// quickly since the operator has only two distinct eigenvalues.
#[test]
fn cg_without_preconditioning_on_diagonal() {
    let (a, b) = ill_cond(5, 1e6);
    let mut x = DVector::zeros(5);
    let conv = Convergence { tol: 1e-10, max_iters: 1000 };
    let stats = conjugate_gradient(&a, &b, &mut x, &IdentityPreconditioner, &conv).unwrap();
    assert!(stats.converged());
    assert!(stats.iterations >= 2 && stats.iterations <= 10);
    assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-8);
}

/// Test: Jacobi-preconditioned CG front end on a symmetric positive definite matrix.
/// Checks that the solver converges to the correct solution within `n` iterations.
#[test]
fn spd_jacobi_cg_converges() {
    let n = 10;
    let (a, b, x_true) = spd_matrix(n);
    let mut cg: ConjugateGradient<_, f64> = ConjugateGradient::new();
    cg.compute(&a).unwrap().set_tolerance(1e-12);
    let x = cg.solve(&b).unwrap();
    assert_eq!(cg.info(), ComputationInfo::Success);
    assert!(rel_error(x.as_slice(), &x_true) < 1e-10);
    assert!(cg.iterations() <= n);
}

/// Test: unpreconditioned CG front end on a symmetric positive definite matrix.
#[test]
fn spd_no_pc_cg_converges() {
    let n = 10;
    let (a, b, x_true) = spd_matrix(n);
    let mut cg = ConjugateGradient::<_, f64, _>::with_preconditioner(IdentityPreconditioner);
    cg.compute(&a).unwrap();
    cg.set_max_iterations(n).set_tolerance(1e-12);
    let x = cg.solve(&b).unwrap();
    assert_eq!(cg.info(), ComputationInfo::Success);
    assert!(rel_error(x.as_slice(), &x_true) < 1e-10);
}

/// Test: the same solver can be reused with another right-hand side without recomputing.
#[test]
fn resolve_with_new_rhs() {
    let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
    let mut cg: ConjugateGradient<_, f64> = ConjugateGradient::new();
    cg.compute(&a).unwrap().set_tolerance(1e-12);
    for rhs in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 2.0, 3.0]] {
        let b = DVector::from_slice(&rhs);
        let x = cg.solve(&b).unwrap();
        assert!(cg.last_stats().is_some_and(|s| s.converged()));
        let mut ax = DVector::zeros(3);
        lineval::MatVec::matvec(&a, &x, &mut ax);
        for i in 0..3 {
            assert_abs_diff_eq!(ax[i], rhs[i], epsilon = 1e-9);
        }
    }
}
