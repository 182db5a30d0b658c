//! Tests for the dense containers: matrix-vector multiplication, dot product, norm, and
//! third-party storage (`faer::Mat`, `Vec<T>`) taking part in expressions.
//!
//! These tests verify the MatVec and InnerProduct implementations and the expression
//! contract for dense matrices and vectors, using random and fixed data.

use approx::assert_abs_diff_eq;
use faer::Mat;
use lineval::core::traits::{Expr, ExprMut, InnerProduct, MatVec};
use lineval::{DMatrix, DVector, ExprExt, Matrix3, assign};
use rand::Rng;

/// Test matrix-vector multiplication for a small random `faer` matrix.
///
/// This test constructs a random 5x5 matrix and a random vector, computes the matrix-vector
/// product using the MatVec trait, and checks the result against a manual computation.
#[test]
fn matvec_random_small() {
    let n = 5;
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    // Use from_fn to build a column-major matrix
    let a = Mat::from_fn(n, n, |i, j| vals[j * n + i]);
    let x = DVector::<f64>::from_vec((0..n).map(|_| rng.r#gen()).collect());
    let mut y = DVector::zeros(n);
    a.matvec(&x, &mut y);

    // check y[i] == sum_j A[i,j]*x[j]
    for i in 0..n {
        let expected = (0..n).map(|j| vals[j * n + i] * x[j]).sum::<f64>();
        assert_abs_diff_eq!(y[i], expected, epsilon = 1e-12);
    }
}

/// The owned container and the `faer` matrix agree on the same product.
#[test]
fn matvec_dense_matches_faer() {
    let n = 7;
    let mut rng = rand::thread_rng();
    let a = DMatrix::<f64>::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
    let f = Mat::from_fn(n, n, |i, j| a[(i, j)]);
    let x = DVector::from_vec((0..n).map(|i| i as f64 - 3.0).collect());
    let (mut y1, mut y2) = (DVector::zeros(n), DVector::zeros(n));
    a.matvec(&x, &mut y1);
    f.matvec(&x, &mut y2);
    for i in 0..n {
        assert_abs_diff_eq!(y1[i], y2[i], epsilon = 1e-12);
    }
}

/// Test dot product and Euclidean norm for small vectors.
///
/// This test verifies that the InnerProduct trait correctly computes the dot product and
/// the Euclidean norm (L2 norm) for two small vectors, comparing against manual calculations.
#[test]
fn dot_and_norm() {
    let x = vec![1.0, 2.0, 3.0];
    let y = vec![4.0, -5.0, 6.0];
    let ip = ();
    let dot = ip.dot(&x, &y);
    assert_abs_diff_eq!(dot, 1.0 * 4.0 + 2.0 * (-5.0) + 3.0 * 6.0, epsilon = 1e-12);
    let norm_x = ip.norm(&x);
    let expected_norm = ((1.0f64).powi(2) + 2.0f64.powi(2) + 3.0f64.powi(2)).sqrt();
    assert_abs_diff_eq!(norm_x, expected_norm, epsilon = 1e-12);

    let dx = DVector::from_vec(x.clone());
    let dy = DVector::from_vec(y.clone());
    assert_abs_diff_eq!(ip.dot(&dx, &dy), dot, epsilon = 1e-12);
    assert_abs_diff_eq!(dx.dot(&y), dot, epsilon = 1e-12);
}

/// A large dot product, long enough to take the parallel reduction when `rayon` is enabled.
#[test]
fn dot_long_vectors() {
    let n = 10_000;
    let x = DVector::from_vec((0..n).map(|i| (i % 7) as f64).collect());
    let y = DVector::from_vec(vec![0.5; n]);
    let serial: f64 = x.as_slice().iter().map(|v| v * 0.5).sum();
    assert_abs_diff_eq!(().dot(&x, &y), serial, epsilon = 1e-9);
}

/// `faer::Mat` and `Vec<T>` can be written through the assignment engine.
#[test]
fn third_party_storage_as_destination() {
    let src = Matrix3::from_fn(|i, j| (i + 10 * j) as f64);
    let mut f = Mat::<f64>::zeros(3, 3);
    assign(&mut f, &(&src).transposed());
    assert_eq!(f[(2, 0)], 2.0 * 10.0);
    assert_eq!(Expr::coeff(&f, 0, 2), 2.0);

    let mut v = vec![0.0; 3];
    let col = DVector::from_vec(vec![1.0, 2.0, 3.0]);
    v.assign(&(&col).scale(2.0));
    assert_eq!(v, vec![2.0, 4.0, 6.0]);
}

/// With the builder methods in scope, `faer::Mat::transpose` still resolves to faer's own view
/// and leaves the matrix usable.
#[test]
fn faer_transpose_is_not_shadowed() {
    let m = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    let t: faer::MatRef<'_, f64> = m.transpose();
    assert_eq!((t.nrows(), t.ncols()), (3, 2));

    let gram = &t * &m;
    assert_eq!((gram.nrows(), gram.ncols()), (3, 3));
    assert_eq!(gram[(0, 0)], 9.0);
    assert_eq!(gram[(1, 2)], 22.0);

    let lazy = (&m).transposed();
    assert_eq!((lazy.rows(), lazy.cols()), (3, 2));
    assert_eq!(lazy.coeff(0, 1), m[(1, 0)]);
}
