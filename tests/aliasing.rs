//! Aliasing safety and matrix-product identities.
//!
//! A destination can only be read by its own source through `Shared` handles. These tests
//! check that `assign` materializes product sources in that situation, that `lazy_assign`
//! really skips the temporary, and that products satisfy the usual algebraic identities.

use approx::assert_relative_eq;
use lineval::{
    DMatrix, Expr, ExprExt, ExprMut, Matrix2, SMatrix, Shared, add_assign, assign, lazy_assign,
};
use rand::Rng;

fn random_dmatrix(rows: usize, cols: usize, rng: &mut impl Rng) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

fn assert_matrices_close(a: &DMatrix<f64>, b: &DMatrix<f64>) {
    assert_eq!((a.rows(), a.cols()), (b.rows(), b.cols()));
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12, max_relative = 1e-10);
    }
}

#[test]
fn self_product_through_shared_handles() {
    let x = Shared::new(Matrix2::from_row_slice(&[1.0, 2.0, 3.0, 4.0]));
    let mut dst = x.clone();
    dst.assign(&(&x * &x));
    assert_eq!(x.to_matrix(), Matrix2::from_row_slice(&[7.0, 10.0, 15.0, 22.0]));
}

#[test]
fn self_product_matches_product_of_a_copy() {
    let mut rng = rand::thread_rng();
    let m = random_dmatrix(6, 6, &mut rng);
    let y = m.clone();
    let expected = (&y * &y).eval();

    let x = Shared::new(m);
    let mut dst = x.clone();
    assign(&mut dst, &(&x * &x));
    assert_matrices_close(&x.to_matrix(), &expected);
}

#[test]
fn lazy_self_product_reads_overwritten_values() {
    let x = Shared::new(Matrix2::from_row_slice(&[1, 2, 3, 4]));
    let mut dst = x.clone();
    lazy_assign(&mut dst, &(&x * &x).lazy());
    let corrupted = x.to_matrix();
    assert_eq!(corrupted[(0, 0)], 7);
    // (1, 0) is computed after (0, 0) was overwritten: 3 * 7 + 4 * 3
    assert_eq!(corrupted[(1, 0)], 33);
    assert_ne!(corrupted, Matrix2::from_row_slice(&[7, 10, 15, 22]));
}

#[test]
fn lazy_product_into_a_distinct_destination() {
    let a = SMatrix::<i64, 2, 3>::from_row_slice(&[1, 2, 3, 4, 5, 6]);
    let b = SMatrix::<i64, 3, 2>::from_row_slice(&[1, 0, 0, 1, 1, 1]);
    let mut c = Matrix2::zeros();
    c.lazy_assign(&(&a * &b).lazy());
    assert_eq!(c, Matrix2::from_row_slice(&[4, 5, 10, 11]));
}

#[test]
fn accumulate_self_product() {
    // m += m * m
    let x = Shared::new(DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 0.0, 1.0]));
    let mut dst = x.clone();
    add_assign(&mut dst, &(&x * &x));
    assert_eq!(x.to_matrix().as_slice(), &[2.0, 0.0, 3.0, 2.0]);
}

#[test]
fn product_identities() {
    let mut rng = rand::thread_rng();
    let (rows, inner, cols) = (4, 5, 3);
    let m1 = random_dmatrix(rows, inner, &mut rng);
    let m2 = random_dmatrix(rows, inner, &mut rng);
    let m3 = random_dmatrix(inner, cols, &mut rng);
    let square = random_dmatrix(inner, inner, &mut rng);
    let identity = DMatrix::<f64>::identity(inner);

    // associativity
    let left = ((&m1 * &square) * &m3).eval();
    let right = (&m1 * (&square * &m3)).eval();
    assert_matrices_close(&left, &right);

    // distributivity
    let lhs = ((&m1 + &m2) * &m3).eval();
    let rhs = ((&m1 * &m3) + (&m2 * &m3)).eval();
    assert_matrices_close(&lhs, &rhs);

    // transpose of a product
    let t1 = (&m1 * &m3).transposed().eval();
    let t2 = ((&m3).transposed() * (&m1).transposed()).eval();
    assert_matrices_close(&t1, &t2);

    // identity
    assert_matrices_close(&(&m1 * &identity).eval(), &m1);
    assert_matrices_close(&(&identity * &m3).eval(), &m3);

    // scaling commutes with the product
    let s = 0.5;
    let scaled = ((&m1).scale(s) * &m3).eval();
    let after = (&m1 * &m3).scale(s).eval();
    assert_matrices_close(&scaled, &after);
}

#[test]
#[should_panic(expected = "invalid matrix product: 3x4 times 3x4")]
fn non_square_self_product_panics() {
    let m1 = DMatrix::<f64>::zeros(3, 4);
    let mut m3 = DMatrix::<f64>::zeros(3, 4);
    m3.assign(&(&m1 * &m1));
}
