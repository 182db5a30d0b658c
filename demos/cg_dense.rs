use faer::Mat;
use lineval::{
    ConjugateGradient, DVector, ExprExt, IdentityPreconditioner, Matrix2, Shared, assign,
};
use rand::Rng;

fn main() {
    let n = 10;
    // build a random SPD matrix: A = MᵀM + I
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let m = Mat::from_fn(n, n, |i, j| data[j * n + i]);
    let m_t = m.transpose();
    // a = m^T * m
    let mut a = &m_t * &m;
    // a = a + I
    for i in 0..n {
        a[(i, i)] = a[(i, i)] + 1.0;
    }

    // rhs
    let b = DVector::<f64>::from_vec((0..n).map(|_| rng.r#gen()).collect());

    // Jacobi-preconditioned CG
    let mut cg: ConjugateGradient<_, f64> = ConjugateGradient::new();
    cg.compute(&a).unwrap().set_tolerance(1e-12);
    let x = cg.solve(&b).unwrap();
    println!("jacobi:   x = {:?}", x.as_slice());
    println!("          {:?}, {} iterations, error {:e}", cg.info(), cg.iterations(), cg.error());

    // Unpreconditioned CG, restarted every iteration
    let mut plain = ConjugateGradient::<_, f64, _>::with_preconditioner(IdentityPreconditioner);
    plain.compute(&a).unwrap();
    plain.set_max_iterations(1);
    let mut y = DVector::zeros(n);
    for step in 0..5 {
        y = plain.solve_with_guess(&b, &y).unwrap();
        println!("restart {step}: error {:e}", plain.error());
    }

    // x = x * x through two handles onto the same storage
    let x = Shared::new(Matrix2::from_row_slice(&[1.0, 2.0, 3.0, 4.0]));
    let mut target = x.clone();
    assign(&mut target, &(&x * &x));
    print!("x * x =\n{}", *x.borrow());
    print!("(x * x)ᵀ =\n{}", (&x).transposed().eval());
}
