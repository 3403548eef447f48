/// Dominant eigenvalue (spectral radius) of a non-negative square matrix by
/// power iteration with infinity-norm scaling. Used to calibrate the infection
/// rate against a target R0 on the contact layer.
pub fn spectral_radius(a: &[Vec<f64>], max_iter: usize, tol: f64) -> f64 {
    let n = a.len();
    assert!(n > 0 && a.iter().all(|row| row.len() == n), "matrix must be square");

    let mut x = vec![1.0; n];
    let mut lambda = 0.0;

    for _ in 0..max_iter {
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..n {
                sum += a[i][j] * x[j];
            }
            y[i] = sum;
        }

        let norm = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if norm == 0.0 {
            return 0.0;
        }
        for v in &mut y {
            *v /= norm;
        }

        if (norm - lambda).abs() < tol {
            return norm;
        }
        lambda = norm;
        x = y;
    }
    lambda
}
