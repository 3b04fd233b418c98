use crate::dense::Mat;

/// Computes the 1-norm: `sum(abs(a))`
pub fn norm_1(a: &[f64]) -> f64 {
    a.iter().map(|v| v.abs()).sum()
}

/// Computes the infinity norm: `max(abs(a))`
pub fn norm_inf(a: &[f64]) -> f64 {
    a.iter().fold(0.0, |max, v| f64::max(max, v.abs()))
}

/// Returns `A * x - b` for the system encoded by the augmented matrix `[A | b]`.
pub fn residual(aug: &Mat<f64>, x: &[f64]) -> Vec<f64> {
    let (a, b) = aug.split_last_col();
    a.mat_vec(x).iter().zip(b).map(|(ax, b)| ax - b).collect()
}

pub fn all_finite(a: &[f64]) -> bool {
    a.iter().all(|v| v.is_finite())
}
