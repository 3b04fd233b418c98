//! Shared test systems.

use crate::dense::Mat;

/// Diagonally dominant `n x (n+1)` augmented system with a known,
/// non-trivial right-hand side.
pub(crate) fn well_conditioned(n: usize) -> Mat<f64> {
    let mut aug = Mat::new(n, n + 1);
    for i in 0..n {
        for j in 0..n {
            let v = if i == j {
                2.0 * n as f64 + 1.0
            } else {
                ((i * 7 + j * 3) % 5) as f64 - 2.0
            };
            aug.set(i, j, v);
        }
        aug.set(i, n, (i as f64 + 1.0) * if i % 2 == 0 { 1.0 } else { -1.5 });
    }
    aug
}

/// Returns a copy of `aug` whose row `i` is row `order[i]` of the input.
pub(crate) fn permute_rows(aug: &Mat<f64>, order: &[usize]) -> Mat<f64> {
    let rows: Vec<&[f64]> = order.iter().map(|&i| aug.row(i)).collect();
    Mat::from_rows(&rows).expect("rows share the input's width")
}

/// `x0^2 - 1`, roots at `±1`.
pub(crate) fn unit(x: &[f64]) -> Vec<f64> {
    vec![x[0] * x[0] - 1.0]
}

/// Unit circle intersected with the line `x0 = x1`.
pub(crate) fn circle(x: &[f64]) -> Vec<f64> {
    vec![x[0] * x[0] + x[1] * x[1] - 1.0, x[0] - x[1]]
}

/// Three quadratics in three unknowns with a root near `(0.906, -0.091, 0.413)`.
pub(crate) fn sphere(x: &[f64]) -> Vec<f64> {
    vec![
        x[0] * x[0] + x[1] * x[1] + x[2] * x[2] - 1.0,
        2.0 * x[0] * x[0] + x[1] * x[1] - 4.0 * x[2],
        3.0 * x[0] * x[0] - 4.0 * x[1] + x[2] * x[2] - 3.0,
    ]
}
