use crate::debug::format_mat;
use crate::dense::Mat;
use crate::error::{Result, SolveError};
use crate::math::all_finite;
use crate::opt::GaussOpt;
use crate::traits::LinearSolver;

/// Gaussian elimination with partial pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussPivot {
    pub opt: GaussOpt,
}

impl GaussPivot {
    pub fn new(opt: GaussOpt) -> Self {
        Self { opt }
    }
}

impl LinearSolver for GaussPivot {
    fn solve(&self, aug: Mat<f64>) -> Result<Vec<f64>> {
        gauss_pivot(aug, self.opt.pivot_tol)
    }
}

/// Solves the `n x (n+1)` augmented system `[A | b]` with the default
/// pivot tolerance.
pub fn solve_linear(aug: Mat<f64>) -> Result<Vec<f64>> {
    GaussPivot::default().solve(aug)
}

/// Solves `Ax = b` by Gaussian elimination with partial pivoting followed
/// by back-substitution.
///
/// The augmented matrix `[A | b]` is reduced in place and dropped on return.
/// Any pivot with magnitude at or below `pivot_tol`, or a non-finite pivot,
/// aborts the solve with `SolveError::SingularMatrix`. A solution with
/// NaN or infinite components gives `SolveError::NonFinite`.
pub fn gauss_pivot(mut aug: Mat<f64>, pivot_tol: f64) -> Result<Vec<f64>> {
    let n = aug.rows();
    if n == 0 || aug.cols() != n + 1 {
        let expected = if n == 0 {
            "non-empty augmented matrix".to_string()
        } else {
            format!("{} x {}", n, n + 1)
        };
        return Err(SolveError::shape(expected, format!("{} x {}", n, aug.cols())));
    }
    log::trace!("[A | b]:\n{}", format_mat(&aug, true));

    for k in 0..n - 1 {
        let p = pivot_row(&aug, k);
        aug.swap_rows(k, p);

        let pivot = aug.get(k, k);
        check_pivot(pivot, k, pivot_tol)?;

        // zero column k below the pivot
        for i in k + 1..n {
            let (row_k, row_i) = aug.row_pair_mut(k, i);
            let scale = -row_i[k] / pivot;
            row_i[k..]
                .iter_mut()
                .zip(&row_k[k..])
                .for_each(|(a_ij, a_kj)| *a_ij += scale * a_kj);
        }
    }
    log::trace!("reduced [A | b]:\n{}", format_mat(&aug, true));

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let row = aug.row(i);
        check_pivot(row[i], i, pivot_tol)?;

        let sum: f64 = (i + 1..n).map(|j| row[j] * x[j]).sum();
        x[i] = (row[n] - sum) / row[i];
    }

    if !all_finite(&x) {
        log::debug!("non-finite solution {:?}", x);
        return Err(SolveError::NonFinite { iteration: 0 });
    }

    Ok(x)
}

/// Returns the row in `k..n` with the largest magnitude in column `k`.
/// A later row only replaces the candidate if it is strictly larger, so
/// the first maximal row wins.
pub(crate) fn pivot_row(aug: &Mat<f64>, k: usize) -> usize {
    let mut pivot_i = k;
    let mut highest = aug.get(k, k).abs();
    for i in k + 1..aug.rows() {
        let v = aug.get(i, k).abs();
        if v > highest {
            pivot_i = i;
            highest = v;
        }
    }
    pivot_i
}

fn check_pivot(pivot: f64, col: usize, pivot_tol: f64) -> Result<()> {
    if !pivot.is_finite() || !(pivot.abs() > pivot_tol) {
        log::debug!("pivot {:e} in column {} is singular", pivot, col);
        return Err(SolveError::SingularMatrix { col, pivot });
    }
    Ok(())
}
