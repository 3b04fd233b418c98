use crate::dense::Mat;
use crate::error::{Result, SolveError};
use crate::math::all_finite;
use crate::traits::VectorFunction;

/// Estimates the Jacobian of `f` at `x` by forward differences.
///
/// `J[i][j] = (F(x + h e_j)[i] - F(x)[i]) / h`. The result has one row per
/// output of `f` and one column per element of `x`. `f` is evaluated
/// `x.len() + 1` times. Any NaN or infinite evaluation gives
/// `SolveError::NonFinite`.
pub fn fd_jac(f: &dyn VectorFunction, x: &[f64], h: f64) -> Result<Mat<f64>> {
    let f_x = f.eval(x);
    if !all_finite(&f_x) {
        return Err(SolveError::NonFinite { iteration: 0 });
    }
    fd_jac_at(f, x, &f_x, h)
}

/// Forward-difference Jacobian reusing an already computed `f_x = F(x)`.
pub(crate) fn fd_jac_at(
    f: &dyn VectorFunction,
    x: &[f64],
    f_x: &[f64],
    h: f64,
) -> Result<Mat<f64>> {
    if h == 0.0 || !h.is_finite() {
        return Err(SolveError::InvalidStep { h });
    }
    let (rows, cols) = (f_x.len(), x.len());

    let mut jac = Mat::new(rows, cols);
    let mut xh = x.to_vec();
    for j in 0..cols {
        xh[j] = x[j] + h;
        let f_h = f.eval(&xh);
        xh[j] = x[j];

        if f_h.len() != rows {
            return Err(SolveError::shape(
                format!("{} function values", rows),
                format!("{} when perturbing x[{}]", f_h.len(), j),
            ));
        }
        if !all_finite(&f_h) {
            log::debug!("F is not finite when perturbing x[{}] by {:e}", j, h);
            return Err(SolveError::NonFinite { iteration: 0 });
        }
        for (i, (fh_i, fx_i)) in f_h.iter().zip(f_x).enumerate() {
            jac.set(i, j, (fh_i - fx_i) / h);
        }
    }

    Ok(jac)
}
