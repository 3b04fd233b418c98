use crate::debug::{format_f64_vec, format_mat};
use crate::error::{Result, SolveError};
use crate::gauss::GaussPivot;
use crate::jac::fd_jac_at;
use crate::math::{all_finite, norm_1, norm_inf};
use crate::opt::NewtonOpt;
use crate::traits::{LinearSolver, VectorFunction};
use std::time::Instant;

pub trait ProgressMonitor {
    fn update(&self, i: usize, x: &[f64], step_norm: f64);
}

pub struct PrintProgress {}

impl ProgressMonitor for PrintProgress {
    fn update(&self, i: usize, x: &[f64], step_norm: f64) {
        if i == 1 {
            println!(" it    |dx|_1          x");
            println!("----  -------------  ---------------------------");
        }
        println!("{:>4}  {:>13.6e}  {}", i, step_norm, format_f64_vec(x));
    }
}

/// Solves `F(x) = 0` with default options and Gaussian elimination,
/// returning the root.
pub fn solve_nonlinear(f: &dyn VectorFunction, x0: &[f64], step: f64) -> Result<Vec<f64>> {
    let opt = NewtonOpt {
        step,
        ..NewtonOpt::default()
    };
    let lin_solver = GaussPivot::new(opt.gauss());
    let (x, _) = newton(f, x0, &lin_solver, &opt, None)?;
    Ok(x)
}

/// Solves `F(x) = 0` using Newton's method with a forward-difference
/// Jacobian.
///
/// Each iteration solves `J d = -F(x)` and updates `x += d`. Iteration
/// stops once `sum(|d|)` falls below `opt.tolerance`; at least one step is
/// always taken. Returns the root and the number of iterations.
pub fn newton(
    f: &dyn VectorFunction,
    x0: &[f64],
    lin_solver: &dyn LinearSolver,
    opt: &NewtonOpt,
    progress: Option<&dyn ProgressMonitor>,
) -> Result<(Vec<f64>, usize)> {
    let n = x0.len();
    if n == 0 {
        return Err(SolveError::shape("non-empty initial guess", "0 unknowns"));
    }

    let t0 = Instant::now();
    let mut x = x0.to_vec();
    let mut i = 0;

    // forces the first iteration
    let mut step_norm = f64::INFINITY;

    while !(step_norm < opt.tolerance) {
        if i >= opt.max_it {
            log::debug!(
                "Newton's method did not converge in {} iterations (|dx|_1 = {:e}).",
                i,
                step_norm
            );
            return Err(SolveError::DidNotConverge {
                iterations: i,
                step_norm,
            });
        }
        if let Some(limit) = opt.time_limit {
            let elapsed = t0.elapsed();
            if elapsed >= limit {
                return Err(SolveError::TimeLimit {
                    iterations: i,
                    elapsed,
                });
            }
        }

        // update iteration counter
        i += 1;

        // evaluate F(x)
        let f_x = f.eval(&x);
        if f_x.len() != n {
            return Err(SolveError::shape(
                format!("{} function values", n),
                f_x.len(),
            ));
        }
        if !all_finite(&f_x) {
            return Err(SolveError::NonFinite { iteration: i });
        }

        // evaluate Jacobian
        let jac = fd_jac_at(f, &x, &f_x, opt.step).map_err(|err| err.at_iteration(i))?;

        // build [J | -F(x)]
        let neg_f: Vec<f64> = f_x.iter().map(|f_i| -f_i).collect();
        let aug = jac.augment(&neg_f)?;
        log::trace!("[J | -F]:\n{}", format_mat(&aug, true));

        // compute update step
        let dx = lin_solver.solve(aug).map_err(|err| err.at_iteration(i))?;

        x.iter_mut().zip(&dx).for_each(|(x_i, dx_i)| *x_i += dx_i);
        if !all_finite(&x) {
            return Err(SolveError::NonFinite { iteration: i });
        }

        step_norm = norm_1(&dx);
        log::debug!(
            "it {}: |dx|_1 = {:e}, |F|_inf = {:e}, x = {}",
            i,
            step_norm,
            norm_inf(&f_x),
            format_f64_vec(&x)
        );
        if let Some(pm) = progress {
            pm.update(i, &x, step_norm);
        }
    }

    log::debug!("Newton's method converged in {} iterations.", i);

    Ok((x, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opt::NewtonOptBuilder;
    use crate::tests::{circle, sphere, unit};
    use anyhow::{format_err, Result};
    use std::cell::RefCell;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordProgress {
        steps: RefCell<Vec<(usize, f64)>>,
    }

    impl ProgressMonitor for RecordProgress {
        fn update(&self, i: usize, _x: &[f64], step_norm: f64) {
            self.steps.borrow_mut().push((i, step_norm));
        }
    }

    #[test]
    fn test_unit() -> Result<()> {
        let x = solve_nonlinear(&unit, &[0.5], 0.01)?;
        if (x[0] - 1.0).abs() > 1e-6 {
            return Err(format_err!("expected 1, got {}", x[0]));
        }
        Ok(())
    }

    #[test]
    fn test_unit_negative_basin() -> Result<()> {
        let x = solve_nonlinear(&unit, &[-3.0], 0.01)?;
        if (x[0] + 1.0).abs() > 1e-6 {
            return Err(format_err!("expected -1, got {}", x[0]));
        }
        Ok(())
    }

    #[test]
    fn test_circle() -> Result<()> {
        let x = solve_nonlinear(&circle, &[0.5, 0.5], 0.01)?;
        let r = std::f64::consts::FRAC_1_SQRT_2;
        if x.iter().any(|x_i| (x_i - r).abs() > 1e-6) {
            return Err(format_err!("expected [{}, {}], got {:?}", r, r, x));
        }
        Ok(())
    }

    #[test]
    fn test_sphere() -> Result<()> {
        let opt = NewtonOptBuilder::default().step(0.001).build()?;
        let (x, its) = newton(&sphere, &[0.5, 0.5, 0.5], &GaussPivot::default(), &opt, None)?;
        let r = norm_inf(&sphere(&x));
        if r > 1e-6 {
            return Err(format_err!("residual {} too large at {:?}", r, x));
        }
        assert!(its <= 10);
        assert!((x[0] - 0.906249).abs() < 1e-5);
        assert!((x[1] + 0.091447).abs() < 1e-5);
        assert!((x[2] - 0.412734).abs() < 1e-5);
        Ok(())
    }

    #[test]
    fn test_initial_guess_not_aliased() -> Result<()> {
        let x0 = vec![0.5, 0.5];
        let x = solve_nonlinear(&circle, &x0, 0.01)?;
        assert_eq!(x0, vec![0.5, 0.5]);
        assert_ne!(x, x0);
        Ok(())
    }

    #[test]
    fn test_root_takes_one_step() -> Result<()> {
        let (x, its) = newton(&unit, &[1.0], &GaussPivot::default(), &NewtonOpt::default(), None)?;
        assert_eq!(its, 1);
        assert_eq!(x, vec![1.0]);
        Ok(())
    }

    #[test]
    fn test_progress() -> Result<()> {
        let pm = RecordProgress::default();
        let (_, its) = newton(
            &circle,
            &[0.5, 0.5],
            &GaussPivot::default(),
            &NewtonOpt::default(),
            Some(&pm),
        )?;
        let steps = pm.steps.borrow();
        assert_eq!(steps.len(), its);
        assert_eq!(steps[0].0, 1);
        assert!(steps.last().map_or(false, |&(_, s)| s < 1e-6));
        Ok(())
    }

    #[test]
    fn test_did_not_converge() -> Result<()> {
        // no real root
        let f = |x: &[f64]| vec![x[0] * x[0] + 1.0];
        let opt = NewtonOptBuilder::default().max_it(20).build()?;
        match newton(&f, &[0.5], &GaussPivot::default(), &opt, None) {
            Err(SolveError::DidNotConverge { iterations, .. }) => assert_eq!(iterations, 20),
            other => return Err(format_err!("expected non-convergence, got {:?}", other)),
        }
        Ok(())
    }

    #[test]
    fn test_singular_jacobian() {
        // second equation does not depend on x
        let f = |x: &[f64]| vec![x[0] + x[1] - 1.0, 3.0];
        let err = solve_nonlinear(&f, &[0.0, 0.0], 0.01).unwrap_err();
        assert!(err.is_singular());
    }

    #[test]
    fn test_output_length_mismatch() {
        let f = |x: &[f64]| vec![x[0], x[1], 0.0];
        let err = solve_nonlinear(&f, &[1.0, 1.0], 0.01).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_empty_guess() {
        let err = solve_nonlinear(&unit, &[], 0.01).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_non_finite_function() {
        let f = |x: &[f64]| vec![x[0].ln()];
        match solve_nonlinear(&f, &[-1.0], 0.01) {
            Err(SolveError::NonFinite { iteration }) => assert_eq!(iteration, 1),
            other => panic!("expected non-finite error, got {:?}", other),
        }
    }

    #[test]
    fn test_pole_in_jacobian() -> Result<()> {
        // F is finite at x but infinite at x + h
        let f = |x: &[f64]| vec![1.0 / (x[0] - 0.5)];
        let opt = NewtonOptBuilder::default().step(0.25).build()?;
        match newton(&f, &[0.25], &GaussPivot::default(), &opt, None) {
            Err(SolveError::NonFinite { iteration }) => assert_eq!(iteration, 1),
            other => return Err(format_err!("expected non-finite error, got {:?}", other)),
        }
        Ok(())
    }

    #[test]
    fn test_nan_in_jacobian() -> Result<()> {
        let f = |x: &[f64]| vec![(0.5 - x[0]).sqrt()];
        let opt = NewtonOptBuilder::default().step(0.5).build()?;
        match newton(&f, &[0.25], &GaussPivot::default(), &opt, None) {
            Err(SolveError::NonFinite { iteration }) => assert_eq!(iteration, 1),
            other => return Err(format_err!("expected non-finite error, got {:?}", other)),
        }
        Ok(())
    }

    #[test]
    fn test_time_limit() -> Result<()> {
        let opt = NewtonOptBuilder::default()
            .time_limit(Duration::ZERO)
            .build()?;
        let err = newton(&circle, &[0.5, 0.5], &GaussPivot::default(), &opt, None).unwrap_err();
        assert!(matches!(err, SolveError::TimeLimit { iterations: 0, .. }));
        Ok(())
    }

    #[test]
    fn test_invalid_step() {
        let err = solve_nonlinear(&unit, &[0.5], 0.0).unwrap_err();
        assert_eq!(err, SolveError::InvalidStep { h: 0.0 });
    }
}
