use derive_builder::Builder;
use std::time::Duration;

/// Default pivot magnitude at or below which a matrix is declared singular.
pub const PIVOT_TOL: f64 = 1e-12;

/// Gaussian elimination options.
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct GaussOpt {
    // Pivots with magnitude at or below this value are treated as zero.
    pub pivot_tol: f64,
}

impl Default for GaussOpt {
    fn default() -> Self {
        Self {
            pivot_tol: PIVOT_TOL,
        }
    }
}

impl GaussOptBuilder {
    fn validate(&self) -> Result<(), String> {
        validate_pivot_tol(self.pivot_tol)
    }
}

/// Newton's method options.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct NewtonOpt {
    // Termination tolerance on the L1 norm of the Newton step. Default value is 1e-6.
    pub tolerance: f64,

    // Maximum number of Newton iterations. Default value is 100.
    pub max_it: usize,

    // Forward-difference step used to estimate the Jacobian. Default value is 0.01.
    pub step: f64,

    // Wall-clock budget for the whole solve.
    #[builder(setter(strip_option))]
    pub time_limit: Option<Duration>,

    pub pivot_tol: f64,
}

impl Default for NewtonOpt {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_it: 100,
            step: 0.01,
            time_limit: None,
            pivot_tol: PIVOT_TOL,
        }
    }
}

impl NewtonOpt {
    pub fn gauss(&self) -> GaussOpt {
        GaussOpt {
            pivot_tol: self.pivot_tol,
        }
    }
}

impl NewtonOptBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(tol) = self.tolerance {
            if !(tol > 0.0) {
                return Err(format!("tolerance ({}) must be positive", tol));
            }
        }
        if let Some(max_it) = self.max_it {
            if max_it == 0 {
                return Err("max_it must be at least 1".to_string());
            }
        }
        if let Some(step) = self.step {
            if step == 0.0 || !step.is_finite() {
                return Err(format!("step ({}) must be finite and non-zero", step));
            }
        }
        validate_pivot_tol(self.pivot_tol)
    }
}

fn validate_pivot_tol(pivot_tol: Option<f64>) -> Result<(), String> {
    match pivot_tol {
        Some(tol) if !(tol >= 0.0) => Err(format!("pivot_tol ({}) must be non-negative", tol)),
        _ => Ok(()),
    }
}
