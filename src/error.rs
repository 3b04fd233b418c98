use std::time::Duration;
use thiserror::Error;

/// Errors returned by the linear and nonlinear solvers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    /// Matrix or vector dimensions do not form a valid system.
    #[error("invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },

    /// Pivot magnitude fell to or below the stability threshold.
    #[error("singular matrix: pivot {pivot:e} in column {col}")]
    SingularMatrix { col: usize, pivot: f64 },

    /// Iteration cap reached before the step norm dropped below tolerance.
    #[error("did not converge in {iterations} iterations (step norm {step_norm:e})")]
    DidNotConverge { iterations: usize, step_norm: f64 },

    /// Finite-difference step must be finite and non-zero.
    #[error("invalid finite-difference step: {h}")]
    InvalidStep { h: f64 },

    /// Function values, the solution or the iterate became NaN or infinite.
    /// `iteration` is 0 when raised outside Newton's method.
    #[error("non-finite value at iteration {iteration}")]
    NonFinite { iteration: usize },

    #[error("time limit exceeded after {iterations} iterations ({elapsed:?})")]
    TimeLimit { iterations: usize, elapsed: Duration },
}

pub type Result<T> = std::result::Result<T, SolveError>;

impl SolveError {
    pub(crate) fn shape(expected: impl ToString, got: impl ToString) -> Self {
        SolveError::InvalidShape {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Attributes a `NonFinite` error to Newton iteration `i`.
    pub(crate) fn at_iteration(self, i: usize) -> Self {
        match self {
            SolveError::NonFinite { .. } => SolveError::NonFinite { iteration: i },
            err => err,
        }
    }

    pub fn is_singular(&self) -> bool {
        matches!(self, SolveError::SingularMatrix { .. })
    }

    pub fn is_shape_error(&self) -> bool {
        matches!(self, SolveError::InvalidShape { .. })
    }

    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            SolveError::DidNotConverge { .. } | SolveError::TimeLimit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SolveError::shape("2x3", "2x2");
        assert_eq!(err.to_string(), "invalid shape: expected 2x3, got 2x2");

        let err = SolveError::DidNotConverge {
            iterations: 100,
            step_norm: 0.5,
        };
        assert!(err.to_string().contains("100 iterations"));
    }

    #[test]
    fn test_error_kinds() {
        let singular = SolveError::SingularMatrix { col: 1, pivot: 0.0 };
        let limit = SolveError::TimeLimit {
            iterations: 3,
            elapsed: Duration::from_millis(5),
        };

        assert!(singular.is_singular());
        assert!(!singular.is_convergence_failure());
        assert!(limit.is_convergence_failure());
        assert!(!limit.is_shape_error());
    }

    #[test]
    fn test_at_iteration() {
        let err = SolveError::NonFinite { iteration: 0 }.at_iteration(4);
        assert_eq!(err, SolveError::NonFinite { iteration: 4 });

        let err = SolveError::InvalidStep { h: 0.0 }.at_iteration(4);
        assert_eq!(err, SolveError::InvalidStep { h: 0.0 });
    }
}
