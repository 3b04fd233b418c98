use crate::dense::Mat;
use crate::error::Result;

/// Solves the dense system encoded by an augmented matrix `[A | b]`.
///
/// The solver takes ownership of the matrix and is free to overwrite it.
pub trait LinearSolver {
    fn solve(&self, aug: Mat<f64>) -> Result<Vec<f64>>;
}

/// A vector-valued function `F: R^n -> R^m`.
pub trait VectorFunction {
    fn eval(&self, x: &[f64]) -> Vec<f64>;
}

impl<F> VectorFunction for F
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn eval(&self, x: &[f64]) -> Vec<f64> {
        self(x)
    }
}
