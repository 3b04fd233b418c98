use crate::error::{Result, SolveError};
use num_traits::{One, Zero};
use std::ops::{Add, Mul};

/// Dense matrix with element values stored contiguously in row-major
/// order (C-style).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mat<T> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

impl<T> Mat<T>
where
    T: Copy,
{
    /// Returns a `rows x cols` matrix of zeros.
    pub fn new(rows: usize, cols: usize) -> Self
    where
        T: Zero,
    {
        Self {
            rows,
            cols,
            values: vec![T::zero(); rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self
    where
        T: Zero + One,
    {
        let mut mat = Self::new(n, n);
        for i in 0..n {
            mat.set(i, i, T::one());
        }
        mat
    }

    /// Builds a matrix from nested rows. Every row must have the same
    /// length as the first.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(SolveError::shape(
                    format!("{} columns", cols),
                    format!("{} columns in row {}", row.len(), i),
                ));
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    /// Appends `b` as an extra column, giving the augmented matrix `[A | b]`.
    pub fn augment(&self, b: &[T]) -> Result<Self> {
        if b.len() != self.rows {
            return Err(SolveError::shape(
                format!("right-hand side of length {}", self.rows),
                format!("length {}", b.len()),
            ));
        }
        let cols = self.cols + 1;
        let mut values = Vec::with_capacity(self.rows * cols);
        for (i, &bi) in b.iter().enumerate() {
            values.extend_from_slice(self.row(i));
            values.push(bi);
        }
        Ok(Self {
            rows: self.rows,
            cols,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    fn ix(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows);
        debug_assert!(col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.values[self.ix(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.ix(row, col);
        self.values[i] = v
    }

    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows);
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.rows);
        &mut self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (top, bottom) = self.values.split_at_mut(hi * self.cols);
        top[lo * self.cols..(lo + 1) * self.cols].swap_with_slice(&mut bottom[..self.cols]);
    }

    /// Returns the source row `src` and the destination row `dst` at the
    /// same time. Requires `src < dst`.
    pub(crate) fn row_pair_mut(&mut self, src: usize, dst: usize) -> (&[T], &mut [T]) {
        assert!(src < dst && dst < self.rows);
        let cols = self.cols;
        let (top, bottom) = self.values.split_at_mut(dst * cols);
        (&top[src * cols..(src + 1) * cols], &mut bottom[..cols])
    }

    /// Computes `A * b`.
    pub fn mat_vec(&self, b: &[T]) -> Vec<T>
    where
        T: Mul<Output = T> + Add<Output = T> + Zero,
    {
        assert_eq!(b.len(), self.cols);
        (0..self.rows).map(|i| dot(self.row(i), b)).collect()
    }

    /// Splits an augmented matrix `[A | b]` back into `A` and `b`.
    pub fn split_last_col(&self) -> (Self, Vec<T>)
    where
        T: Zero,
    {
        assert!(self.cols > 0);
        let mut a = Self::new(self.rows, self.cols - 1);
        let mut b = Vec::with_capacity(self.rows);
        for i in 0..self.rows {
            let row = self.row(i);
            a.row_mut(i).copy_from_slice(&row[..self.cols - 1]);
            b.push(row[self.cols - 1]);
        }
        (a, b)
    }
}

/// Computes the dot-product of `a` and `b`.
pub fn dot<T>(a: &[T], b: &[T]) -> T
where
    T: Mul<Output = T> + Add<Output = T> + Zero + Copy,
{
    a.iter()
        .zip(b)
        .map(|(&ai, &bi)| ai * bi)
        .fold(T::zero(), |x, y| x + y)
}
