//! Dense matrix used for column scans during tree growth.

use super::SparseVector;
use crate::error::{Result, SpamError};

/// A 2D matrix of `f64` values (row-major storage).
///
/// # Examples
///
/// ```
/// use comment_spam::primitives::{Matrix, SparseVector};
///
/// let rows = vec![
///     SparseVector::from_dense(&[1.0, 0.0, 3.0]),
///     SparseVector::from_dense(&[0.0, 5.0, 6.0]),
/// ];
/// let m = Matrix::from_sparse_rows(&rows).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Densifies sparse rows that all share one dimension.
    ///
    /// # Errors
    ///
    /// Returns `NoData` for an empty batch and `DimensionMismatch` when
    /// the rows disagree on dimension.
    pub fn from_sparse_rows(rows: &[SparseVector]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| SpamError::empty_input("feature rows"))?;
        let cols = first.dim();
        let mut matrix = Self::zeros(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            if row.dim() != cols {
                return Err(SpamError::dimension_mismatch("features", cols, row.dim()));
            }
            for (c, value) in row.iter() {
                matrix.set(r, c, value);
            }
        }
        Ok(matrix)
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }


    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }



}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
