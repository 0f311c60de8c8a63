//! Sparse feature vector with a fixed dimension.

use crate::error::{Result, SpamError};
use serde::{Deserialize, Serialize};

/// Sparse vector: sorted, unique indices paired with non-zero values.
///
/// The dimension is fixed at construction (for TF-IDF rows it equals the
/// vocabulary size). Absent indices read as `0.0`.
///
/// # Examples
///
/// ```
/// use comment_spam::primitives::SparseVector;
///
/// let v = SparseVector::from_pairs(5, vec![(3, 4.0), (0, 3.0)]).unwrap();
/// assert_eq!(v.indices(), &[0, 3]);
/// assert_eq!(v.get(3), 4.0);
/// assert_eq!(v.get(1), 0.0);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// All-zero vector of the given dimension.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a vector from `(index, value)` pairs in any order.
    ///
    /// Duplicate indices are summed and explicit zeros are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if an index is `>= dim`.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Result<Self> {
        if let Some(&(bad, _)) = pairs.iter().find(|(idx, _)| *idx >= dim) {
            return Err(SpamError::DimensionMismatch {
                expected: format!("index < {dim}"),
                actual: bad.to_string(),
            });
        }
        pairs.sort_by_key(|&(idx, _)| idx);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(idx);
                values.push(value);
            }
        }

        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        Ok(Self {
            dim,
            indices,
            values,
        })
    }

    /// Builds a sparse vector from a dense slice, keeping non-zero entries.
    #[must_use]
    pub fn from_dense(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self {
            dim: dense.len(),
            indices,
            values,
        }
    }

    /// Fixed dimension of the vector.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }


    /// Sorted indices of the non-zero entries.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Values aligned with [`indices`](Self::indices).
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `index`, `0.0` when absent or out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map_or(0.0, |pos| self.values[pos])
    }


    /// Euclidean (L2) norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Returns a copy scaled to unit L2 norm; the zero vector stays zero.
    #[must_use]
    pub fn l2_normalized(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self {
            dim: self.dim,
            indices: self.indices.clone(),
            values: self.values.iter().map(|v| v / norm).collect(),
        }
    }


}

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod tests;
