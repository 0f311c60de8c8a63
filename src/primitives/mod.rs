//! Core numeric primitives (sparse document vectors, dense feature matrix).
//!
//! Documents are stored sparsely; tree learners densify a training batch
//! into a [`Matrix`] for column scans.

mod matrix;
mod sparse;

pub use matrix::Matrix;
pub use sparse::SparseVector;
