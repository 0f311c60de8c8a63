//! Evaluation metrics for spam classifiers.
//!
//! Spam (label 1) is the positive class: confusion counts, accuracy,
//! precision, recall and F1-score.

pub mod classification;

pub use classification::{evaluate, ConfusionMatrix, Evaluation, Metrics, POSITIVE_LABEL};
