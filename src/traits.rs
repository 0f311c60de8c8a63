//! Core traits for classifiers over sparse document vectors.
//!
//! These traits define the contract every model in the pipeline honors.

use crate::error::Result;
use crate::primitives::SparseVector;

/// Supervised binary/multiclass classifier over sparse feature rows.
///
/// Models are frozen after `fit`: a second call fails with
/// [`SpamError::AlreadyFitted`](crate::error::SpamError::AlreadyFitted).
///
/// # Examples
///
/// ```
/// use comment_spam::prelude::*;
///
/// let x = vec![
///     SparseVector::from_pairs(2, vec![(0, 1.0)]).unwrap(),
///     SparseVector::from_pairs(2, vec![(1, 1.0)]).unwrap(),
/// ];
/// let y = vec![1, 0];
///
/// let mut model = MultinomialNB::new();
/// model.fit(&x, &y).unwrap();
/// assert_eq!(model.predict(&x).unwrap(), vec![1, 0]);
/// assert!((model.score(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub trait Classifier {
    /// Fits the model to training rows and labels.
    ///
    /// # Errors
    ///
    /// Returns an error on empty or mismatched input, a single-class label
    /// set, or when the model was already fitted.
    fn fit(&mut self, x: &[SparseVector], y: &[usize]) -> Result<()>;

    /// Predicts one class label per row, in input order.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before `fit`, or `DimensionMismatch` when a row's
    /// dimension differs from the training dimension.
    fn predict(&self, x: &[SparseVector]) -> Result<Vec<usize>>;

    /// Whether `fit` has completed.
    fn is_fitted(&self) -> bool;

    /// Mean accuracy on the given rows.
    ///
    /// # Errors
    ///
    /// Propagates prediction errors; `DimensionMismatch` when `y` length
    /// differs from the number of rows.
    fn score(&self, x: &[SparseVector], y: &[usize]) -> Result<f64> {
        if x.len() != y.len() {
            return Err(crate::error::SpamError::dimension_mismatch(
                "labels",
                x.len(),
                y.len(),
            ));
        }
        if y.is_empty() {
            return Ok(0.0);
        }
        let predictions = self.predict(x)?;
        let correct = predictions
            .iter()
            .zip(y)
            .filter(|(pred, truth)| pred == truth)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }
}

/// Classifier that can report per-class probabilities.
pub trait ProbabilisticClassifier: Classifier {
    /// Per-row class probabilities, indexed by class label.
    ///
    /// # Errors
    ///
    /// Same as [`Classifier::predict`].
    fn predict_proba(&self, x: &[SparseVector]) -> Result<Vec<Vec<f64>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpamError;

    // Predicts the label of the first non-zero index, used to exercise the
    // default `score` implementation.
    struct FirstIndexClassifier {
        fitted: bool,
    }

    impl Classifier for FirstIndexClassifier {
        fn fit(&mut self, _x: &[SparseVector], _y: &[usize]) -> Result<()> {
            self.fitted = true;
            Ok(())
        }

        fn predict(&self, x: &[SparseVector]) -> Result<Vec<usize>> {
            if !self.fitted {
                return Err(SpamError::NotFitted {
                    component: "FirstIndexClassifier",
                });
            }
            Ok(x
                .iter()
                .map(|row| row.indices().first().copied().unwrap_or(0))
                .collect())
        }

        fn is_fitted(&self) -> bool {
            self.fitted
        }
    }

    fn rows() -> Vec<SparseVector> {
        vec![
            SparseVector::from_pairs(3, vec![(1, 1.0)]).unwrap(),
            SparseVector::from_pairs(3, vec![(0, 1.0)]).unwrap(),
            SparseVector::zeros(3),
            SparseVector::from_pairs(3, vec![(1, 0.5)]).unwrap(),
        ]
    }

    #[test]
    fn test_default_score_counts_matches() {
        let mut model = FirstIndexClassifier { fitted: false };
        model.fit(&rows(), &[1, 0, 0, 1]).unwrap();
        let score = model.score(&rows(), &[1, 0, 1, 1]).unwrap();
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_default_score_propagates_not_fitted() {
        let model = FirstIndexClassifier { fitted: false };
        let err = model.score(&rows(), &[1, 0, 0, 1]).unwrap_err();
        assert!(err.is_not_fitted());
    }

    #[test]
    fn test_default_score_length_mismatch() {
        let model = FirstIndexClassifier { fitted: true };
        let err = model.score(&rows(), &[1]).unwrap_err();
        assert!(matches!(err, SpamError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_default_score_empty_is_zero() {
        let model = FirstIndexClassifier { fitted: true };
        assert_eq!(model.score(&[], &[]).unwrap(), 0.0);
    }
}
