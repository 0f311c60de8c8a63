//! Binary classification metrics for evaluating spam classifiers.
//!
//! Provides the confusion matrix for the positive (spam) class and the
//! accuracy, precision, recall and F1 derived from it.

use crate::error::{Result, SpamError};
use serde::Serialize;
use std::fmt;

/// Label treated as the positive class.
pub const POSITIVE_LABEL: usize = 1;

/// TP/FP/FN/TN counts for the positive class.
///
/// Any label other than [`POSITIVE_LABEL`] counts as negative.
///
/// # Examples
///
/// ```
/// use comment_spam::metrics::ConfusionMatrix;
///
/// let y_true = vec![1, 1, 0, 0, 1];
/// let y_pred = vec![1, 0, 0, 1, 1];
/// let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred).unwrap();
/// assert_eq!((cm.tp, cm.fp, cm.fn_, cm.tn), (2, 1, 1, 1));
/// assert_eq!(cm.as_rows(), [[1, 1], [1, 2]]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// Spam predicted as spam
    pub tp: usize,
    /// Ham predicted as spam
    pub fp: usize,
    /// Spam predicted as ham
    #[serde(rename = "fn")]
    pub fn_: usize,
    /// Ham predicted as ham
    pub tn: usize,
}

impl ConfusionMatrix {
    /// Counts outcomes for paired true/predicted labels.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the slices differ in length.
    pub fn from_predictions(y_true: &[usize], y_pred: &[usize]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(SpamError::dimension_mismatch(
                "predictions",
                y_true.len(),
                y_pred.len(),
            ));
        }

        let mut cm = Self::default();
        for (&truth, &pred) in y_true.iter().zip(y_pred) {
            match (truth == POSITIVE_LABEL, pred == POSITIVE_LABEL) {
                (true, true) => cm.tp += 1,
                (false, true) => cm.fp += 1,
                (true, false) => cm.fn_ += 1,
                (false, false) => cm.tn += 1,
            }
        }
        Ok(cm)
    }

    /// Total number of evaluated samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// `[[TN, FP], [FN, TP]]`: rows are actual ham/spam, columns predicted.
    #[must_use]
    pub fn as_rows(&self) -> [[usize; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }
}

impl fmt::Display for ConfusionMatrix {
    /// Renders `[[TN FP]\n [FN TP]]` with right-aligned columns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.as_rows();
        let width = rows
            .iter()
            .flatten()
            .map(|n| n.to_string().len())
            .max()
            .unwrap_or(1);
        write!(
            f,
            "[[{:>w$} {:>w$}]\n [{:>w$} {:>w$}]]",
            rows[0][0],
            rows[0][1],
            rows[1][0],
            rows[1][1],
            w = width
        )
    }
}

/// Summary scores derived from a [`ConfusionMatrix`].
///
/// Every ratio whose denominator is zero is reported as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// (TP + TN) / total
    pub accuracy: f64,
    /// TP / (TP + FP)
    pub precision: f64,
    /// TP / (TP + FN)
    pub recall: f64,
    /// 2PR / (P + R)
    pub f1: f64,
}

fn ratio(num: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        0.0
    } else {
        num / denom
    }
}

impl Metrics {
    /// Derives the scores from confusion counts.
    #[must_use]
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        let tp = cm.tp as f64;
        let accuracy = ratio((cm.tp + cm.tn) as f64, cm.total() as f64);
        let precision = ratio(tp, (cm.tp + cm.fp) as f64);
        let recall = ratio(tp, (cm.tp + cm.fn_) as f64);
        let f1 = ratio(2.0 * precision * recall, precision + recall);
        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Confusion counts plus derived metrics for one prediction batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// Raw outcome counts
    pub confusion: ConfusionMatrix,
    /// Derived scores
    pub metrics: Metrics,
}

/// Evaluates predictions against ground truth.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the slices differ in length.
///
/// # Examples
///
/// ```
/// use comment_spam::metrics::evaluate;
///
/// let y_true = vec![1, 1, 1, 1, 1, 0, 0, 0, 0, 0];
/// let y_pred = vec![1, 1, 1, 0, 0, 1, 0, 0, 0, 0];
/// let eval = evaluate(&y_true, &y_pred).unwrap();
/// assert!((eval.metrics.accuracy - 0.7).abs() < 1e-12);
/// assert!((eval.metrics.precision - 0.75).abs() < 1e-12);
/// ```
pub fn evaluate(y_true: &[usize], y_pred: &[usize]) -> Result<Evaluation> {
    let confusion = ConfusionMatrix::from_predictions(y_true, y_pred)?;
    Ok(Evaluation {
        metrics: Metrics::from_confusion(&confusion),
        confusion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_matrix() -> ConfusionMatrix {
        ConfusionMatrix {
            tp: 3,
            fp: 1,
            fn_: 2,
            tn: 4,
        }
    }

    #[test]
    fn test_metrics_reference_values() {
        let m = Metrics::from_confusion(&reference_matrix());
        assert!((m.accuracy - 0.7).abs() < 1e-12);
        assert!((m.precision - 0.75).abs() < 1e-12);
        assert!((m.recall - 0.6).abs() < 1e-12);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_confusion_from_predictions() {
        let y_true = vec![1, 1, 1, 1, 1, 0, 0, 0, 0, 0];
        let y_pred = vec![1, 1, 1, 0, 0, 1, 0, 0, 0, 0];
        let cm = ConfusionMatrix::from_predictions(&y_true, &y_pred).unwrap();
        assert_eq!(cm, reference_matrix());
        assert_eq!(cm.total(), y_true.len());
    }

    #[test]
    fn test_zero_denominators_give_zero() {
        // nothing predicted positive, nothing actually positive
        let m = Metrics::from_confusion(&ConfusionMatrix {
            tn: 5,
            ..ConfusionMatrix::default()
        });
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);

        let empty = Metrics::from_confusion(&ConfusionMatrix::default());
        assert_eq!(empty, Metrics::default());
    }

    #[test]
    fn test_length_mismatch() {
        let err = evaluate(&[1, 0], &[1]).unwrap_err();
        assert!(matches!(err, SpamError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_rows_layout() {
        assert_eq!(reference_matrix().as_rows(), [[4, 1], [2, 3]]);
    }

    #[test]
    fn test_display_aligns_columns() {
        let cm = ConfusionMatrix {
            tp: 117,
            fp: 3,
            fn_: 10,
            tn: 120,
        };
        assert_eq!(cm.to_string(), "[[120   3]\n [ 10 117]]");
        assert_eq!(reference_matrix().to_string(), "[[4 1]\n [2 3]]");
    }

    #[test]
    fn test_evaluation_serializes_fn_field() {
        let eval = evaluate(&[1, 0], &[0, 0]).unwrap();
        let json = serde_json::to_value(eval).unwrap();
        assert_eq!(json["confusion"]["fn"], 1);
        assert_eq!(json["confusion"]["tn"], 1);
        assert_eq!(json["metrics"]["recall"], 0.0);
    }
}
