//! Multinomial Naive Bayes.

use crate::error::{Result, SpamError};
use crate::primitives::SparseVector;
use crate::traits::{Classifier, ProbabilisticClassifier};
use tracing::debug;

const COMPONENT: &str = "MultinomialNB";

#[derive(Debug, Clone)]
struct FittedNB {
    /// Sorted distinct training labels
    classes: Vec<usize>,
    /// ln P(y=c)
    class_log_prior: Vec<f64>,
    /// ln P(feature j | y=c): feature_log_prob[class][feature]
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

/// Multinomial Naive Bayes classifier with additive (Lidstone) smoothing.
///
/// Feature values are treated as fractional counts, so TF-IDF rows can be
/// fed directly.
///
/// **Model:**
/// ```text
/// P(j | c)      = (Σ_{i∈c} x_ij + α) / (Σ_j Σ_{i∈c} x_ij + α·V)
/// score(c | x)  = ln P(c) + Σ_j x_j · ln P(j | c)
/// ```
///
/// Prediction is the argmax of the score; ties go to the lower class label.
///
/// # Example
///
/// ```
/// use comment_spam::classification::MultinomialNB;
/// use comment_spam::primitives::SparseVector;
/// use comment_spam::traits::{Classifier, ProbabilisticClassifier};
///
/// let x = vec![
///     SparseVector::from_pairs(3, vec![(0, 1.0)]).unwrap(),
///     SparseVector::from_pairs(3, vec![(1, 0.6), (2, 0.8)]).unwrap(),
/// ];
/// let y = vec![1, 0];
///
/// let mut model = MultinomialNB::new();
/// model.fit(&x, &y).expect("two classes");
/// assert_eq!(model.predict(&x).unwrap(), vec![1, 0]);
///
/// let proba = model.predict_proba(&x).unwrap();
/// assert!((proba[0].iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct MultinomialNB {
    /// Additive smoothing parameter
    alpha: f64,
    fitted: Option<FittedNB>,
}

impl MultinomialNB {
    /// Creates an unfitted classifier with Laplace smoothing (`alpha = 1`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            fitted: None,
        }
    }

    /// Sets the smoothing parameter. Must be finite and positive; checked
    /// at `fit`.
    ///
    /// # Example
    ///
    /// ```
    /// use comment_spam::classification::MultinomialNB;
    ///
    /// let model = MultinomialNB::new().with_alpha(0.5);
    /// assert_eq!(model.alpha(), 0.5);
    /// ```
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Smoothing parameter.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Sorted class labels seen during fit.
    #[must_use]
    pub fn classes(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.classes.as_slice())
    }

    /// Log prior per class, aligned with [`classes`](Self::classes).
    #[must_use]
    pub fn class_log_prior(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.class_log_prior.as_slice())
    }

    /// Smoothed log likelihood per class and feature.
    #[must_use]
    pub fn feature_log_prob(&self) -> Option<&[Vec<f64>]> {
        self.fitted.as_ref().map(|f| f.feature_log_prob.as_slice())
    }

    /// Training feature dimension; 0 before fit.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.n_features)
    }

    /// Unnormalized log posterior per row and class.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before fit or `DimensionMismatch` for a row of
    /// the wrong dimension.
    pub fn joint_log_likelihood(&self, x: &[SparseVector]) -> Result<Vec<Vec<f64>>> {
        let fitted = self.fitted.as_ref().ok_or(SpamError::NotFitted {
            component: COMPONENT,
        })?;

        x.iter()
            .map(|row| {
                if row.dim() != fitted.n_features {
                    return Err(SpamError::dimension_mismatch(
                        "features",
                        fitted.n_features,
                        row.dim(),
                    ));
                }
                Ok(fitted
                    .class_log_prior
                    .iter()
                    .zip(&fitted.feature_log_prob)
                    .map(|(prior, log_prob)| {
                        prior + row.iter().map(|(j, v)| v * log_prob[j]).sum::<f64>()
                    })
                    .collect())
            })
            .collect()
    }

    fn validate_training_data(x: &[SparseVector], y: &[usize]) -> Result<usize> {
        let first = x
            .first()
            .ok_or_else(|| SpamError::empty_input("training rows"))?;
        if x.len() != y.len() {
            return Err(SpamError::dimension_mismatch("labels", x.len(), y.len()));
        }
        let n_features = first.dim();
        for row in x {
            if row.dim() != n_features {
                return Err(SpamError::dimension_mismatch(
                    "features",
                    n_features,
                    row.dim(),
                ));
            }
            if let Some(&value) = row.values().iter().find(|&&v| v < 0.0) {
                return Err(SpamError::NegativeFeature {
                    model: COMPONENT,
                    value,
                });
            }
        }
        Ok(n_features)
    }
}

impl Default for MultinomialNB {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MultinomialNB {
    /// Accumulates per-class feature mass and class frequencies.
    ///
    /// # Errors
    ///
    /// - `AlreadyFitted` on a second call
    /// - `InvalidHyperparameter` when `alpha` is not a positive finite number
    /// - `NoData` / `DimensionMismatch` for empty or inconsistent input
    /// - `SingleClass` when only one label is present
    fn fit(&mut self, x: &[SparseVector], y: &[usize]) -> Result<()> {
        if self.fitted.is_some() {
            return Err(SpamError::AlreadyFitted {
                component: COMPONENT,
            });
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(SpamError::invalid_hyperparameter(
                "alpha",
                self.alpha,
                "a finite value > 0",
            ));
        }
        let n_features = Self::validate_training_data(x, y)?;

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(SpamError::SingleClass {
                model: COMPONENT,
                class: classes[0],
            });
        }

        let n_classes = classes.len();
        let mut class_count = vec![0.0_f64; n_classes];
        let mut feature_count = vec![vec![0.0_f64; n_features]; n_classes];

        for (row, label) in x.iter().zip(y) {
            // classes is sorted and contains every label
            let c = classes.partition_point(|&k| k < *label);
            class_count[c] += 1.0;
            for (j, v) in row.iter() {
                feature_count[c][j] += v;
            }
        }

        let n_samples = x.len() as f64;
        let class_log_prior = class_count.iter().map(|n| (n / n_samples).ln()).collect();

        let smoothing = self.alpha * n_features as f64;
        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let denom = (counts.iter().sum::<f64>() + smoothing).ln();
                counts
                    .iter()
                    .map(|fc| (fc + self.alpha).ln() - denom)
                    .collect()
            })
            .collect();

        debug!(
            samples = x.len(),
            features = n_features,
            classes = n_classes,
            alpha = self.alpha,
            "fitted multinomial naive bayes"
        );
        self.fitted = Some(FittedNB {
            classes,
            class_log_prior,
            feature_log_prob,
            n_features,
        });
        Ok(())
    }

    fn predict(&self, x: &[SparseVector]) -> Result<Vec<usize>> {
        let scores = self.joint_log_likelihood(x)?;
        let classes = self.classes().ok_or(SpamError::NotFitted {
            component: COMPONENT,
        })?;
        Ok(scores
            .iter()
            .map(|row| classes[argmax_first(row)])
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

impl ProbabilisticClassifier for MultinomialNB {
    /// Posterior probabilities via log-sum-exp over the joint log likelihood.
    fn predict_proba(&self, x: &[SparseVector]) -> Result<Vec<Vec<f64>>> {
        let scores = self.joint_log_likelihood(x)?;
        Ok(scores
            .into_iter()
            .map(|log_probs| {
                let max = log_probs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let exp: Vec<f64> = log_probs.iter().map(|lp| (lp - max).exp()).collect();
                let sum: f64 = exp.iter().sum();
                exp.into_iter().map(|p| p / sum).collect()
            })
            .collect())
    }
}

/// Index of the maximum value; the first one wins on ties.
pub(crate) fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
