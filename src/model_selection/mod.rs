//! Model selection utilities for cross-validation and train/test splitting.
//!
//! This module provides tools for:
//! - Train/test splitting over row indices
//! - K-Fold and Stratified K-Fold cross-validation
//! - Cross-validated accuracy for any [`Classifier`]

use crate::error::{Result, SpamError};
use crate::primitives::SparseVector;
use crate::traits::Classifier;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, warn};

/// One `(train_indices, test_indices)` pair.
pub type Fold = (Vec<usize>, Vec<usize>);

/// Results from cross-validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossValidationResult {
    scores: Vec<f64>,
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
}

impl CrossValidationResult {
    /// Summarizes per-fold scores.
    #[must_use]
    pub fn from_scores(scores: Vec<f64>) -> Self {
        if scores.is_empty() {
            return Self {
                scores,
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            scores,
            mean,
            std: variance.sqrt(),
            min,
            max,
        }
    }

    /// Score for each fold, in fold order
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Mean score across folds
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation of scores
    #[must_use]
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Minimum score
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum score
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Produces train/test index folds for a labeled dataset.
pub trait CrossValidator {
    /// Number of folds produced.
    fn n_splits(&self) -> usize;

    /// Folds over `y.len()` samples. Test indices are ascending; every sample
    /// is in exactly one test fold.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` when `n_splits < 2` or exceeds what the data
    /// supports.
    fn split(&self, y: &[usize]) -> Result<Vec<Fold>>;
}

fn check_n_splits(n_splits: usize, n_samples: usize) -> Result<()> {
    if n_splits < 2 {
        return Err(SpamError::invalid_hyperparameter(
            "n_splits",
            n_splits,
            ">= 2",
        ));
    }
    if n_splits > n_samples {
        return Err(SpamError::invalid_hyperparameter(
            "n_splits",
            n_splits,
            &format!("<= n_samples ({n_samples})"),
        ));
    }
    Ok(())
}

fn make_rng(random_state: Option<u64>) -> StdRng {
    match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Turns a per-sample fold assignment into ascending train/test lists.
fn folds_from_assignment(assignment: &[usize], n_splits: usize) -> Vec<Fold> {
    (0..n_splits)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..assignment.len()).partition(|&i| assignment[i] == fold);
            (train, test)
        })
        .collect()
}

/// K-Fold cross-validator.
///
/// Splits data into K consecutive folds. Each fold is used once as test set
/// while the remaining K-1 folds form the training set. The first
/// `n % k` folds get one extra sample.
///
/// # Example
///
/// ```rust
/// use comment_spam::model_selection::KFold;
///
/// let kfold = KFold::new(5);
/// let folds = kfold.split_n(10).unwrap();
/// assert_eq!(folds.len(), 5);
/// assert_eq!(folds[0].1, vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl KFold {
    /// Create a new K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling before splitting into batches.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true; // Shuffle is implied when random_state is set
        self
    }

    /// Generate train/test indices for `n_samples` rows.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` when `n_splits < 2` or `n_splits > n_samples`.
    pub fn split_n(&self, n_samples: usize) -> Result<Vec<Fold>> {
        check_n_splits(self.n_splits, n_samples)?;

        let mut order: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            order.shuffle(&mut make_rng(self.random_state));
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut assignment = vec![0; n_samples];
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = fold_size + usize::from(fold < remainder);
            for &sample in &order[start..start + size] {
                assignment[sample] = fold;
            }
            start += size;
        }
        Ok(folds_from_assignment(&assignment, self.n_splits))
    }
}

impl CrossValidator for KFold {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn split(&self, y: &[usize]) -> Result<Vec<Fold>> {
        self.split_n(y.len())
    }
}

/// Stratified K-Fold cross-validator.
///
/// Keeps each fold's class proportions close to the full dataset's. Samples
/// sorted by class are dealt round-robin to decide how many of each class a
/// fold receives; each class then fills its folds in sample order (or in a
/// seeded shuffled order).
///
/// # Example
///
/// ```rust
/// use comment_spam::model_selection::{CrossValidator, StratifiedKFold};
///
/// let y = [0, 0, 0, 0, 1, 1];
/// let folds = StratifiedKFold::new(2).split(&y).unwrap();
/// assert_eq!(folds[0].1, vec![0, 1, 4]);
/// assert_eq!(folds[1].1, vec![2, 3, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl StratifiedKFold {
    /// Create a new Stratified K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling within each class before assignment.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true;
        self
    }
}

impl CrossValidator for StratifiedKFold {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// # Errors
    ///
    /// Also fails when `n_splits` exceeds the size of every class.
    fn split(&self, y: &[usize]) -> Result<Vec<Fold>> {
        let k = self.n_splits;
        check_n_splits(k, y.len())?;

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); classes.len()];
        for (i, label) in y.iter().enumerate() {
            members[classes.partition_point(|c| c < label)].push(i);
        }

        let largest = members.iter().map(Vec::len).max().unwrap_or(0);
        let smallest = members.iter().map(Vec::len).min().unwrap_or(0);
        if k > largest {
            return Err(SpamError::invalid_hyperparameter(
                "n_splits",
                k,
                &format!("<= the largest class size ({largest})"),
            ));
        }
        if k > smallest {
            warn!(
                n_splits = k,
                smallest_class = smallest,
                "least populated class has fewer members than n_splits"
            );
        }

        if self.shuffle {
            let mut rng = make_rng(self.random_state);
            for indices in &mut members {
                indices.shuffle(&mut rng);
            }
        }

        // allocation[fold][class]: deal the class-sorted samples round-robin
        let mut allocation = vec![vec![0usize; classes.len()]; k];
        let mut position = 0;
        for (class, indices) in members.iter().enumerate() {
            for _ in indices {
                allocation[position % k][class] += 1;
                position += 1;
            }
        }

        let mut assignment = vec![0; y.len()];
        for (class, indices) in members.iter().enumerate() {
            let mut remaining = indices.iter();
            for (fold, counts) in allocation.iter().enumerate() {
                for &sample in remaining.by_ref().take(counts[class]) {
                    assignment[sample] = fold;
                }
            }
        }
        Ok(folds_from_assignment(&assignment, k))
    }
}

/// Copies the items at `indices`, in index order.
#[must_use]
pub fn take_indices<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

/// Run cross-validation on a classifier.
///
/// A fresh model from `factory` is fit on each training fold and scored
/// (accuracy) on the matching test fold.
///
/// # Arguments
///
/// * `factory` - Builds an unfitted model per fold
/// * `x` - Feature rows
/// * `y` - Labels
/// * `cv` - Fold generator (e.g. [`StratifiedKFold`])
///
/// # Errors
///
/// `DimensionMismatch` when `x` and `y` differ in length, splitter errors,
/// and any fit/predict error from a fold model.
///
/// # Example
///
/// ```rust
/// use comment_spam::prelude::*;
/// use comment_spam::model_selection::{cross_validate, KFold};
///
/// let x: Vec<SparseVector> = (0..6)
///     .map(|i| SparseVector::from_pairs(2, vec![(i % 2, 1.0)]).unwrap())
///     .collect();
/// let y: Vec<usize> = (0..6).map(|i| i % 2).collect();
///
/// let result = cross_validate(MultinomialNB::new, &x, &y, &KFold::new(3)).unwrap();
/// assert_eq!(result.scores().len(), 3);
/// assert!((result.mean() - 1.0).abs() < 1e-12);
/// ```
pub fn cross_validate<M, F, C>(
    factory: F,
    x: &[SparseVector],
    y: &[usize],
    cv: &C,
) -> Result<CrossValidationResult>
where
    M: Classifier,
    F: Fn() -> M,
    C: CrossValidator + ?Sized,
{
    if x.len() != y.len() {
        return Err(SpamError::dimension_mismatch("labels", x.len(), y.len()));
    }

    let folds = cv.split(y)?;
    let mut scores = Vec::with_capacity(folds.len());
    for (fold, (train_idx, test_idx)) in folds.iter().enumerate() {
        let mut model = factory();
        model.fit(&take_indices(x, train_idx), &take_indices(y, train_idx))?;
        let score = model.score(&take_indices(x, test_idx), &take_indices(y, test_idx))?;
        debug!(
            fold,
            train = train_idx.len(),
            test = test_idx.len(),
            accuracy = score,
            "cross-validation fold"
        );
        scores.push(score);
    }
    Ok(CrossValidationResult::from_scores(scores))
}

/// Mean stratified k-fold accuracy.
///
/// # Errors
///
/// See [`cross_validate`].
pub fn cross_val_accuracy<M, F>(factory: F, x: &[SparseVector], y: &[usize], k: usize) -> Result<f64>
where
    M: Classifier,
    F: Fn() -> M,
{
    Ok(cross_validate(factory, x, y, &StratifiedKFold::new(k))?.mean())
}

/// Shuffled train/test split over `n_samples` row indices.
///
/// The test partition gets `⌈test_size · n⌉` rows.
///
/// # Errors
///
/// - `NoData` for zero samples
/// - `InvalidHyperparameter` when `test_size` is outside `(0, 1)` or either
///   partition would be empty
///
/// # Example
///
/// ```rust
/// use comment_spam::model_selection::train_test_split;
///
/// let (train, test) = train_test_split(8, 0.25, Some(42)).unwrap();
/// assert_eq!((train.len(), test.len()), (6, 2));
/// ```
pub fn train_test_split(
    n_samples: usize,
    test_size: f64,
    random_state: Option<u64>,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if n_samples == 0 {
        return Err(SpamError::empty_input("train/test split"));
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SpamError::invalid_hyperparameter(
            "test_size",
            test_size,
            "a value in (0, 1)",
        ));
    }

    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SpamError::invalid_hyperparameter(
            "test_size",
            test_size,
            &format!("non-empty partitions for {n_samples} samples"),
        ));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut make_rng(random_state));
    let test = indices.split_off(n_train);
    Ok((indices, test))
}

#[cfg(test)]
mod tests;
