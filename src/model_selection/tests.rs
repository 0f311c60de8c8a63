use super::*;
use crate::classification::MultinomialNB;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn assert_partition(folds: &[Fold], n_samples: usize) {
    let mut seen = vec![0usize; n_samples];
    for (train, test) in folds {
        assert_eq!(train.len() + test.len(), n_samples);
        let train_set: BTreeSet<_> = train.iter().collect();
        assert!(test.iter().all(|i| !train_set.contains(i)));
        assert!(test.windows(2).all(|w| w[0] < w[1]));
        for &i in test {
            seen[i] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

// ========================================================================
// CrossValidationResult
// ========================================================================

#[test]
fn test_cv_result_statistics() {
    let result = CrossValidationResult::from_scores(vec![0.8, 0.9, 1.0, 0.7]);
    assert!((result.mean() - 0.85).abs() < 1e-12);
    assert!((result.std() - 0.0125_f64.sqrt()).abs() < 1e-12);
    assert_eq!(result.min(), 0.7);
    assert_eq!(result.max(), 1.0);
    assert_eq!(result.scores().len(), 4);
}

#[test]
fn test_cv_result_empty() {
    let result = CrossValidationResult::from_scores(vec![]);
    assert_eq!(result.mean(), 0.0);
    assert_eq!(result.std(), 0.0);
}

// ========================================================================
// KFold
// ========================================================================

#[test]
fn test_kfold_contiguous_with_remainder() {
    let folds = KFold::new(3).split_n(10).unwrap();
    assert_eq!(folds.len(), 3);
    assert_eq!(folds[0].1, vec![0, 1, 2, 3]);
    assert_eq!(folds[1].1, vec![4, 5, 6]);
    assert_eq!(folds[2].1, vec![7, 8, 9]);
    assert_eq!(folds[1].0, vec![0, 1, 2, 3, 7, 8, 9]);
    assert_partition(&folds, 10);
}

#[test]
fn test_kfold_shuffle_reproducible() {
    let a = KFold::new(4).with_random_state(42).split_n(20).unwrap();
    let b = KFold::new(4).with_random_state(42).split_n(20).unwrap();
    let contiguous = KFold::new(4).split_n(20).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, contiguous);
    assert_partition(&a, 20);
}

#[test]
fn test_kfold_invalid_splits() {
    assert!(matches!(
        KFold::new(1).split_n(10),
        Err(SpamError::InvalidHyperparameter { .. })
    ));
    assert!(matches!(
        KFold::new(11).split_n(10),
        Err(SpamError::InvalidHyperparameter { .. })
    ));
    assert!(KFold::new(10).split_n(10).is_ok());
}

#[test]
fn test_kfold_as_cross_validator() {
    let kfold = KFold::new(2);
    assert_eq!(CrossValidator::n_splits(&kfold), 2);
    let folds = kfold.split(&[0, 1, 0, 1]).unwrap();
    assert_eq!(folds[0].1, vec![0, 1]);
}

// ========================================================================
// StratifiedKFold
// ========================================================================

#[test]
fn test_stratified_preserves_class_balance() {
    // 10 ham, 5 spam
    let y: Vec<usize> = (0..15).map(|i| usize::from(i >= 10)).collect();
    let folds = StratifiedKFold::new(5).split(&y).unwrap();
    assert_partition(&folds, 15);
    for (_, test) in &folds {
        let spam = test.iter().filter(|&&i| y[i] == 1).count();
        assert_eq!(test.len(), 3);
        assert_eq!(spam, 1);
    }
}

#[test]
fn test_stratified_interleaved_labels() {
    let y = vec![1, 0, 1, 0, 1, 0, 1, 0];
    let folds = StratifiedKFold::new(2).split(&y).unwrap();
    // class 0 members [1,3,5,7], class 1 members [0,2,4,6]
    assert_eq!(folds[0].1, vec![0, 1, 2, 3]);
    assert_eq!(folds[1].1, vec![4, 5, 6, 7]);
}

#[test]
fn test_stratified_shuffle_reproducible() {
    let y: Vec<usize> = (0..20).map(|i| i % 2).collect();
    let a = StratifiedKFold::new(4).with_random_state(3).split(&y).unwrap();
    let b = StratifiedKFold::new(4).with_random_state(3).split(&y).unwrap();
    assert_eq!(a, b);
    assert_partition(&a, 20);
    for (_, test) in &a {
        assert_eq!(test.len(), 5);
        let spam = test.iter().filter(|&&i| y[i] == 1).count();
        assert!(spam == 2 || spam == 3);
    }
}

#[test]
fn test_stratified_too_many_splits() {
    let y = vec![0, 0, 1, 1, 1];
    assert!(matches!(
        StratifiedKFold::new(4).split(&y),
        Err(SpamError::InvalidHyperparameter { .. })
    ));
    assert!(StratifiedKFold::new(3).split(&y).is_ok());
    assert!(StratifiedKFold::new(1).split(&y).is_err());
}

// ========================================================================
// cross_validate
// ========================================================================

fn toy_features() -> (Vec<SparseVector>, Vec<usize>) {
    let x = (0..10)
        .map(|i| SparseVector::from_pairs(2, vec![(i % 2, 1.0)]).unwrap())
        .collect();
    let y = (0..10).map(|i| i % 2).collect();
    (x, y)
}

#[test]
fn test_cross_validate_fresh_model_per_fold() {
    let (x, y) = toy_features();
    let result = cross_validate(MultinomialNB::new, &x, &y, &StratifiedKFold::new(5)).unwrap();
    assert_eq!(result.scores().len(), 5);
    assert!((result.mean() - 1.0).abs() < 1e-12);
    assert_eq!(result.std(), 0.0);
}

#[test]
fn test_cross_validate_mean_matches_scores() {
    let (x, mut y) = toy_features();
    // flip two labels so some folds score below 1
    y[0] = 1;
    y[3] = 0;
    let result = cross_validate(MultinomialNB::new, &x, &y, &KFold::new(5)).unwrap();
    let mean = result.scores().iter().sum::<f64>() / 5.0;
    assert!((result.mean() - mean).abs() < 1e-12);
    assert!(result.scores().iter().all(|s| (0.0..=1.0).contains(s)));
    assert!(result.min() <= result.mean() && result.mean() <= result.max());
}

#[test]
fn test_cross_validate_propagates_fold_errors() {
    let (x, y) = toy_features();
    // contiguous folds of a sorted label vector leave single-class training data
    let sorted: Vec<usize> = {
        let mut s = y.clone();
        s.sort_unstable();
        s
    };
    let err = cross_validate(MultinomialNB::new, &x, &sorted, &KFold::new(2)).unwrap_err();
    assert!(matches!(err, SpamError::SingleClass { .. }));
}

#[test]
fn test_cross_validate_length_mismatch() {
    let (x, y) = toy_features();
    let err = cross_validate(MultinomialNB::new, &x, &y[..4], &KFold::new(2)).unwrap_err();
    assert!(matches!(err, SpamError::DimensionMismatch { .. }));
}

#[test]
fn test_cross_val_accuracy_is_mean() {
    let (x, y) = toy_features();
    let acc = cross_val_accuracy(MultinomialNB::new, &x, &y, 5).unwrap();
    assert!((acc - 1.0).abs() < 1e-12);
    assert!(matches!(
        cross_val_accuracy(MultinomialNB::new, &x, &y, 1),
        Err(SpamError::InvalidHyperparameter { .. })
    ));
}

// ========================================================================
// train_test_split
// ========================================================================

#[test]
fn test_train_test_split_sizes() {
    let (train, test) = train_test_split(10, 0.25, Some(42)).unwrap();
    assert_eq!(test.len(), 3);
    assert_eq!(train.len(), 7);

    let all: BTreeSet<usize> = train.iter().chain(&test).copied().collect();
    assert_eq!(all, (0..10).collect::<BTreeSet<usize>>());
}

#[test]
fn test_train_test_split_reproducible() {
    let a = train_test_split(50, 0.25, Some(42)).unwrap();
    let b = train_test_split(50, 0.25, Some(42)).unwrap();
    let c = train_test_split(50, 0.25, Some(7)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_train_test_split_invalid() {
    assert!(matches!(
        train_test_split(0, 0.25, None),
        Err(SpamError::NoData { .. })
    ));
    for bad in [0.0, 1.0, -0.5, f64::NAN] {
        assert!(matches!(
            train_test_split(10, bad, None),
            Err(SpamError::InvalidHyperparameter { .. })
        ));
    }
    // one sample cannot feed both partitions
    assert!(train_test_split(1, 0.5, Some(0)).is_err());
}

#[test]
fn test_take_indices() {
    let items = vec!["a", "b", "c", "d"];
    assert_eq!(take_indices(&items, &[3, 0, 0]), vec!["d", "a", "a"]);
}

proptest! {
    #[test]
    fn prop_kfold_partitions_samples(n in 2usize..60, k in 2usize..8, seed in any::<u64>()) {
        prop_assume!(k <= n);
        let folds = KFold::new(k).with_random_state(seed).split_n(n).unwrap();
        prop_assert_eq!(folds.len(), k);
        let sizes: Vec<usize> = folds.iter().map(|(_, t)| t.len()).collect();
        let (lo, hi) = (sizes.iter().min().unwrap(), sizes.iter().max().unwrap());
        prop_assert!(hi - lo <= 1);
        assert_partition(&folds, n);
    }

    #[test]
    fn prop_stratified_partitions_samples(y in prop::collection::vec(0usize..2, 10..60)) {
        let k = 5;
        let majority = y.iter().filter(|&&l| l == 1).count().max(y.iter().filter(|&&l| l == 0).count());
        prop_assume!(majority >= k);
        let folds = StratifiedKFold::new(k).split(&y).unwrap();
        assert_partition(&folds, y.len());
        let sizes: Vec<usize> = folds.iter().map(|(_, t)| t.len()).collect();
        prop_assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
    }
}
