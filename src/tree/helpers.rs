//! Helper functions for tree building algorithms.
//!
//! Trees are grown over an index list into a shared dense matrix, so a
//! bootstrap sample never copies feature data.

use super::{Criterion, Leaf, Node, TreeNode};
use crate::primitives::Matrix;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Splits must lower weighted impurity by more than this.
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

// ============================================================================
// Impurity
// ============================================================================

/// Node impurity from per-class counts.
///
/// Gini: `1 - Σ p²`. Entropy: `-Σ p log₂ p`. Zero for an empty node.
pub(super) fn impurity(criterion: Criterion, counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    match criterion {
        Criterion::Gini => {
            1.0 - counts
                .iter()
                .map(|&c| {
                    let p = c as f64 / n;
                    p * p
                })
                .sum::<f64>()
        }
        Criterion::Entropy => -counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / n;
                p * p.log2()
            })
            .sum::<f64>(),
    }
}

/// Per-class counts for the rows in `samples`.
pub(super) fn class_counts(y: &[usize], samples: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &s in samples {
        counts[y[s]] += 1;
    }
    counts
}

/// Class index with the highest count; the lowest index wins ties.
pub(super) fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate().skip(1) {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

// ============================================================================
// Split search
// ============================================================================

/// Best threshold for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SplitCandidate {
    pub feature_idx: usize,
    pub threshold: f64,
    /// Weighted child impurity `(n_l·I_l + n_r·I_r) / n`
    pub weighted_impurity: f64,
}

/// Scans every midpoint between consecutive distinct values of one feature.
///
/// Returns `None` when the feature is constant over `samples`. The first
/// threshold reaching the lowest weighted impurity is kept.
pub(super) fn best_split_for_feature(
    x: &Matrix,
    y: &[usize],
    samples: &[usize],
    feature_idx: usize,
    n_classes: usize,
    criterion: Criterion,
) -> Option<SplitCandidate> {
    let mut column: Vec<(f64, usize)> = samples
        .iter()
        .map(|&s| (x.get(s, feature_idx), y[s]))
        .collect();
    column.sort_by(|a, b| a.0.total_cmp(&b.0));

    let first = column.first()?.0;
    let last = column.last()?.0;
    if first == last {
        return None;
    }

    let n = column.len();
    let mut right = vec![0usize; n_classes];
    for &(_, label) in &column {
        right[label] += 1;
    }
    let mut left = vec![0usize; n_classes];

    let mut best: Option<SplitCandidate> = None;
    for i in 0..n - 1 {
        let label = column[i].1;
        left[label] += 1;
        right[label] -= 1;

        if column[i].0 == column[i + 1].0 {
            continue;
        }

        let n_left = i + 1;
        let n_right = n - n_left;
        let weighted = (n_left as f64 * impurity(criterion, &left, n_left)
            + n_right as f64 * impurity(criterion, &right, n_right))
            / n as f64;

        if best.map_or(true, |b| weighted < b.weighted_impurity) {
            best = Some(SplitCandidate {
                feature_idx,
                threshold: (column[i].0 + column[i + 1].0) / 2.0,
                weighted_impurity: weighted,
            });
        }
    }
    best
}

// ============================================================================
// Bootstrap
// ============================================================================

/// Draws `n_samples` row indices with replacement.
pub(super) fn bootstrap_sample(n_samples: usize, rng: &mut StdRng) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    (0..n_samples).map(|_| dist.sample(&mut *rng)).collect()
}

// ============================================================================
// Tree growth
// ============================================================================

/// Stopping rules and feature sampling for one tree.
#[derive(Debug, Clone, Copy)]
pub(super) struct GrowthParams {
    pub criterion: Criterion,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Non-constant features to evaluate per node
    pub max_features: usize,
}

/// Recursive CART builder over encoded class indices.
pub(super) struct TreeGrower<'a> {
    x: &'a Matrix,
    y: &'a [usize],
    n_classes: usize,
    params: GrowthParams,
    rng: &'a mut StdRng,
    /// Total weighted impurity decrease per feature
    importances: Vec<f64>,
}

impl<'a> TreeGrower<'a> {
    pub(super) fn new(
        x: &'a Matrix,
        y: &'a [usize],
        n_classes: usize,
        params: GrowthParams,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            x,
            y,
            n_classes,
            params,
            rng,
            importances: vec![0.0; x.n_cols()],
        }
    }

    /// Grows a tree from the root sample list. Returns the root and the
    /// per-feature impurity decrease.
    pub(super) fn grow(mut self, samples: Vec<usize>) -> (TreeNode, Vec<f64>) {
        let constant = vec![false; self.x.n_cols()];
        let root = self.build(samples, 0, &constant);
        (root, self.importances)
    }

    fn build(&mut self, samples: Vec<usize>, depth: usize, constant: &[bool]) -> TreeNode {
        let n = samples.len();
        let counts = class_counts(self.y, &samples, self.n_classes);

        let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.params.max_depth.is_some_and(|d| depth >= d);
        if is_pure || depth_reached || n < self.params.min_samples_split {
            return leaf(counts);
        }

        let parent = impurity(self.params.criterion, &counts, n);
        let mut constant = constant.to_vec();
        let Some(split) = self.find_split(&samples, &mut constant) else {
            return leaf(counts);
        };
        if parent - split.weighted_impurity <= MIN_IMPURITY_DECREASE {
            return leaf(counts);
        }

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&s| self.x.get(s, split.feature_idx) <= split.threshold);
        if left.is_empty() || right.is_empty() {
            return leaf(counts);
        }

        self.importances[split.feature_idx] += n as f64 * (parent - split.weighted_impurity);

        let left_child = self.build(left, depth + 1, &constant);
        let right_child = self.build(right, depth + 1, &constant);
        TreeNode::Node(Node {
            feature_idx: split.feature_idx,
            threshold: split.threshold,
            n_samples: n,
            left: Box::new(left_child),
            right: Box::new(right_child),
        })
    }

    /// Visits features in random order until `max_features` non-constant
    /// ones were evaluated. Constant features are recorded for descendants.
    fn find_split(&mut self, samples: &[usize], constant: &mut [bool]) -> Option<SplitCandidate> {
        let mut candidates: Vec<usize> = (0..constant.len()).filter(|&f| !constant[f]).collect();
        candidates.shuffle(&mut *self.rng);

        let mut evaluated = 0;
        let mut best: Option<SplitCandidate> = None;
        for feature_idx in candidates {
            if evaluated >= self.params.max_features {
                break;
            }
            let Some(candidate) = best_split_for_feature(
                self.x,
                self.y,
                samples,
                feature_idx,
                self.n_classes,
                self.params.criterion,
            ) else {
                constant[feature_idx] = true;
                continue;
            };
            evaluated += 1;
            if best.map_or(true, |b| candidate.weighted_impurity < b.weighted_impurity) {
                best = Some(candidate);
            }
        }
        best
    }
}

fn leaf(class_counts: Vec<usize>) -> TreeNode {
    let n_samples = class_counts.iter().sum();
    TreeNode::Leaf(Leaf {
        class_counts,
        n_samples,
    })
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
