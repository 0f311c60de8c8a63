//! Decision trees and the random forest ensemble.
//!
//! This module implements:
//! - CART growth with Gini or entropy impurity
//! - Random Forest classifier with bootstrap sampling and per-node feature
//!   subsampling, trained in parallel
//!
//! # Example
//!
//! ```
//! use comment_spam::primitives::SparseVector;
//! use comment_spam::traits::Classifier;
//! use comment_spam::tree::RandomForestClassifier;
//!
//! let x = vec![
//!     SparseVector::from_dense(&[0.0, 0.9]),
//!     SparseVector::from_dense(&[0.1, 0.8]),
//!     SparseVector::from_dense(&[0.9, 0.0]),
//!     SparseVector::from_dense(&[0.8, 0.1]),
//! ];
//! let y = vec![0, 0, 1, 1];
//!
//! let mut forest = RandomForestClassifier::new(25)
//!     .with_max_features(2)
//!     .with_random_state(42);
//! forest.fit(&x, &y).expect("fit should succeed");
//! assert_eq!(forest.n_trees(), 25);
//! assert_eq!(forest.predict(&x).unwrap().len(), 4);
//! ```

mod helpers;

use crate::error::{Result, SpamError};
use crate::primitives::{Matrix, SparseVector};
use crate::traits::{Classifier, ProbabilisticClassifier};
use helpers::{majority_class, GrowthParams, TreeGrower};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

const COMPONENT: &str = "RandomForestClassifier";

/// Impurity measure used to score candidate splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Gini impurity `1 - Σ p²`
    #[default]
    Gini,
    /// Shannon entropy `-Σ p log₂ p`
    Entropy,
}

/// Number of non-constant features evaluated at each node.
///
/// Deserializes from `"sqrt"`, `"all"` or `{ count = N }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxFeatures {
    /// `max(1, ⌊√V⌋)`
    #[default]
    Sqrt,
    /// Every feature
    All,
    /// A fixed count, capped at `V`
    Count(usize),
}

impl MaxFeatures {
    /// Resolves to a concrete count for `n_features` dimensions.
    #[must_use]
    pub fn resolve(self, n_features: usize) -> usize {
        let n = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(k) => k.min(n_features),
        };
        n.max(1)
    }
}

/// Internal node in a decision tree.
///
/// Rows with `x[feature_idx] <= threshold` go left.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Midpoint between two consecutive distinct training values
    pub threshold: f64,
    /// Training samples that reached this node
    pub n_samples: usize,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node holding the training class counts that reached it.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Count per encoded class index
    pub class_counts: Vec<usize>,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

impl Leaf {
    /// Encoded majority class; the lower index wins ties.
    #[must_use]
    pub fn majority(&self) -> usize {
        majority_class(&self.class_counts)
    }
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class counts
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Number of leaves below (and including) this node.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Node(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }

    /// Leaf reached by a sparse row.
    #[must_use]
    pub fn leaf_for(&self, row: &SparseVector) -> &Leaf {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Node(split) => {
                    node = if row.get(split.feature_idx) <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }
}

/// One fitted CART tree of the forest.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: TreeNode,
    /// Impurity decrease per feature, normalized to sum to 1 (all zero for
    /// a single-leaf tree)
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Root node.
    #[must_use]
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Depth of the tree.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of leaves.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Encoded class predicted for `row`.
    #[must_use]
    pub fn predict_encoded(&self, row: &SparseVector) -> usize {
        self.root.leaf_for(row).majority()
    }

    /// Normalized per-feature impurity decrease.
    #[must_use]
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

#[derive(Debug, Clone)]
struct FittedForest {
    trees: Vec<DecisionTree>,
    /// Sorted distinct labels; tree leaves count by position in this list
    classes: Vec<usize>,
    n_features: usize,
}

/// Random Forest classifier - an ensemble of decision trees.
///
/// Each tree is grown on a bootstrap sample drawn from a `StdRng` seeded
/// with `random_state + tree_index`, so the fitted forest does not depend
/// on how rayon schedules the trees. Prediction is a majority vote with
/// ties going to the lower class label; `predict_proba` returns vote
/// fractions.
#[derive(Debug, Clone)]
pub struct RandomForestClassifier {
    n_estimators: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    max_features: MaxFeatures,
    criterion: Criterion,
    random_state: Option<u64>,
    fitted: Option<FittedForest>,
}

impl RandomForestClassifier {
    /// Creates a new Random Forest classifier.
    ///
    /// # Arguments
    ///
    /// * `n_estimators` - Number of trees in the forest
    #[must_use]
    pub fn new(n_estimators: usize) -> Self {
        Self {
            n_estimators,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            criterion: Criterion::Gini,
            random_state: None,
            fitted: None,
        }
    }

    /// Sets the number of trees.
    #[must_use]
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Sets the maximum depth for each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the minimum node size that may still be split.
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    /// Evaluate a fixed number of non-constant features per node.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = MaxFeatures::Count(max_features);
        self
    }

    /// Sets the per-node feature sampling rule.
    #[must_use]
    pub fn with_max_features_rule(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Sets the split criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Sets the random state for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Configured number of trees.
    #[must_use]
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Configured split criterion.
    #[must_use]
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Number of fitted trees; 0 before fit.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.trees.len())
    }

    /// Fitted trees, in seed order.
    #[must_use]
    pub fn trees(&self) -> Option<&[DecisionTree]> {
        self.fitted.as_ref().map(|f| f.trees.as_slice())
    }

    /// Sorted class labels seen during fit.
    #[must_use]
    pub fn classes(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.classes.as_slice())
    }

    /// Mean decrease in impurity per feature, averaged over trees and
    /// normalized to sum to 1.
    ///
    /// All zeros when no tree made a split; `None` before fit.
    #[must_use]
    pub fn feature_importances(&self) -> Option<Vec<f64>> {
        let fitted = self.fitted.as_ref()?;
        let mut total = vec![0.0; fitted.n_features];
        for tree in &fitted.trees {
            for (acc, value) in total.iter_mut().zip(tree.feature_importances()) {
                *acc += value;
            }
        }

        let sum: f64 = total.iter().sum();
        if sum > 0.0 {
            for value in &mut total {
                *value /= sum;
            }
        }
        Some(total)
    }

    fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(SpamError::invalid_hyperparameter(
                "n_estimators",
                self.n_estimators,
                ">= 1",
            ));
        }
        if self.min_samples_split < 2 {
            return Err(SpamError::invalid_hyperparameter(
                "min_samples_split",
                self.min_samples_split,
                ">= 2",
            ));
        }
        if self.max_features == MaxFeatures::Count(0) {
            return Err(SpamError::invalid_hyperparameter("max_features", 0, ">= 1"));
        }
        Ok(())
    }

    fn fitted(&self) -> Result<&FittedForest> {
        self.fitted.as_ref().ok_or(SpamError::NotFitted {
            component: COMPONENT,
        })
    }

    /// Vote counts per row, indexed by encoded class.
    fn votes(&self, x: &[SparseVector]) -> Result<(Vec<Vec<usize>>, &FittedForest)> {
        let fitted = self.fitted()?;
        let mut all = Vec::with_capacity(x.len());
        for row in x {
            if row.dim() != fitted.n_features {
                return Err(SpamError::dimension_mismatch(
                    "features",
                    fitted.n_features,
                    row.dim(),
                ));
            }
            let mut votes = vec![0usize; fitted.classes.len()];
            for tree in &fitted.trees {
                votes[tree.predict_encoded(row)] += 1;
            }
            all.push(votes);
        }
        Ok((all, fitted))
    }
}

impl Default for RandomForestClassifier {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Classifier for RandomForestClassifier {
    /// Grows `n_estimators` trees in parallel on bootstrap samples.
    ///
    /// # Errors
    ///
    /// - `AlreadyFitted` on a second call
    /// - `InvalidHyperparameter` for zero trees, `min_samples_split < 2` or
    ///   zero features per node
    /// - `NoData` / `DimensionMismatch` for empty or inconsistent input
    /// - `SingleClass` when only one label is present
    fn fit(&mut self, x: &[SparseVector], y: &[usize]) -> Result<()> {
        if self.fitted.is_some() {
            return Err(SpamError::AlreadyFitted {
                component: COMPONENT,
            });
        }
        self.validate()?;
        if x.len() != y.len() {
            return Err(SpamError::dimension_mismatch("labels", x.len(), y.len()));
        }
        let matrix = Matrix::from_sparse_rows(x)?;
        let (n_samples, n_features) = matrix.shape();

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(SpamError::SingleClass {
                model: COMPONENT,
                class: classes[0],
            });
        }
        let encoded: Vec<usize> = y
            .iter()
            .map(|label| classes.partition_point(|&c| c < *label))
            .collect();

        let params = GrowthParams {
            criterion: self.criterion,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            max_features: self.max_features.resolve(n_features),
        };
        let base_seed = self
            .random_state
            .unwrap_or_else(|| rand::thread_rng().gen());
        let n_classes = classes.len();

        let span = info_span!("random_forest_fit", trees = self.n_estimators);
        let _guard = span.enter();

        let trees: Vec<DecisionTree> = (0..self.n_estimators)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let samples = helpers::bootstrap_sample(n_samples, &mut rng);
                let (root, mut importances) =
                    TreeGrower::new(&matrix, &encoded, n_classes, params, &mut rng).grow(samples);
                let sum: f64 = importances.iter().sum();
                if sum > 0.0 {
                    for value in &mut importances {
                        *value /= sum;
                    }
                }
                DecisionTree { root, importances }
            })
            .collect();

        debug!(
            samples = n_samples,
            features = n_features,
            max_features = params.max_features,
            mean_depth = trees.iter().map(DecisionTree::depth).sum::<usize>() as f64
                / trees.len() as f64,
            "fitted random forest"
        );
        self.fitted = Some(FittedForest {
            trees,
            classes,
            n_features,
        });
        Ok(())
    }

    fn predict(&self, x: &[SparseVector]) -> Result<Vec<usize>> {
        let (votes, fitted) = self.votes(x)?;
        Ok(votes
            .iter()
            .map(|counts| fitted.classes[majority_class(counts)])
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

impl ProbabilisticClassifier for RandomForestClassifier {
    /// Fraction of trees voting for each class.
    fn predict_proba(&self, x: &[SparseVector]) -> Result<Vec<Vec<f64>>> {
        let (votes, fitted) = self.votes(x)?;
        let n_trees = fitted.trees.len() as f64;
        Ok(votes
            .into_iter()
            .map(|counts| counts.into_iter().map(|c| c as f64 / n_trees).collect())
            .collect())
    }
}
