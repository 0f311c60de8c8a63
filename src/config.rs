//! Experiment configuration.
//!
//! Every field has a default reproducing the reference batch run (75/25
//! split seeded with 42, 5-fold stratified CV, 100-tree forest), so an empty
//! TOML document is a valid configuration.
//!
//! ```
//! use comment_spam::config::{ExperimentConfig, ExtractorScope};
//!
//! let config = ExperimentConfig::from_toml_str(
//!     r#"
//!     extractor_scope = "full"
//!
//!     [random_forest]
//!     n_estimators = 10
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.extractor_scope, ExtractorScope::Full);
//! assert_eq!(config.random_forest.n_estimators, 10);
//! assert_eq!(config.split.test_size, 0.25);
//! ```

use crate::classification::MultinomialNB;
use crate::error::{Result, SpamError};
use crate::model_selection::{CrossValidator, KFold, StratifiedKFold};
use crate::tree::{Criterion, MaxFeatures, RandomForestClassifier};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed used by every stochastic step unless overridden.
pub const DEFAULT_SEED: u64 = 42;

/// Which documents the TF-IDF vocabulary is learned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorScope {
    /// Training partition only
    #[default]
    Training,
    /// Entire corpus, test partition included
    Full,
}

/// Train/test split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of comments held out, in (0, 1)
    pub test_size: f64,
    /// Shuffle seed; `None` draws from entropy
    pub random_state: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.25,
            random_state: Some(DEFAULT_SEED),
        }
    }
}

/// Multinomial Naive Bayes settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive smoothing, > 0
    pub alpha: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl NaiveBayesConfig {
    /// Unfitted model with these settings.
    #[must_use]
    pub fn build(&self) -> MultinomialNB {
        MultinomialNB::new().with_alpha(self.alpha)
    }
}

/// Random forest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Depth limit; `None` grows until pure
    pub max_depth: Option<usize>,
    /// Smallest node that may still be split
    pub min_samples_split: usize,
    /// Features examined per node
    pub max_features: MaxFeatures,
    /// Split impurity measure
    pub criterion: Criterion,
    /// Forest seed; `None` draws from entropy
    pub random_state: Option<u64>,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            criterion: Criterion::Gini,
            random_state: Some(DEFAULT_SEED),
        }
    }
}

impl RandomForestConfig {
    /// Unfitted forest with these settings.
    #[must_use]
    pub fn build(&self) -> RandomForestClassifier {
        let mut forest = RandomForestClassifier::new(self.n_estimators)
            .with_min_samples_split(self.min_samples_split)
            .with_max_features_rule(self.max_features)
            .with_criterion(self.criterion);
        if let Some(depth) = self.max_depth {
            forest = forest.with_max_depth(depth);
        }
        if let Some(seed) = self.random_state {
            forest = forest.with_random_state(seed);
        }
        forest
    }
}

/// Cross-validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    /// Number of folds, >= 2
    pub n_splits: usize,
    /// Preserve the class ratio in every fold
    pub stratified: bool,
    /// Shuffle seed for fold assignment; `None` keeps corpus order
    pub random_state: Option<u64>,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            n_splits: 5,
            stratified: true,
            random_state: None,
        }
    }
}

impl CrossValidationConfig {
    /// Splitter described by these settings.
    #[must_use]
    pub fn build(&self) -> Box<dyn CrossValidator> {
        match (self.stratified, self.random_state) {
            (true, Some(seed)) => {
                Box::new(StratifiedKFold::new(self.n_splits).with_random_state(seed))
            }
            (true, None) => Box::new(StratifiedKFold::new(self.n_splits)),
            (false, Some(seed)) => Box::new(KFold::new(self.n_splits).with_random_state(seed)),
            (false, None) => Box::new(KFold::new(self.n_splits)),
        }
    }
}

/// Full configuration of one experiment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Where the vectorizer learns its vocabulary
    pub extractor_scope: ExtractorScope,
    /// Train/test split
    pub split: SplitConfig,
    /// Naive Bayes hyperparameters
    pub naive_bayes: NaiveBayesConfig,
    /// Random forest hyperparameters
    pub random_forest: RandomForestConfig,
    /// Cross-validation scheme
    pub cross_validation: CrossValidationConfig,
}

impl ExperimentConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// `Config` on malformed TOML, `InvalidHyperparameter` on out-of-range
    /// values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let test_size = self.split.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(SpamError::invalid_hyperparameter(
                "split.test_size",
                test_size,
                "must be in (0, 1)",
            ));
        }
        if !(self.naive_bayes.alpha.is_finite() && self.naive_bayes.alpha > 0.0) {
            return Err(SpamError::invalid_hyperparameter(
                "naive_bayes.alpha",
                self.naive_bayes.alpha,
                "must be finite and > 0",
            ));
        }
        let forest = &self.random_forest;
        if forest.n_estimators == 0 {
            return Err(SpamError::invalid_hyperparameter(
                "random_forest.n_estimators",
                forest.n_estimators,
                "must be >= 1",
            ));
        }
        if forest.min_samples_split < 2 {
            return Err(SpamError::invalid_hyperparameter(
                "random_forest.min_samples_split",
                forest.min_samples_split,
                "must be >= 2",
            ));
        }
        if forest.max_features == MaxFeatures::Count(0) {
            return Err(SpamError::invalid_hyperparameter(
                "random_forest.max_features",
                0,
                "must be >= 1",
            ));
        }
        if self.cross_validation.n_splits < 2 {
            return Err(SpamError::invalid_hyperparameter(
                "cross_validation.n_splits",
                self.cross_validation.n_splits,
                "must be >= 2",
            ));
        }
        Ok(())
    }

    /// Use `seed` for the split and the forest.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.split.random_state = Some(seed);
        self.random_forest.random_state = Some(seed);
        self
    }

    /// Sets the held-out fraction.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.split.test_size = test_size;
        self
    }

    /// Sets the number of cross-validation folds.
    #[must_use]
    pub fn with_folds(mut self, n_splits: usize) -> Self {
        self.cross_validation.n_splits = n_splits;
        self
    }

    /// Sets the number of trees.
    #[must_use]
    pub fn with_trees(mut self, n_estimators: usize) -> Self {
        self.random_forest.n_estimators = n_estimators;
        self
    }

    /// Sets where the vocabulary is learned.
    #[must_use]
    pub fn with_extractor_scope(mut self, scope: ExtractorScope) -> Self {
        self.extractor_scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_reference_run() {
        let config = ExperimentConfig::default();
        assert_eq!(config.extractor_scope, ExtractorScope::Training);
        assert_eq!(config.split.test_size, 0.25);
        assert_eq!(config.split.random_state, Some(42));
        assert_eq!(config.naive_bayes.alpha, 1.0);
        assert_eq!(config.random_forest.n_estimators, 100);
        assert_eq!(config.random_forest.random_state, Some(42));
        assert_eq!(config.cross_validation.n_splits, 5);
        assert!(config.cross_validation.stratified);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ExperimentConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let toml = r#"
extractor_scope = "full"

[split]
test_size = 0.3
random_state = 7

[naive_bayes]
alpha = 0.5

[random_forest]
n_estimators = 25
max_depth = 8
max_features = "all"
criterion = "entropy"

[cross_validation]
n_splits = 3
stratified = false
"#;
        let config = ExperimentConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.extractor_scope, ExtractorScope::Full);
        assert_eq!(config.split.test_size, 0.3);
        assert_eq!(config.split.random_state, Some(7));
        assert_eq!(config.naive_bayes.alpha, 0.5);
        assert_eq!(config.random_forest.n_estimators, 25);
        assert_eq!(config.random_forest.max_depth, Some(8));
        assert_eq!(config.random_forest.max_features, MaxFeatures::All);
        assert_eq!(config.random_forest.criterion, Criterion::Entropy);
        assert_eq!(config.random_forest.min_samples_split, 2);
        assert_eq!(config.cross_validation.n_splits, 3);
        assert!(!config.cross_validation.stratified);
    }

    #[test]
    fn test_parse_max_features_count() {
        let config =
            ExperimentConfig::from_toml_str("[random_forest]\nmax_features = { count = 12 }\n")
                .unwrap();
        assert_eq!(config.random_forest.max_features, MaxFeatures::Count(12));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ExperimentConfig::from_toml_str("[split\ntest_size = ").unwrap_err();
        assert!(matches!(err, SpamError::Config(_)));

        let err = ExperimentConfig::from_toml_str("extractor_scope = \"everything\"").unwrap_err();
        assert!(matches!(err, SpamError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases = [
            "[split]\ntest_size = 1.0",
            "[split]\ntest_size = 0.0",
            "[naive_bayes]\nalpha = 0.0",
            "[random_forest]\nn_estimators = 0",
            "[random_forest]\nmin_samples_split = 1",
            "[random_forest]\nmax_features = { count = 0 }",
            "[cross_validation]\nn_splits = 1",
        ];
        for toml in cases {
            let err = ExperimentConfig::from_toml_str(toml).unwrap_err();
            assert!(
                matches!(err, SpamError::InvalidHyperparameter { .. }),
                "{toml}: {err}"
            );
        }
    }

    #[test]
    fn test_builders_override() {
        let config = ExperimentConfig::default()
            .with_seed(9)
            .with_test_size(0.2)
            .with_folds(3)
            .with_trees(11)
            .with_extractor_scope(ExtractorScope::Full);
        assert_eq!(config.split.random_state, Some(9));
        assert_eq!(config.random_forest.random_state, Some(9));
        assert_eq!(config.split.test_size, 0.2);
        assert_eq!(config.cross_validation.n_splits, 3);
        assert_eq!(config.random_forest.n_estimators, 11);
        assert_eq!(config.extractor_scope, ExtractorScope::Full);
    }

    #[test]
    fn test_build_models_and_splitter() {
        let config = ExperimentConfig::default().with_trees(7).with_folds(4);
        assert_eq!(config.naive_bayes.build().alpha(), 1.0);
        assert_eq!(config.random_forest.build().n_estimators(), 7);
        assert_eq!(config.cross_validation.build().n_splits(), 4);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[random_forest]\nn_estimators = 3").unwrap();
        let config = ExperimentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.random_forest.n_estimators, 3);

        let missing = ExperimentConfig::from_file("/nonexistent/spam.toml").unwrap_err();
        assert!(matches!(missing, SpamError::Io(_)));
    }
}
