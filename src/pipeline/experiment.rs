//! End-to-end batch experiment: split, fit, cross-validate, evaluate and
//! classify a sample batch with both models.
//!
//! With the default [`ExtractorScope::Training`] every cross-validation fold
//! learns its own vocabulary from its training rows. With
//! [`ExtractorScope::Full`] one extractor fit on the whole corpus feeds every
//! fold.

use super::{ExtractorFit, Prediction, SpamPipeline, SAMPLE_COMMENTS};
use crate::config::{ExperimentConfig, ExtractorScope};
use crate::data::{Corpus, Label};
use crate::error::{Result, SpamError};
use crate::metrics::{evaluate, Evaluation};
use crate::model_selection::{
    cross_validate, take_indices, train_test_split, CrossValidationResult, CrossValidator,
};
use crate::primitives::SparseVector;
use crate::text::vectorize::TfidfVectorizer;
use crate::text::{Preprocessor, TextResources};
use crate::traits::Classifier;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span};

/// The two model families compared by an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Multinomial Naive Bayes
    NaiveBayes,
    /// Random forest
    RandomForest,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModelKind::NaiveBayes => "Naive Bayes",
            ModelKind::RandomForest => "RandomForest",
        })
    }
}

/// Outcome for one model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    /// Which model
    pub model: ModelKind,
    /// Fold accuracies on the training partition
    pub cross_validation: CrossValidationResult,
    /// Held-out confusion matrix and scores
    pub evaluation: Evaluation,
    /// Labels for the sample batch
    pub sample_predictions: Vec<Prediction>,
}

/// Everything an experiment run produces.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    /// Comments per label in the input corpus
    pub label_distribution: BTreeMap<Label, usize>,
    /// Training partition size
    pub n_train: usize,
    /// Test partition size
    pub n_test: usize,
    /// Documents the vocabulary was learned from
    pub extractor_scope: ExtractorScope,
    /// `(documents fitted, vocabulary size)`
    pub feature_shape: (usize, usize),
    /// Naive Bayes first, then random forest
    pub models: Vec<ModelReport>,
}

impl ExperimentReport {
    /// Report for one model, if it ran.
    #[must_use]
    pub fn model(&self, kind: ModelKind) -> Option<&ModelReport> {
        self.models.iter().find(|m| m.model == kind)
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distribution: Vec<String> = self
            .label_distribution
            .iter()
            .map(|(label, count)| format!("{label}: {count}"))
            .collect();
        writeln!(f, "Label Distribution: {}", distribution.join(", "))?;
        writeln!(f, "Train/Test Split: {} / {}", self.n_train, self.n_test)?;
        writeln!(
            f,
            "Initial Features - Shape: ({}, {})",
            self.feature_shape.0, self.feature_shape.1
        )?;

        for report in &self.models {
            writeln!(
                f,
                "{} Cross-Validation Mean Accuracy: {}",
                report.model,
                report.cross_validation.mean()
            )?;
        }
        for report in &self.models {
            let metrics = &report.evaluation.metrics;
            writeln!(f, "{} Confusion Matrix:", report.model)?;
            writeln!(f, "{}", report.evaluation.confusion)?;
            writeln!(f, "{} Accuracy: {}", report.model, metrics.accuracy)?;
            writeln!(f, "{} Precision: {}", report.model, metrics.precision)?;
            writeln!(f, "{} Recall: {}", report.model, metrics.recall)?;
            writeln!(f, "{} F1 Score: {}", report.model, metrics.f1)?;
        }
        for report in &self.models {
            writeln!(f, "Results for {}:", report.model)?;
            for prediction in &report.sample_predictions {
                writeln!(f, "Raw Comment: {}", prediction.raw)?;
                writeln!(f, "Preprocessed Comment: {}", prediction.normalized)?;
                writeln!(f, "Prediction: {}\n", prediction.label)?;
            }
        }
        Ok(())
    }
}

/// Train/test feature rows shared by both models.
struct SplitFeatures {
    x_train: Vec<SparseVector>,
    y_train: Vec<usize>,
    x_test: Vec<SparseVector>,
    y_test: Vec<usize>,
}

/// Configured batch run over a labeled corpus.
///
/// # Examples
///
/// ```
/// use comment_spam::config::ExperimentConfig;
/// use comment_spam::data::Corpus;
/// use comment_spam::pipeline::{Experiment, ModelKind};
/// use comment_spam::text::TextResources;
/// use std::sync::Arc;
///
/// let pairs: Vec<(String, usize)> = (0..12)
///     .flat_map(|i| {
///         [
///             (format!("win free money prize {i}"), 1),
///             (format!("lovely song great voice {i}"), 0),
///         ]
///     })
///     .collect();
/// let corpus = Corpus::from_pairs(pairs).unwrap();
///
/// let config = ExperimentConfig::default().with_trees(5).with_folds(3);
/// let report = Experiment::new(config, Arc::new(TextResources::english()))
///     .with_samples(["free money"])
///     .run(&corpus)
///     .unwrap();
/// assert_eq!(report.n_test, 6);
/// assert_eq!(report.models.len(), 2);
/// assert!(report.model(ModelKind::NaiveBayes).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
    resources: Arc<TextResources>,
    samples: Vec<String>,
}

impl Experiment {
    /// Experiment classifying [`SAMPLE_COMMENTS`] at the end.
    #[must_use]
    pub fn new(config: ExperimentConfig, resources: Arc<TextResources>) -> Self {
        Self {
            config,
            resources,
            samples: SAMPLE_COMMENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Replaces the sample batch.
    #[must_use]
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples = samples.into_iter().map(Into::into).collect();
        self
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Runs the experiment.
    ///
    /// # Errors
    ///
    /// - `NoData` for an empty corpus
    /// - `InvalidHyperparameter` for an invalid configuration or a split the
    ///   corpus cannot support
    /// - any extractor or model error (`EmptyVocabulary`, `SingleClass`, ...)
    pub fn run(&self, corpus: &Corpus) -> Result<ExperimentReport> {
        if corpus.is_empty() {
            return Err(SpamError::empty_input("experiment corpus is empty"));
        }
        self.config.validate()?;
        let _span = info_span!("experiment", comments = corpus.len()).entered();

        let label_distribution = corpus.label_distribution();
        info!(?label_distribution, "label distribution");

        let split = &self.config.split;
        let (train_idx, test_idx) =
            train_test_split(corpus.len(), split.test_size, split.random_state)?;
        let train = corpus.subset(&train_idx)?;
        let test = corpus.subset(&test_idx)?;

        let fit_texts = match self.config.extractor_scope {
            ExtractorScope::Training => train.texts(),
            ExtractorScope::Full => corpus.texts(),
        };
        let pipeline = SpamPipeline::new(Arc::clone(&self.resources))
            .fit_extractor_on_texts(&fit_texts)?;
        let feature_shape = (fit_texts.len(), pipeline.n_features());
        info!(
            scope = ?self.config.extractor_scope,
            documents = feature_shape.0,
            vocabulary = feature_shape.1,
            "fitted feature extractor"
        );

        let features = SplitFeatures {
            x_train: pipeline.transform(&train.texts())?,
            y_train: train.labels(),
            x_test: pipeline.transform(&test.texts())?,
            y_test: test.labels(),
        };
        let cv = self.config.cross_validation.build();

        let naive_bayes = self.run_model(
            ModelKind::NaiveBayes,
            || self.config.naive_bayes.build(),
            &pipeline,
            &train,
            &features,
            cv.as_ref(),
        )?;
        let random_forest = self.run_model(
            ModelKind::RandomForest,
            || self.config.random_forest.build(),
            &pipeline,
            &train,
            &features,
            cv.as_ref(),
        )?;

        Ok(ExperimentReport {
            label_distribution,
            n_train: train.len(),
            n_test: test.len(),
            extractor_scope: self.config.extractor_scope,
            feature_shape,
            models: vec![naive_bayes, random_forest],
        })
    }

    fn run_model<M, F>(
        &self,
        kind: ModelKind,
        factory: F,
        pipeline: &SpamPipeline<ExtractorFit>,
        train: &Corpus,
        features: &SplitFeatures,
        cv: &dyn CrossValidator,
    ) -> Result<ModelReport>
    where
        M: Classifier,
        F: Fn() -> M,
    {
        let _span = info_span!("model", model = %kind).entered();

        let cross_validation = match self.config.extractor_scope {
            ExtractorScope::Training => {
                cross_validate_comments(&factory, train, Arc::clone(&self.resources), cv)?
            }
            ExtractorScope::Full => {
                cross_validate(&factory, &features.x_train, &features.y_train, cv)?
            }
        };
        info!(
            mean_accuracy = cross_validation.mean(),
            std = cross_validation.std(),
            "cross-validation"
        );

        let trained = pipeline.train_on_features(factory(), &features.x_train, &features.y_train)?;
        let y_pred = trained.model().predict(&features.x_test)?;
        let evaluation = evaluate(&features.y_test, &y_pred)?;
        info!(
            accuracy = evaluation.metrics.accuracy,
            precision = evaluation.metrics.precision,
            recall = evaluation.metrics.recall,
            f1 = evaluation.metrics.f1,
            "held-out evaluation"
        );

        let sample_predictions = trained.predict_batch(&self.samples)?;
        Ok(ModelReport {
            model: kind,
            cross_validation,
            evaluation,
            sample_predictions,
        })
    }
}

/// k-fold accuracy with the vocabulary refit inside every training fold,
/// so no test-fold term reaches the extractor.
///
/// # Errors
///
/// - `NoData` for an empty corpus
/// - splitter, extractor and model errors of any fold
pub fn cross_validate_comments<M, F, C>(
    factory: F,
    corpus: &Corpus,
    resources: Arc<TextResources>,
    cv: &C,
) -> Result<CrossValidationResult>
where
    M: Classifier,
    F: Fn() -> M,
    C: CrossValidator + ?Sized,
{
    if corpus.is_empty() {
        return Err(SpamError::empty_input("cross-validation corpus is empty"));
    }
    let preprocessor = Preprocessor::new(resources);
    let docs = preprocessor.normalize_all(&corpus.texts());
    let labels = corpus.labels();

    let folds = cv.split(&labels)?;
    let mut scores = Vec::with_capacity(folds.len());
    for (fold, (train_idx, test_idx)) in folds.iter().enumerate() {
        let mut vectorizer = TfidfVectorizer::new();
        let x_train = vectorizer.fit_transform(&take_indices(&docs, train_idx))?;
        let x_test = vectorizer.transform_batch(&take_indices(&docs, test_idx))?;

        let mut model = factory();
        model.fit(&x_train, &take_indices(&labels, train_idx))?;
        let score = model.score(&x_test, &take_indices(&labels, test_idx))?;
        debug!(
            fold,
            vocabulary = vectorizer.n_features(),
            accuracy = score,
            "per-fold extractor cross-validation"
        );
        scores.push(score);
    }
    Ok(CrossValidationResult::from_scores(scores))
}
