//! Inference pipeline: preprocessing, TF-IDF features and a trained model.
//!
//! [`SpamPipeline`] tracks its progress in the type system. Only a
//! `SpamPipeline<ModelTrained<M>>` can classify text, and the extractor is
//! frozen before any model sees a feature row:
//!
//! ```text
//! Unfit --fit_extractor--> ExtractorFit --train--> ModelTrained<M>
//! ```
//!
//! # Examples
//!
//! ```
//! use comment_spam::data::{Corpus, Label};
//! use comment_spam::pipeline::SpamPipeline;
//! use comment_spam::prelude::*;
//! use comment_spam::text::TextResources;
//! use std::sync::Arc;
//!
//! let corpus = Corpus::from_pairs([
//!     ("free money now", 1),
//!     ("great song", 0),
//!     ("win prize click", 1),
//!     ("I love this video", 0),
//! ])
//! .unwrap();
//!
//! let pipeline = SpamPipeline::new(Arc::new(TextResources::english()))
//!     .fit_extractor(&corpus)
//!     .unwrap()
//!     .train(MultinomialNB::new(), &corpus)
//!     .unwrap();
//! let prediction = pipeline.predict("claim your free prize now").unwrap();
//! assert_eq!(prediction.label, Label::Spam);
//! ```

mod experiment;
mod samples;

pub use experiment::{
    cross_validate_comments, Experiment, ExperimentReport, ModelKind, ModelReport,
};
pub use samples::SAMPLE_COMMENTS;

use crate::data::{Corpus, Label};
use crate::error::{Result, SpamError};
use crate::primitives::SparseVector;
use crate::text::vectorize::TfidfVectorizer;
use crate::text::{NormalizedDocument, Preprocessor, TextResources};
use crate::traits::Classifier;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info_span};

/// One classified comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Text as given
    pub raw: String,
    /// Stems the model saw
    pub normalized: NormalizedDocument,
    /// Predicted label
    pub label: Label,
}

/// Runtime view of a pipeline's stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Nothing fitted
    Unfit,
    /// Vocabulary and IDF frozen, no model
    ExtractorFit,
    /// Ready to classify
    ModelTrained,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineState::Unfit => "unfit",
            PipelineState::ExtractorFit => "extractor-fit",
            PipelineState::ModelTrained => "model-trained",
        })
    }
}

/// Marker: no component fitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unfit;

/// Marker: extractor fitted.
#[derive(Debug, Clone)]
pub struct ExtractorFit {
    vectorizer: Arc<TfidfVectorizer>,
}

/// Stage holding a fitted extractor and a trained model.
#[derive(Debug, Clone)]
pub struct ModelTrained<M> {
    vectorizer: Arc<TfidfVectorizer>,
    model: M,
}

/// Stage markers of a [`SpamPipeline`].
pub trait PipelineStage {
    /// The runtime state this stage corresponds to.
    const STATE: PipelineState;
}

impl PipelineStage for Unfit {
    const STATE: PipelineState = PipelineState::Unfit;
}

impl PipelineStage for ExtractorFit {
    const STATE: PipelineState = PipelineState::ExtractorFit;
}

impl<M> PipelineStage for ModelTrained<M> {
    const STATE: PipelineState = PipelineState::ModelTrained;
}

/// Preprocessor plus whatever has been fitted so far.
#[derive(Debug, Clone)]
pub struct SpamPipeline<S> {
    preprocessor: Preprocessor,
    stage: S,
}

impl<S: PipelineStage> SpamPipeline<S> {
    /// Current stage.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        S::STATE
    }

    /// The preprocessor shared by every stage.
    #[must_use]
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }
}

impl SpamPipeline<Unfit> {
    /// Fresh pipeline over shared language resources.
    #[must_use]
    pub fn new(resources: Arc<TextResources>) -> Self {
        Self {
            preprocessor: Preprocessor::new(resources),
            stage: Unfit,
        }
    }

    /// Learns the vocabulary and IDF weights from every comment in `corpus`.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` or `EmptyVocabulary` from the vectorizer.
    pub fn fit_extractor(self, corpus: &Corpus) -> Result<SpamPipeline<ExtractorFit>> {
        self.fit_extractor_on_texts(&corpus.texts())
    }

    /// Learns the vocabulary and IDF weights from raw texts.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` or `EmptyVocabulary` from the vectorizer.
    pub fn fit_extractor_on_texts<T: AsRef<str>>(
        self,
        texts: &[T],
    ) -> Result<SpamPipeline<ExtractorFit>> {
        let _span = info_span!("fit_extractor", documents = texts.len()).entered();
        let docs = self.preprocessor.normalize_all(texts);
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&docs)?;
        Ok(SpamPipeline {
            preprocessor: self.preprocessor,
            stage: ExtractorFit {
                vectorizer: Arc::new(vectorizer),
            },
        })
    }
}

impl SpamPipeline<ExtractorFit> {
    /// The frozen vectorizer.
    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.stage.vectorizer
    }

    /// Vocabulary size.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.stage.vectorizer.n_features()
    }

    /// Feature rows for raw texts, in order.
    ///
    /// # Errors
    ///
    /// Propagates vectorizer errors.
    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> Result<Vec<SparseVector>> {
        let docs = self.preprocessor.normalize_all(texts);
        self.stage.vectorizer.transform_batch(&docs)
    }

    /// Fits `model` on the corpus and moves to the trained stage.
    ///
    /// The extractor is shared, so one `ExtractorFit` pipeline can train
    /// several models.
    ///
    /// # Errors
    ///
    /// Whatever `model.fit` reports (e.g. `SingleClass`, `AlreadyFitted`).
    pub fn train<M: Classifier>(
        &self,
        model: M,
        corpus: &Corpus,
    ) -> Result<SpamPipeline<ModelTrained<M>>> {
        let x = self.transform(&corpus.texts())?;
        self.train_on_features(model, &x, &corpus.labels())
    }

    /// Fits `model` on rows already produced by [`transform`](Self::transform).
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if a row's width differs from the vocabulary,
    /// otherwise whatever `model.fit` reports.
    pub fn train_on_features<M: Classifier>(
        &self,
        mut model: M,
        x: &[SparseVector],
        y: &[usize],
    ) -> Result<SpamPipeline<ModelTrained<M>>> {
        let n_features = self.n_features();
        if let Some(row) = x.iter().find(|row| row.dim() != n_features) {
            return Err(SpamError::dimension_mismatch(
                "feature width",
                n_features,
                row.dim(),
            ));
        }
        model.fit(x, y)?;
        debug!(samples = x.len(), n_features, "trained pipeline model");
        Ok(SpamPipeline {
            preprocessor: self.preprocessor.clone(),
            stage: ModelTrained {
                vectorizer: Arc::clone(&self.stage.vectorizer),
                model,
            },
        })
    }
}

impl<M: Classifier> SpamPipeline<ModelTrained<M>> {
    /// The trained model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.stage.model
    }

    /// The frozen vectorizer.
    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.stage.vectorizer
    }

    /// Classifies one comment.
    ///
    /// # Errors
    ///
    /// Propagates vectorizer and model errors.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let mut batch = self.predict_batch(&[text])?;
        batch
            .pop()
            .ok_or_else(|| SpamError::from("empty prediction batch"))
    }

    /// Classifies a batch, preserving order.
    ///
    /// # Errors
    ///
    /// Propagates vectorizer and model errors.
    pub fn predict_batch<T: AsRef<str>>(&self, texts: &[T]) -> Result<Vec<Prediction>> {
        predict_batch(
            texts,
            &self.preprocessor,
            &self.stage.vectorizer,
            &self.stage.model,
        )
    }
}

/// Normalizes, vectorizes and classifies `raw_texts` without refitting
/// anything. Output order matches input order.
///
/// # Errors
///
/// - `NotFitted` if the extractor or the model is unfitted
/// - `InvalidLabel` if the model emits a class other than 0 or 1
pub fn predict_batch<T, M>(
    raw_texts: &[T],
    preprocessor: &Preprocessor,
    extractor: &TfidfVectorizer,
    model: &M,
) -> Result<Vec<Prediction>>
where
    T: AsRef<str>,
    M: Classifier + ?Sized,
{
    let docs = preprocessor.normalize_all(raw_texts);
    let x = extractor.transform_batch(&docs)?;
    let classes = model.predict(&x)?;

    raw_texts
        .iter()
        .zip(docs)
        .zip(classes)
        .map(|((raw, normalized), class)| {
            let label = Label::from_class(class).ok_or(SpamError::InvalidLabel { class })?;
            Ok(Prediction {
                raw: raw.as_ref().to_string(),
                normalized,
                label,
            })
        })
        .collect()
}
