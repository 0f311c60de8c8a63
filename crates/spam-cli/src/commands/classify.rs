//! `classify`: train on a corpus, then label ad-hoc comments.

use super::run::{load_config, Overrides};
use crate::error::Result;
use crate::output;
use clap::ValueEnum;
use comment_spam::data::CommentLoader;
use comment_spam::pipeline::{ModelKind, Prediction, SpamPipeline};
use comment_spam::text::TextResources;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Which trained model labels the comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModelChoice {
    /// Multinomial Naive Bayes
    Nb,
    /// Random forest
    Rf,
    /// Both, Naive Bayes first
    Both,
}

impl ModelChoice {
    fn kinds(self) -> &'static [ModelKind] {
        match self {
            ModelChoice::Nb => &[ModelKind::NaiveBayes],
            ModelChoice::Rf => &[ModelKind::RandomForest],
            ModelChoice::Both => &[ModelKind::NaiveBayes, ModelKind::RandomForest],
        }
    }
}

#[derive(Debug, Serialize)]
struct ModelPredictions {
    model: ModelKind,
    predictions: Vec<Prediction>,
}

pub(crate) fn run(
    paths: &[PathBuf],
    texts: &[String],
    model: ModelChoice,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path, &Overrides::default())?;
    let corpus = CommentLoader::new().load_many(paths)?;
    info!(comments = corpus.len(), "training on the whole corpus");

    let fitted = SpamPipeline::new(Arc::new(TextResources::english())).fit_extractor(&corpus)?;
    let mut results = Vec::new();
    for &kind in model.kinds() {
        let predictions = match kind {
            ModelKind::NaiveBayes => fitted
                .train(config.naive_bayes.build(), &corpus)?
                .predict_batch(texts)?,
            ModelKind::RandomForest => fitted
                .train(config.random_forest.build(), &corpus)?
                .predict_batch(texts)?,
        };
        results.push(ModelPredictions {
            model: kind,
            predictions,
        });
    }

    if json {
        return output::json(&results);
    }
    for result in &results {
        output::section(&result.model.to_string());
        for prediction in &result.predictions {
            output::kv(&output::label(prediction.label), &prediction.raw);
        }
    }
    Ok(())
}
