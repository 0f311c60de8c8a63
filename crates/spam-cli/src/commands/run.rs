//! `run`: the full split / cross-validate / evaluate experiment.

use crate::error::Result;
use crate::output;
use comment_spam::config::{ExperimentConfig, ExtractorScope};
use comment_spam::data::CommentLoader;
use comment_spam::pipeline::Experiment;
use comment_spam::text::TextResources;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Flag overrides applied on top of the configuration file.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) folds: Option<usize>,
    pub(crate) trees: Option<usize>,
    pub(crate) test_size: Option<f64>,
    pub(crate) full_corpus_vocabulary: bool,
}

/// Loads the configuration file (or defaults) and applies flag overrides.
pub(crate) fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<ExperimentConfig> {
    let mut config = match path {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = overrides.seed {
        config = config.with_seed(seed);
    }
    if let Some(folds) = overrides.folds {
        config = config.with_folds(folds);
    }
    if let Some(trees) = overrides.trees {
        config = config.with_trees(trees);
    }
    if let Some(test_size) = overrides.test_size {
        config = config.with_test_size(test_size);
    }
    if overrides.full_corpus_vocabulary {
        config = config.with_extractor_scope(ExtractorScope::Full);
    }
    config.validate()?;
    Ok(config)
}

pub(crate) fn run(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    overrides: &Overrides,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let corpus = CommentLoader::new().load_many(paths)?;
    let report = Experiment::new(config, Arc::new(TextResources::english())).run(&corpus)?;

    if json {
        return output::json(&report);
    }
    print!("{report}");
    Ok(())
}
