//! End-to-end tests: CSV on disk to labeled predictions.

use comment_spam::config::{ExperimentConfig, ExtractorScope};
use comment_spam::data::{CommentLoader, Corpus, Label};
use comment_spam::pipeline::{Experiment, ModelKind, SpamPipeline};
use comment_spam::prelude::*;
use comment_spam::text::sentiment::SentimentLexicon;
use comment_spam::text::signals::{Signal, SignalSet};
use std::io::Write;
use std::sync::Arc;

fn reference_corpus() -> Corpus {
    Corpus::from_pairs([
        ("free money now", 1),
        ("great song", 0),
        ("win prize click", 1),
        ("I love this video", 0),
    ])
    .expect("valid labels")
}

fn write_corpus_csv(rows: &[(&str, usize)]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "COMMENT_ID,AUTHOR,DATE,CONTENT,CLASS").unwrap();
    for (i, (text, class)) in rows.iter().enumerate() {
        writeln!(file, "id{i},someone,2015-05-29,\"{text}\",{class}").unwrap();
    }
    file
}

#[test]
fn both_models_flag_prize_comment() {
    let corpus = reference_corpus();
    let fitted = SpamPipeline::new(Arc::new(TextResources::english()))
        .fit_extractor(&corpus)
        .unwrap();

    let nb = fitted.train(MultinomialNB::new(), &corpus).unwrap();
    let rf = fitted
        .train(RandomForestClassifier::new(100).with_random_state(42), &corpus)
        .unwrap();

    let text = "claim your free prize now";
    assert_eq!(nb.predict(text).unwrap().label, Label::Spam);
    assert_eq!(rf.predict(text).unwrap().label, Label::Spam);
}

#[test]
fn csv_to_experiment_report() {
    let mut rows = Vec::new();
    for _ in 0..6 {
        rows.push(("Subscribe to my channel for free gifts", 1));
        rows.push(("Visit my website, special offer today", 1));
        rows.push(("This song brings back memories", 0));
        rows.push(("Her voice is amazing", 0));
    }
    let file = write_corpus_csv(&rows);
    let corpus = CommentLoader::new().load(file.path()).unwrap();
    assert_eq!(corpus.len(), 24);

    let config = ExperimentConfig::default()
        .with_trees(15)
        .with_folds(3)
        .with_extractor_scope(ExtractorScope::Full);
    let report = Experiment::new(config, Arc::new(TextResources::english()))
        .with_samples(["free gifts on my channel", "amazing song"])
        .run(&corpus)
        .unwrap();

    assert_eq!(report.feature_shape.0, 24);
    let nb = report.model(ModelKind::NaiveBayes).unwrap();
    assert_eq!(nb.evaluation.confusion.total(), report.n_test);
    // templates repeat exactly, so held-out rows were all seen in training
    assert_eq!(nb.evaluation.metrics.accuracy, 1.0);
    assert_eq!(nb.sample_predictions[0].label, Label::Spam);
    assert_eq!(nb.sample_predictions[1].label, Label::Ham);
}

#[test]
fn loader_concatenates_files_before_experiment() {
    let a = write_corpus_csv(&[("win cash now", 1), ("nice tune", 0)]);
    let b = write_corpus_csv(&[("free coupons here", 1)]);
    let corpus = CommentLoader::new().load_many(&[a.path(), b.path()]).unwrap();
    assert_eq!(corpus.labels(), vec![1, 0, 1]);
    assert_eq!(corpus.label_distribution()[&Label::Spam], 2);
}

#[test]
fn signals_run_beside_the_models() {
    let signals = SignalSet::standard(Arc::new(SentimentLexicon::english()));
    let row = signals.extract("FREE iPhone at https://spam.example now");
    assert_eq!(row.get("url_count"), Some(&Signal::Count(1)));
    assert_eq!(row.get("spam_keywords"), Some(&Signal::Flag(true)));
    assert_eq!(row.get("length").map(Signal::as_f64), Some(39.0));
}
