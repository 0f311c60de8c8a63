//! Comment spam: YouTube comment spam classification in pure Rust.
//!
//! Raw comments are normalized into Porter stems, turned into
//! L2-normalized TF-IDF rows and classified by Multinomial Naive Bayes or
//! a random forest. Cross-validation, held-out evaluation and a typestate
//! inference pipeline tie the pieces together.
//!
//! # Quick Start
//!
//! ```
//! use comment_spam::prelude::*;
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
//!
//! let prediction = pipeline.predict("claim your free prize now").unwrap();
//! assert_eq!(prediction.label, Label::Spam);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: sparse feature rows and a dense matrix
//! - [`text`]: tokenization, stop words, stemming, TF-IDF, auxiliary signals
//! - [`classification`]: Multinomial Naive Bayes
//! - [`tree`]: CART trees and the random forest
//! - [`model_selection`]: k-fold splitters, cross-validation, train/test split
//! - [`metrics`]: confusion matrix and accuracy/precision/recall/F1
//! - [`pipeline`]: typestate inference pipeline and the experiment runner
//! - [`data`]: labeled corpora and the CSV loader
//! - [`config`]: TOML experiment configuration

pub mod classification;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod prelude;
pub mod primitives;
pub mod text;
pub mod traits;
pub mod tree;

pub use error::{Result, SpamError};
pub use primitives::{Matrix, SparseVector};
pub use traits::{Classifier, ProbabilisticClassifier};
