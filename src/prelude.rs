//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use comment_spam::prelude::*;
//! ```

pub use crate::classification::MultinomialNB;
pub use crate::config::ExperimentConfig;
pub use crate::data::{Comment, CommentLoader, Corpus, Label};
pub use crate::error::{Result, SpamError};
pub use crate::metrics::{evaluate, ConfusionMatrix, Evaluation, Metrics};
pub use crate::model_selection::{cross_validate, KFold, StratifiedKFold};
pub use crate::pipeline::{Experiment, Prediction, SpamPipeline};
pub use crate::primitives::{Matrix, SparseVector};
pub use crate::text::vectorize::TfidfVectorizer;
pub use crate::text::{NormalizedDocument, Preprocessor, TextResources};
pub use crate::traits::{Classifier, ProbabilisticClassifier};
pub use crate::tree::RandomForestClassifier;
