//! Probabilistic text classifiers.
//!
//! Includes Multinomial Naive Bayes over TF-IDF rows. Tree ensembles live
//! in [`crate::tree`].

mod naive_bayes;

pub use naive_bayes::MultinomialNB;
