//! Text processing for comment classification.
//!
//! - [`tokenize`]: word and whitespace tokenizers
//! - [`stopwords`]: NLTK English stop word filtering
//! - [`stem`]: Porter stemming
//! - [`preprocess`]: the normalization chain producing [`NormalizedDocument`]s
//! - [`vectorize`]: TF-IDF feature extraction
//! - [`sentiment`]: lexicon-based polarity scoring
//! - [`signals`]: auxiliary per-comment signals (URLs, casing, keywords)

pub mod preprocess;
pub mod sentiment;
pub mod signals;
pub mod stem;
pub mod stopwords;
pub mod tokenize;
pub mod vectorize;

pub use preprocess::{NormalizedDocument, Preprocessor, TextResources};

/// Splits raw text into tokens. Tokenization never fails; empty input gives
/// an empty token list.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text` in reading order.
    fn tokenize(&self, text: &str) -> Vec<String>;
}
