//! Comment normalization: tokenize, keep alphabetic tokens, lowercase, drop
//! stop words, stem.
//!
//! # Examples
//!
//! ```
//! use comment_spam::text::{Preprocessor, TextResources};
//! use std::sync::Arc;
//!
//! let pre = Preprocessor::new(Arc::new(TextResources::english()));
//! let doc = pre.normalize("Claim your FREE prize now!!! http://x.co");
//! assert_eq!(doc.terms(), &["claim", "free", "prize", "http", "x", "co"]);
//! assert_eq!(doc.to_string(), "claim free prize http x co");
//! ```

use super::stem::{PorterStemmer, Stemmer};
use super::stopwords::StopWordsFilter;
use super::tokenize::WordTokenizer;
use super::Tokenizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Immutable language resources shared by every [`Preprocessor`].
///
/// Built once per process and handed around behind an `Arc`.
pub struct TextResources {
    tokenizer: Box<dyn Tokenizer>,
    stop_words: StopWordsFilter,
    stemmer: Box<dyn Stemmer>,
}

impl TextResources {
    /// Word tokenizer, NLTK English stop words and the Porter stemmer.
    #[must_use]
    pub fn english() -> Self {
        Self::new(
            Box::new(WordTokenizer::new()),
            StopWordsFilter::english(),
            Box::new(PorterStemmer::new()),
        )
    }

    /// Assemble resources from explicit parts.
    #[must_use]
    pub fn new(
        tokenizer: Box<dyn Tokenizer>,
        stop_words: StopWordsFilter,
        stemmer: Box<dyn Stemmer>,
    ) -> Self {
        Self {
            tokenizer,
            stop_words,
            stemmer,
        }
    }

    /// The stop word filter.
    #[must_use]
    pub fn stop_words(&self) -> &StopWordsFilter {
        &self.stop_words
    }

    /// The stemmer.
    #[must_use]
    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }
}

impl fmt::Debug for TextResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextResources")
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

/// Ordered sequence of lowercase alphabetic stems.
///
/// May be empty. Displays as the stems joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedDocument(Vec<String>);

impl NormalizedDocument {
    /// Wraps already-normalized terms.
    #[must_use]
    pub fn from_terms(terms: Vec<String>) -> Self {
        Self(terms)
    }

    /// The stems, in text order (duplicates preserved).
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.0
    }

    /// Number of stems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no stem survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Turns raw comment text into a [`NormalizedDocument`].
///
/// Pure and deterministic; never fails.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    resources: Arc<TextResources>,
}

impl Preprocessor {
    /// Create a preprocessor over shared resources.
    #[must_use]
    pub fn new(resources: Arc<TextResources>) -> Self {
        Self { resources }
    }

    /// Shared resources backing this preprocessor.
    #[must_use]
    pub fn resources(&self) -> &Arc<TextResources> {
        &self.resources
    }

    /// Normalize one comment.
    #[must_use]
    pub fn normalize(&self, text: &str) -> NormalizedDocument {
        let res = &self.resources;
        let terms = res
            .tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|token| is_alphabetic_token(token))
            .map(|token| token.to_lowercase())
            .filter(|token| !res.stop_words.is_stop_word(token))
            .map(|token| res.stemmer.stem(&token))
            .collect();
        NormalizedDocument(terms)
    }

    /// Normalize a batch, preserving order.
    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<NormalizedDocument> {
        texts.iter().map(|t| self.normalize(t.as_ref())).collect()
    }
}

fn is_alphabetic_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn preprocessor() -> Preprocessor {
        Preprocessor::new(Arc::new(TextResources::english()))
    }

    #[test]
    fn test_normalize_reference_comments() {
        let pre = preprocessor();
        assert_eq!(pre.normalize("free money now").terms(), &["free", "money"]);
        assert_eq!(pre.normalize("great song").terms(), &["great", "song"]);
        assert_eq!(
            pre.normalize("win prize click").terms(),
            &["win", "prize", "click"]
        );
        assert_eq!(pre.normalize("I love this video").terms(), &["love", "video"]);
        assert_eq!(
            pre.normalize("claim your free prize now").terms(),
            &["claim", "free", "prize"]
        );
    }

    #[test]
    fn test_normalize_drops_numbers_and_mixed_tokens() {
        let pre = preprocessor();
        let doc = pre.normalize("Top 10 songs of 2015 mp3 downloads");
        assert_eq!(doc.terms(), &["top", "song", "download"]);
    }

    #[test]
    fn test_normalize_contractions_disappear() {
        let pre = preprocessor();
        assert_eq!(pre.normalize("Don't miss it, it's AMAZING").terms(), &["miss", "amaz"]);
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        let pre = preprocessor();
        assert!(pre.normalize("").is_empty());
        assert!(pre.normalize("!!! ??? ...").is_empty());
        assert!(pre.normalize("the and of").is_empty());
    }

    #[test]
    fn test_stop_words_never_reach_stemmer() {
        let pre = preprocessor();
        let doc = pre.normalize("THE Video WAS Here Before Them");
        assert_eq!(doc.terms(), &["video"]);
    }

    #[test]
    fn test_display_joins_with_spaces() {
        let doc = NormalizedDocument::from_terms(vec!["free".into(), "money".into()]);
        assert_eq!(doc.to_string(), "free money");
        assert_eq!(NormalizedDocument::default().to_string(), "");
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let pre = preprocessor();
        let docs = pre.normalize_all(&["great song", "", "free money"]);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].to_string(), "great song");
        assert!(docs[1].is_empty());
        assert_eq!(docs[2].to_string(), "free money");
    }

    #[test]
    fn test_custom_resources() {
        let resources = TextResources::new(
            Box::new(crate::text::tokenize::WhitespaceTokenizer::new()),
            StopWordsFilter::new(["spam"]),
            Box::new(PorterStemmer::new()),
        );
        let pre = Preprocessor::new(Arc::new(resources));
        // whitespace tokens keep punctuation and fail the alphabetic filter
        assert_eq!(pre.normalize("spam eggs, ham").terms(), &["ham"]);
    }

    proptest! {
        #[test]
        fn prop_terms_are_lowercase_alphabetic(text in "[a-zA-Z0-9 ,.!?'’éÉ♥]{0,80}") {
            let pre = preprocessor();
            let doc = pre.normalize(&text);
            for term in doc.terms() {
                prop_assert!(!term.is_empty());
                prop_assert!(term.chars().all(char::is_alphabetic));
                prop_assert_eq!(term, &term.to_lowercase());
            }
        }

        #[test]
        fn prop_normalize_is_deterministic(text in "[a-zA-Z ,.!']{0,60}") {
            let pre = preprocessor();
            prop_assert_eq!(pre.normalize(&text), pre.normalize(&text));
        }
    }
}
