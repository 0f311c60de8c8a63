//! Auxiliary per-comment signals.
//!
//! Cheap, independently callable heuristics (URL count, casing, sentiment,
//! keyword hits). They are reported alongside model predictions and are not
//! fed into the trained classifiers.
//!
//! # Examples
//!
//! ```
//! use comment_spam::text::sentiment::SentimentLexicon;
//! use comment_spam::text::signals::{Signal, SignalSet};
//! use std::sync::Arc;
//!
//! let signals = SignalSet::standard(Arc::new(SentimentLexicon::english()));
//! let row = signals.extract("Check my SECRET video http://x.co");
//! assert_eq!(row.get("url_count"), Some(&Signal::Count(1)));
//! assert_eq!(row.get("spam_keywords"), Some(&Signal::Flag(true)));
//! ```

use super::sentiment::{SentimentAnalyzer, SentimentLexicon};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, LazyLock};

static URL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+",
    )
    .expect("URL pattern is valid")
});

/// Phrases matched by [`SpamKeywords::default`].
pub const DEFAULT_SPAM_KEYWORDS: &[&str] =
    &["secret video", "celeb site", "free iphone", "special offer"];

/// Value produced by a [`SignalExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Signal {
    /// Non-negative count
    Count(usize),
    /// Real-valued score
    Scalar(f64),
    /// Boolean heuristic
    Flag(bool),
}

impl Signal {
    /// Numeric view for downstream feature use (`true` → 1.0).
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Signal::Count(n) => n as f64,
            Signal::Scalar(x) => x,
            Signal::Flag(b) => f64::from(u8::from(b)),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Count(n) => write!(f, "{n}"),
            Signal::Scalar(x) => write!(f, "{x:.4}"),
            Signal::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// A named heuristic computed from raw comment text.
pub trait SignalExtractor: Send + Sync {
    /// Stable identifier used in reports.
    fn name(&self) -> &'static str;

    /// Compute the signal for one comment.
    fn extract(&self, text: &str) -> Signal;
}

/// Number of `http://` / `https://` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlCount;

impl SignalExtractor for UrlCount {
    fn name(&self) -> &'static str {
        "url_count"
    }

    fn extract(&self, text: &str) -> Signal {
        Signal::Count(URL_REGEX.find_iter(text).count())
    }
}

/// Comment length in characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentLength;

impl SignalExtractor for CommentLength {
    fn name(&self) -> &'static str {
        "length"
    }

    fn extract(&self, text: &str) -> Signal {
        Signal::Count(text.chars().count())
    }
}

/// Number of uppercase characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercaseCount;

impl SignalExtractor for UppercaseCount {
    fn name(&self) -> &'static str {
        "uppercase_count"
    }

    fn extract(&self, text: &str) -> Signal {
        Signal::Count(text.chars().filter(|c| c.is_uppercase()).count())
    }
}

/// Compound sentiment polarity in `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct SentimentPolarity {
    analyzer: SentimentAnalyzer,
}

impl SentimentPolarity {
    /// Score with the given shared lexicon.
    #[must_use]
    pub fn new(lexicon: Arc<SentimentLexicon>) -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(lexicon),
        }
    }
}

impl SignalExtractor for SentimentPolarity {
    fn name(&self) -> &'static str {
        "sentiment"
    }

    fn extract(&self, text: &str) -> Signal {
        Signal::Scalar(self.analyzer.compound(text))
    }
}

/// True when the lowercased comment contains any configured phrase.
#[derive(Debug, Clone)]
pub struct SpamKeywords {
    keywords: Vec<String>,
}

impl SpamKeywords {
    /// Match a custom phrase list (case-insensitive).
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Configured phrases, lowercase.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for SpamKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_SPAM_KEYWORDS)
    }
}

impl SignalExtractor for SpamKeywords {
    fn name(&self) -> &'static str {
        "spam_keywords"
    }

    fn extract(&self, text: &str) -> Signal {
        let lower = text.to_lowercase();
        Signal::Flag(self.keywords.iter().any(|k| lower.contains(k.as_str())))
    }
}

/// Named signal values for one comment, in extractor order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow(Vec<(&'static str, Signal)>);

impl SignalRow {
    /// Signal by extractor name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Signal> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    /// `(name, signal)` pairs in extractor order.
    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Signal)> {
        self.0.iter()
    }

    /// Numeric vector in extractor order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.iter().map(|(_, s)| s.as_f64()).collect()
    }
}

/// Ordered collection of extractors.
#[derive(Default)]
pub struct SignalSet {
    extractors: Vec<Box<dyn SignalExtractor>>,
}

impl SignalSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL count, length, uppercase count, sentiment and keyword flag.
    #[must_use]
    pub fn standard(lexicon: Arc<SentimentLexicon>) -> Self {
        Self::new()
            .with(UrlCount)
            .with(CommentLength)
            .with(UppercaseCount)
            .with(SentimentPolarity::new(lexicon))
            .with(SpamKeywords::default())
    }

    /// Appends an extractor.
    #[must_use]
    pub fn with<E: SignalExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Extractor names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Runs every extractor on `text`.
    #[must_use]
    pub fn extract(&self, text: &str) -> SignalRow {
        SignalRow(
            self.extractors
                .iter()
                .map(|e| (e.name(), e.extract(text)))
                .collect(),
        )
    }
}

impl fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSet")
            .field("extractors", &self.names())
            .finish()
    }
}
