//! Error types for spam classification.
//!
//! Every fallible operation in the crate returns [`Result`], carrying a
//! [`SpamError`] with enough context for a caller (or the CLI) to report the
//! failure without inspecting internals.

use thiserror::Error;

/// Main error type for the classification toolkit.
///
/// # Examples
///
/// ```
/// use comment_spam::error::SpamError;
///
/// let err = SpamError::NotFitted {
///     component: "TfidfVectorizer",
/// };
/// assert!(err.to_string().contains("not fitted"));
/// ```
#[derive(Debug, Error)]
pub enum SpamError {
    /// The loader produced no rows, or an empty corpus was handed to a stage
    /// that needs at least one comment.
    #[error("no data: {context}")]
    NoData {
        /// Where the data was expected
        context: String,
    },

    /// The feature extractor was fit on zero documents.
    #[error("cannot fit vocabulary on an empty corpus")]
    EmptyCorpus,

    /// Every document was empty after normalization.
    #[error("vocabulary is empty: no document contains a usable term")]
    EmptyVocabulary,

    /// Training labels contain a single class.
    #[error("{model} needs at least two classes, got only class {class}")]
    SingleClass {
        /// Model being trained
        model: &'static str,
        /// The only label present
        class: usize,
    },

    /// A transform or prediction was requested before `fit`.
    #[error("{component} is not fitted")]
    NotFitted {
        /// Component that must be fitted first
        component: &'static str,
    },

    /// `fit` was called on a component that is already frozen.
    #[error("{component} is already fitted and cannot be refit")]
    AlreadyFitted {
        /// Component that was refit
        component: &'static str,
    },

    /// Shapes or lengths don't agree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter or configuration value.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A class index outside the binary label set.
    #[error("invalid label {class}: expected 0 (ham) or 1 (spam)")]
    InvalidLabel {
        /// The offending class index
        class: usize,
    },

    /// A model received a feature value it cannot accept.
    #[error("{model} requires non-negative feature values, got {value}")]
    NegativeFeature {
        /// Model being trained or queried
        model: &'static str,
        /// The offending value
        value: f64,
    },

    /// A required CSV column is absent.
    #[error("missing required column '{field}' in {source_name}")]
    MissingField {
        /// Column name
        field: String,
        /// File or stream the column was expected in
        source_name: String,
    },

    /// Malformed CSV row or label.
    #[error("CSV parse error at line {line}: {message}")]
    CsvParse {
        /// 1-based line number (0 when unknown)
        line: u64,
        /// Error description
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error (file not found, permission denied, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with string message.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for SpamError {
    fn from(msg: &str) -> Self {
        SpamError::Other(msg.to_string())
    }
}

impl From<String> for SpamError {
    fn from(msg: String) -> Self {
        SpamError::Other(msg)
    }
}

impl From<csv::Error> for SpamError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        SpamError::CsvParse {
            line,
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SpamError {
    fn from(err: toml::de::Error) -> Self {
        SpamError::Config(err.to_string())
    }
}

impl SpamError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::NoData {
            context: context.to_string(),
        }
    }

    /// Create a not-fitted error for `component`
    #[must_use]
    pub fn not_fitted(component: &'static str) -> Self {
        Self::NotFitted { component }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// True when the error means "the component must be fitted first".
    #[must_use]
    pub fn is_not_fitted(&self) -> bool {
        matches!(self, Self::NotFitted { .. })
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for SpamError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SpamError>;
