//! Error types for spam-cli

use comment_spam::SpamError;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// The corpus files held no usable rows
    #[error("no data: {0}")]
    NoData(String),

    /// Bad configuration file or flag value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Corpus file could not be parsed
    #[error("invalid corpus: {0}")]
    Corpus(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other library failure
    #[error("{0}")]
    Classifier(SpamError),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::Classifier(_) | Self::Json(_) => ExitCode::from(1),
            Self::NoData(_) => ExitCode::from(3),
            Self::Config(_) => ExitCode::from(4),
            Self::Corpus(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
        }
    }
}

impl From<SpamError> for CliError {
    fn from(e: SpamError) -> Self {
        match e {
            SpamError::NoData { context } => Self::NoData(context),
            SpamError::Config(_) | SpamError::InvalidHyperparameter { .. } => {
                Self::Config(e.to_string())
            }
            SpamError::MissingField { .. }
            | SpamError::CsvParse { .. }
            | SpamError::InvalidLabel { .. } => {
                Self::Corpus(e.to_string())
            }
            SpamError::Io(io) => Self::Io(io),
            other => Self::Classifier(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_is_reported_explicitly() {
        let err = CliError::from(SpamError::empty_input("corpus.csv has no data rows"));
        assert!(matches!(err, CliError::NoData(_)));
        assert_eq!(err.to_string(), "no data: corpus.csv has no data rows");
    }

    #[test]
    fn test_mapping_groups_config_and_corpus_errors() {
        let err = CliError::from(SpamError::invalid_hyperparameter("test_size", 2.0, "(0, 1)"));
        assert!(matches!(err, CliError::Config(_)));

        let err = CliError::from(SpamError::MissingField {
            field: "CLASS".into(),
            source_name: "a.csv".into(),
        });
        assert!(matches!(err, CliError::Corpus(_)));

        let err = CliError::from(SpamError::InvalidLabel { class: 7 });
        assert!(matches!(err, CliError::Corpus(_)));

        let err = CliError::from(SpamError::EmptyVocabulary);
        assert!(matches!(err, CliError::Classifier(_)));
    }

    #[test]
    fn test_json_errors_convert() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CliError::from(json_err);
        assert!(matches!(err, CliError::Json(_)));
        assert!(err.to_string().starts_with("JSON output failed"));
        assert_eq!(err.exit_code(), ExitCode::from(1));
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = [
            CliError::NoData(String::new()),
            CliError::Config(String::new()),
            CliError::Corpus(String::new()),
            CliError::Classifier(SpamError::EmptyCorpus),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), ExitCode::SUCCESS);
        }
    }
}
