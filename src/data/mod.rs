//! Labeled comment corpora and the CSV loader that produces them.
//!
//! A corpus file is a headed CSV with (at least) a `CONTENT` text column and
//! a `CLASS` column holding `0` (ham) or `1` (spam). Files that are not valid
//! UTF-8 are decoded as ISO-8859-1 (read through its windows-1252 superset).

use crate::error::{Result, SpamError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Binary comment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate comment (class 0)
    Ham,
    /// Spam comment (class 1)
    Spam,
}

impl Label {
    /// Maps a numeric class to a label.
    #[must_use]
    pub fn from_class(class: usize) -> Option<Self> {
        match class {
            0 => Some(Label::Ham),
            1 => Some(Label::Spam),
            _ => None,
        }
    }

    /// Numeric class used by the models.
    #[must_use]
    pub fn as_class(self) -> usize {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Label::Ham => "Non-Spam",
            Label::Spam => "Spam",
        })
    }
}

/// One raw comment with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Raw text as read from the source
    pub text: String,
    /// Ground-truth label
    pub label: Label,
}

impl Comment {
    /// Creates a labeled comment.
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Ordered collection of labeled comments.
///
/// # Examples
///
/// ```
/// use comment_spam::data::{Corpus, Label};
///
/// let corpus = Corpus::from_pairs([("free money now", 1), ("great song", 0)]).unwrap();
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.labels(), vec![1, 0]);
/// assert_eq!(corpus.label_distribution()[&Label::Spam], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    comments: Vec<Comment>,
}

impl Corpus {
    /// Wraps comments, keeping their order.
    #[must_use]
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }

    /// Builds a corpus from `(text, class)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLabel` for a class other than 0 or 1.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let comments = pairs
            .into_iter()
            .map(|(text, class)| {
                let label = Label::from_class(class).ok_or(SpamError::InvalidLabel { class })?;
                Ok(Comment::new(text, label))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { comments })
    }

    /// Number of comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// True when the corpus holds no comment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Comments in corpus order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Iterates over comments in order.
    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    /// Raw texts in corpus order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.comments.iter().map(|c| c.text.as_str()).collect()
    }

    /// Numeric labels in corpus order.
    #[must_use]
    pub fn labels(&self) -> Vec<usize> {
        self.comments.iter().map(|c| c.label.as_class()).collect()
    }

    /// Count of comments per label.
    #[must_use]
    pub fn label_distribution(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for comment in &self.comments {
            *counts.entry(comment.label).or_insert(0) += 1;
        }
        counts
    }

    /// New corpus holding the comments at `indices`, in that order.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if an index is out of range.
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        let comments = indices
            .iter()
            .map(|&i| {
                self.comments
                    .get(i)
                    .cloned()
                    .ok_or_else(|| SpamError::dimension_mismatch("corpus length", self.len(), i))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { comments })
    }

    /// Appends every comment of `other`.
    pub fn extend(&mut self, other: Corpus) {
        self.comments.extend(other.comments);
    }
}

impl FromIterator<Comment> for Corpus {
    fn from_iter<T: IntoIterator<Item = Comment>>(iter: T) -> Self {
        Self {
            comments: iter.into_iter().collect(),
        }
    }
}

/// Reads labeled comments from headed CSV files.
///
/// # Examples
///
/// ```
/// use comment_spam::data::CommentLoader;
///
/// let csv = "COMMENT_ID,CONTENT,CLASS\n1,Check out my channel,1\n2,Nice song,0\n";
/// let corpus = CommentLoader::new().parse_bytes(csv.as_bytes(), "inline").unwrap();
/// assert_eq!(corpus.labels(), vec![1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct CommentLoader {
    content_column: String,
    class_column: String,
}

impl Default for CommentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentLoader {
    /// Loader for the `CONTENT` / `CLASS` column layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content_column: "CONTENT".to_string(),
            class_column: "CLASS".to_string(),
        }
    }

    /// Overrides the text column name.
    #[must_use]
    pub fn with_content_column(mut self, name: impl Into<String>) -> Self {
        self.content_column = name.into();
        self
    }

    /// Overrides the label column name.
    #[must_use]
    pub fn with_class_column(mut self, name: impl Into<String>) -> Self {
        self.class_column = name.into();
        self
    }

    /// Loads one CSV file.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `MissingField` if a required column is absent
    /// - `CsvParse` for malformed rows or a class other than 0/1
    /// - `NoData` if the file has no data row
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Corpus> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let corpus = self.parse_bytes(&bytes, &path.display().to_string())?;
        info!(path = %path.display(), comments = corpus.len(), "loaded corpus file");
        Ok(corpus)
    }

    /// Loads several files and concatenates them in the given order.
    ///
    /// # Errors
    ///
    /// Fails on the first file that fails to load; `NoData` when `paths` is
    /// empty.
    pub fn load_many<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Corpus> {
        if paths.is_empty() {
            return Err(SpamError::empty_input("no corpus file given"));
        }
        let mut corpus = Corpus::default();
        for path in paths {
            corpus.extend(self.load(path)?);
        }
        Ok(corpus)
    }

    /// Parses CSV bytes; `source_name` only labels errors and logs.
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load), minus `Io`.
    pub fn parse_bytes(&self, bytes: &[u8], source_name: &str) -> Result<Corpus> {
        let text = decode(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| SpamError::MissingField {
                    field: name.to_string(),
                    source_name: source_name.to_string(),
                })
        };
        let content_idx = column(&self.content_column)?;
        let class_idx = column(&self.class_column)?;

        let mut comments = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            let raw_class = record.get(class_idx).map(str::trim).unwrap_or_default();
            let label = raw_class
                .parse::<usize>()
                .ok()
                .and_then(Label::from_class)
                .ok_or_else(|| SpamError::CsvParse {
                    line,
                    message: format!(
                        "{} must be 0 or 1, got '{raw_class}'",
                        self.class_column
                    ),
                })?;
            let content = record.get(content_idx).unwrap_or_default();
            comments.push(Comment::new(content, label));
        }

        if comments.is_empty() {
            return Err(SpamError::empty_input(&format!(
                "{source_name} has no data rows"
            )));
        }
        Ok(Corpus::new(comments))
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// UTF-8 when valid, ISO-8859-1 otherwise.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(err) => {
            debug!(
                valid_up_to = err.valid_up_to(),
                "input is not UTF-8, decoding as ISO-8859-1"
            );
            encoding_rs::WINDOWS_1252
                .decode_without_bom_handling(bytes)
                .0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write temp file");
        file
    }

    const SAMPLE: &str = "COMMENT_ID,AUTHOR,DATE,CONTENT,CLASS\n\
        a1,Ann,2014-01-01,\"Check out my channel, subscribe!\",1\n\
        a2,Bob,2014-01-02,I love this song,0\n\
        a3,Cid,2014-01-03,\"Line one\nline two\",0\n";

    #[test]
    fn test_label_mapping() {
        assert_eq!(Label::from_class(0), Some(Label::Ham));
        assert_eq!(Label::from_class(1), Some(Label::Spam));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(Label::Spam.as_class(), 1);
        assert_eq!(Label::Spam.to_string(), "Spam");
        assert_eq!(Label::Ham.to_string(), "Non-Spam");
    }

    #[test]
    fn test_corpus_from_pairs_and_distribution() {
        let corpus =
            Corpus::from_pairs([("a", 1), ("b", 0), ("c", 1), ("d", 1)]).expect("valid pairs");
        let dist = corpus.label_distribution();
        assert_eq!(dist[&Label::Spam], 3);
        assert_eq!(dist[&Label::Ham], 1);
        assert_eq!(corpus.texts(), vec!["a", "b", "c", "d"]);

        assert!(matches!(
            Corpus::from_pairs([("x", 3)]),
            Err(SpamError::InvalidLabel { class: 3 })
        ));
    }

    #[test]
    fn test_corpus_subset_preserves_requested_order() {
        let corpus = Corpus::from_pairs([("a", 1), ("b", 0), ("c", 1)]).unwrap();
        let sub = corpus.subset(&[2, 0]).unwrap();
        assert_eq!(sub.texts(), vec!["c", "a"]);
        assert!(matches!(
            corpus.subset(&[3]),
            Err(SpamError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_quoted_and_multiline_fields() {
        let corpus = CommentLoader::new()
            .parse_bytes(SAMPLE.as_bytes(), "sample")
            .unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.comments()[0].text, "Check out my channel, subscribe!");
        assert_eq!(corpus.comments()[2].text, "Line one\nline two");
        assert_eq!(corpus.labels(), vec![1, 0, 0]);
    }

    #[test]
    fn test_missing_column() {
        let err = CommentLoader::new()
            .parse_bytes(b"CONTENT,LABEL\nhi,1\n", "bad.csv")
            .unwrap_err();
        match err {
            SpamError::MissingField { field, source_name } => {
                assert_eq!(field, "CLASS");
                assert_eq!(source_name, "bad.csv");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_class_reports_line() {
        let err = CommentLoader::new()
            .parse_bytes(b"CONTENT,CLASS\nfine,0\nbroken,spam\n", "x")
            .unwrap_err();
        assert!(matches!(err, SpamError::CsvParse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_missing_content_cell_is_empty_text() {
        let corpus = CommentLoader::new()
            .with_content_column("TEXT")
            .with_class_column("Y")
            .parse_bytes(b"Y,TEXT\n1\n0,hello\n", "short")
            .unwrap();
        assert_eq!(corpus.comments()[0].text, "");
        assert_eq!(corpus.comments()[1].text, "hello");
    }

    #[test]
    fn test_header_only_is_no_data() {
        let err = CommentLoader::new()
            .parse_bytes(b"CONTENT,CLASS\n", "empty")
            .unwrap_err();
        assert!(matches!(err, SpamError::NoData { .. }));
    }

    #[test]
    fn test_latin1_fallback() {
        // "café" with 0xE9 is invalid UTF-8
        let bytes = b"CONTENT,CLASS\ncaf\xE9 video,0\n";
        let corpus = CommentLoader::new().parse_bytes(bytes, "latin1").unwrap();
        assert_eq!(corpus.comments()[0].text, "café video");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"CONTENT,CLASS\nhello,1\n");
        let corpus = CommentLoader::new().parse_bytes(&bytes, "bom").unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_load_many_concatenates_in_order() {
        let first = write_temp(b"CONTENT,CLASS\nfirst,1\n");
        let second = write_temp(SAMPLE.as_bytes());
        let corpus = CommentLoader::new()
            .load_many(&[first.path(), second.path()])
            .unwrap();
        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.comments()[0].text, "first");
        assert_eq!(corpus.comments()[1].label, Label::Spam);

        let none: [&Path; 0] = [];
        assert!(matches!(
            CommentLoader::new().load_many(&none),
            Err(SpamError::NoData { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = CommentLoader::new()
            .load("/nonexistent/Youtube01.csv")
            .unwrap_err();
        assert!(matches!(err, SpamError::Io(_)));
    }
}
