//! TF-IDF vectorizer over normalized documents.

use crate::error::{Result, SpamError};
use crate::primitives::SparseVector;
use crate::text::NormalizedDocument;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Term → column index, assigned in lexicographic term order.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, index }
    }

    /// Column index of `term`, if it was seen during fit.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at `index`.
    #[must_use]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// True if `term` is in the vocabulary.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Number of terms (= feature dimension).
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True for an empty vocabulary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in index order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Smoothed inverse document frequency per vocabulary index.
///
/// ```text
/// idf(t) = ln((1 + N) / (1 + df(t))) + 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdfWeights(Vec<f64>);

impl IdfWeights {
    /// Weight for column `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// All weights in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of weights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no weight is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    vocabulary: Vocabulary,
    idf: IdfWeights,
}

/// TF-IDF vectorizer that turns [`NormalizedDocument`]s into L2-normalized
/// sparse rows.
///
/// **TF-IDF Formula:**
/// ```text
/// w(t, d) = count(t, d) × idf(t)
/// row(d)  = w(·, d) / ‖w(·, d)‖₂
/// ```
///
/// Vocabulary and IDF weights come from a single `fit` and are frozen
/// together; a second `fit` is rejected.
///
/// # Examples
///
/// ```
/// use comment_spam::text::vectorize::TfidfVectorizer;
/// use comment_spam::text::NormalizedDocument;
///
/// let doc = |s: &str| NormalizedDocument::from_terms(
///     s.split_whitespace().map(String::from).collect(),
/// );
/// let corpus = vec![doc("free money"), doc("great song")];
///
/// let mut vectorizer = TfidfVectorizer::new();
/// vectorizer.fit(&corpus).unwrap();
/// assert_eq!(vectorizer.n_features(), 4);
///
/// let row = vectorizer.transform(&doc("free free unseen")).unwrap();
/// assert_eq!(row.nnz(), 1);
/// assert!((row.norm() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    fitted: Option<Fitted>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    #[must_use]
    pub fn new() -> Self {
        Self { fitted: None }
    }

    /// Learn the vocabulary and IDF weights from a corpus.
    ///
    /// # Errors
    ///
    /// - `AlreadyFitted` on a second call
    /// - `EmptyCorpus` for zero documents
    /// - `EmptyVocabulary` when no document has any term
    pub fn fit(&mut self, corpus: &[NormalizedDocument]) -> Result<()> {
        if self.fitted.is_some() {
            return Err(SpamError::AlreadyFitted {
                component: "TfidfVectorizer",
            });
        }
        if corpus.is_empty() {
            return Err(SpamError::EmptyCorpus);
        }

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in corpus {
            let unique: BTreeSet<&str> = doc.terms().iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(SpamError::EmptyVocabulary);
        }

        let mut terms: Vec<String> = doc_freq.keys().map(|t| (*t).to_string()).collect();
        terms.sort_unstable();

        let n_docs = corpus.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        debug!(
            documents = corpus.len(),
            vocabulary = terms.len(),
            "fitted tf-idf vocabulary"
        );
        self.fitted = Some(Fitted {
            vocabulary: Vocabulary::from_sorted(terms),
            idf: IdfWeights(idf),
        });
        Ok(())
    }

    /// Transform one document into an L2-normalized row.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// term yields the zero vector.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before [`fit`](Self::fit).
    pub fn transform(&self, doc: &NormalizedDocument) -> Result<SparseVector> {
        let fitted = self.fitted()?;
        let dim = fitted.vocabulary.len();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in doc.terms() {
            if let Some(idx) = fitted.vocabulary.get(term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weighted = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * fitted.idf.0[idx]))
            .collect();
        Ok(SparseVector::from_pairs(dim, weighted)?.l2_normalized())
    }

    /// Transform a batch, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before [`fit`](Self::fit).
    pub fn transform_batch(&self, docs: &[NormalizedDocument]) -> Result<Vec<SparseVector>> {
        docs.iter().map(|doc| self.transform(doc)).collect()
    }

    /// `fit` followed by `transform_batch` on the same corpus.
    ///
    /// # Errors
    ///
    /// See [`fit`](Self::fit).
    pub fn fit_transform(&mut self, corpus: &[NormalizedDocument]) -> Result<Vec<SparseVector>> {
        self.fit(corpus)?;
        self.transform_batch(corpus)
    }

    /// Whether `fit` has completed.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Learned vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.fitted.as_ref().map(|f| &f.vocabulary)
    }

    /// Learned IDF weights.
    #[must_use]
    pub fn idf(&self) -> Option<&IdfWeights> {
        self.fitted.as_ref().map(|f| &f.idf)
    }

    /// Feature dimension; 0 before fit.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.vocabulary().map_or(0, Vocabulary::len)
    }

    fn fitted(&self) -> Result<&Fitted> {
        self.fitted.as_ref().ok_or(SpamError::NotFitted {
            component: "TfidfVectorizer",
        })
    }
}
