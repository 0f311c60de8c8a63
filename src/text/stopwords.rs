//! Stop words filtering for text preprocessing.
//!
//! Stop words are common words ("the", "is", "at") that carry little signal
//! for spam detection and are removed before stemming.
//!
//! # Examples
//!
//! ```
//! use comment_spam::text::stopwords::StopWordsFilter;
//!
//! let filter = StopWordsFilter::english();
//! let tokens = vec!["check", "out", "my", "channel"];
//! assert_eq!(filter.filter(&tokens), vec!["check", "channel"]);
//! ```

use std::collections::HashSet;

/// Stop words filter that removes common words from token lists.
///
/// Matching is case-insensitive; lookups go through a `HashSet`.
///
/// # Examples
///
/// ```
/// use comment_spam::text::stopwords::StopWordsFilter;
///
/// let custom = StopWordsFilter::new(vec!["foo", "bar"]);
/// let tokens = vec!["foo", "test", "bar", "data"];
/// assert_eq!(custom.filter(&tokens), vec!["test", "data"]);
/// ```
#[derive(Debug, Clone)]
pub struct StopWordsFilter {
    /// Stored in lowercase
    stop_words: HashSet<String>,
}

impl StopWordsFilter {
    /// Create a new stop words filter with custom stop words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();

        Self { stop_words }
    }

    /// Create a filter with the NLTK English stop word list (179 words).
    ///
    /// # Examples
    ///
    /// ```
    /// use comment_spam::text::stopwords::StopWordsFilter;
    ///
    /// let filter = StopWordsFilter::english();
    /// assert_eq!(filter.len(), 179);
    /// assert!(filter.is_stop_word("Your"));
    /// ```
    #[must_use]
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// Filter stop words from a list of tokens, preserving order and case.
    pub fn filter<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|token| !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }


    /// Check if a word is a stop word (case-insensitive).
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        if word.chars().all(|c| !c.is_uppercase()) {
            return self.stop_words.contains(word);
        }
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Number of stop words in the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the filter is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopWordsFilter {
    fn default() -> Self {
        Self::english()
    }
}

/// NLTK English stop words.
///
/// Contractions are listed both whole ("don't") and split ("don"), matching
/// the tokens a Treebank-style tokenizer produces.
///
/// # Examples
///
/// ```
/// use comment_spam::text::stopwords::ENGLISH_STOP_WORDS;
///
/// assert!(ENGLISH_STOP_WORDS.contains(&"the"));
/// assert!(ENGLISH_STOP_WORDS.contains(&"mightn't"));
/// assert!(!ENGLISH_STOP_WORDS.contains(&"subscribe"));
/// ```
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've",
    "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven",
    "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn",
    "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
    "won", "won't", "wouldn", "wouldn't",
];

#[cfg(test)]
#[path = "stopwords_tests.rs"]
mod tests;
