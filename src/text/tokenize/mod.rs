//! Tokenization for comment preprocessing.
//!
//! - [`WhitespaceTokenizer`] splits on Unicode whitespace only.
//! - [`WordTokenizer`] separates punctuation and splits English clitics
//!   ("don't" → "do", "n't"), the way Treebank-style word tokenizers do.
//!
//! Both implement [`Tokenizer`](crate::text::Tokenizer).

use crate::text::Tokenizer;

/// Clitic suffixes split off the end of a word, longest first.
const CLITICS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'m", "'d"];

/// Whitespace tokenizer that splits text on Unicode whitespace characters.
///
/// # Examples
///
/// ```
/// use comment_spam::text::{Tokenizer, tokenize::WhitespaceTokenizer};
///
/// let tokenizer = WhitespaceTokenizer::new();
/// assert_eq!(tokenizer.tokenize("Hello,  world!"), vec!["Hello,", "world!"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(ToString::to_string).collect()
    }
}

/// Word tokenizer that splits on whitespace and separates punctuation.
///
/// - Splits on Unicode whitespace
/// - Emits every other non-alphanumeric character (except apostrophes) as
///   its own token
/// - Splits trailing clitics: `don't` → `do` + `n't`, `it's` → `it` + `'s`
/// - Treats the typographic apostrophe `’` like `'`
///
/// # Examples
///
/// ```
/// use comment_spam::text::{Tokenizer, tokenize::WordTokenizer};
///
/// let tokenizer = WordTokenizer::new();
///
/// let tokens = tokenizer.tokenize("Check it out!!! www.example.com");
/// assert_eq!(
///     tokens,
///     vec!["Check", "it", "out", "!", "!", "!", "www", ".", "example", ".", "com"]
/// );
///
/// let tokens = tokenizer.tokenize("I don't know.");
/// assert_eq!(tokens, vec!["I", "do", "n't", "know", "."]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Separators are punctuation and symbols; apostrophes stay inside
    /// words so clitics can be recognized.
    fn is_separator(c: char) -> bool {
        !c.is_alphanumeric() && c != '\''
    }

    fn push_word(tokens: &mut Vec<String>, word: &str) {
        if word.is_empty() {
            return;
        }
        if word.contains('\'') {
            let lower = word.to_lowercase();
            for clitic in CLITICS {
                if lower.len() > clitic.len() && lower.ends_with(clitic) {
                    // clitics are ASCII, so the split point is a char boundary
                    let split = word.len() - clitic.len();
                    if word.is_char_boundary(split) {
                        tokens.push(word[..split].to_string());
                        tokens.push(word[split..].to_string());
                        return;
                    }
                }
            }
        }
        tokens.push(word.to_string());
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            let ch = if ch == '\u{2019}' { '\'' } else { ch };
            if ch.is_whitespace() {
                Self::push_word(&mut tokens, &current);
                current.clear();
            } else if Self::is_separator(ch) {
                Self::push_word(&mut tokens, &current);
                current.clear();
                tokens.push(ch.to_string());
            } else {
                current.push(ch);
            }
        }
        Self::push_word(&mut tokens, &current);

        tokens
    }
}
