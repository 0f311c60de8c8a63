//! Lexicon-based sentiment polarity.
//!
//! Scoring follows the valence-aware scheme used by rule-based social-media
//! sentiment tools: per-word valences on a `[-4, 4]` scale, shifted by
//! booster words and ALL-CAPS emphasis, flipped by nearby negations, then
//! squashed into a compound score:
//!
//! ```text
//! compound = s / sqrt(s² + 15)
//! ```
//!
//! # Examples
//!
//! ```
//! use comment_spam::text::sentiment::{SentimentAnalyzer, SentimentLexicon};
//! use std::sync::Arc;
//!
//! let analyzer = SentimentAnalyzer::new(Arc::new(SentimentLexicon::english()));
//! assert!(analyzer.compound("I love this song") > 0.5);
//! assert!(analyzer.compound("this is not good") < 0.0);
//! assert_eq!(analyzer.compound("subscribe to my channel"), 0.0);
//! ```

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Normalization constant of the compound score.
const ALPHA: f64 = 15.0;
/// Valence added (in the word's direction) by a booster word.
const BOOSTER_INCREMENT: f64 = 0.293;
/// Valence added to a shouted word when the text is not all caps.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier applied to a negated word.
const NEGATION_SCALAR: f64 = -0.74;
/// Emphasis per exclamation mark, capped at four marks.
const EXCLAMATION_INCREMENT: f64 = 0.292;
/// Tokens before a sentiment word that are searched for a negation.
const NEGATION_WINDOW: usize = 3;

const POSITIVE_TERMS: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("brilliant", 2.8),
    ("congrats", 2.4),
    ("cool", 1.3),
    ("cute", 2.0),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fun", 2.3),
    ("funny", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("haha", 2.0),
    ("like", 1.5),
    ("lol", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("pretty", 2.2),
    ("sweet", 2.0),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("win", 2.8),
    ("winner", 2.8),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("yes", 1.7),
];

const NEGATIVE_TERMS: &[(&str, f64)] = &[
    ("abominable", -2.6),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("cheap", -0.5),
    ("dead", -3.3),
    ("dislike", -1.6),
    ("evil", -3.4),
    ("fake", -2.1),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("kill", -3.7),
    ("lame", -1.8),
    ("murder", -3.7),
    ("no", -1.2),
    ("poor", -2.1),
    ("racist", -3.1),
    ("sad", -2.1),
    ("scam", -2.2),
    ("shame", -2.1),
    ("spam", -1.5),
    ("stupid", -2.4),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("terrorism", -3.6),
    ("terrorist", -3.7),
    ("ugly", -3.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("kinda", -BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
];

const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "neither", "never", "no",
    "nobody", "none", "nor", "not", "nothing", "nowhere", "wasnt", "without", "wont",
];

/// Term valences plus booster and negation vocabularies.
///
/// Immutable after construction; share it with `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl SentimentLexicon {
    /// Empty lexicon: every text scores 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English lexicon tuned for short social-media comments.
    #[must_use]
    pub fn english() -> Self {
        let valences = POSITIVE_TERMS
            .iter()
            .chain(NEGATIVE_TERMS)
            .map(|&(term, v)| (term.to_string(), v))
            .collect();
        let boosters = BOOSTERS
            .iter()
            .map(|&(term, v)| (term.to_string(), v))
            .collect();
        let negations = NEGATIONS.iter().map(|t| (*t).to_string()).collect();
        Self {
            valences,
            boosters,
            negations,
        }
    }

    /// Adds or replaces a term valence (stored lowercase).
    #[must_use]
    pub fn with_term(mut self, term: &str, valence: f64) -> Self {
        self.valences.insert(term.to_lowercase(), valence);
        self
    }

    /// Adds a negation word.
    #[must_use]
    pub fn with_negation(mut self, term: &str) -> Self {
        self.negations.insert(term.to_lowercase());
        self
    }

    /// Valence of a lowercase term.
    #[must_use]
    pub fn valence(&self, term: &str) -> Option<f64> {
        self.valences.get(term).copied()
    }

    fn booster(&self, term: &str) -> Option<f64> {
        self.boosters.get(term).copied()
    }

    fn is_negation(&self, term: &str) -> bool {
        self.negations.contains(term) || term.ends_with("n't")
    }

    /// Number of scored terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// True when no term carries a valence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

/// Polarity breakdown of one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityScores {
    /// Share of positive sentiment mass
    pub positive: f64,
    /// Share of negative sentiment mass
    pub negative: f64,
    /// Share of tokens carrying no sentiment
    pub neutral: f64,
    /// Normalized overall polarity in `[-1, 1]`
    pub compound: f64,
}

/// Scores text against an injected [`SentimentLexicon`].
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<SentimentLexicon>,
}

impl SentimentAnalyzer {
    /// Create an analyzer over a shared lexicon.
    #[must_use]
    pub fn new(lexicon: Arc<SentimentLexicon>) -> Self {
        Self { lexicon }
    }

    /// Compound polarity in `[-1, 1]`; 0 for text without sentiment words.
    #[must_use]
    pub fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }

    /// Full polarity breakdown.
    #[must_use]
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let raw: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();
        if raw.is_empty() {
            return PolarityScores {
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
                compound: 0.0,
            };
        }

        let lower: Vec<String> = raw
            .iter()
            .map(|t| t.to_lowercase().replace('\u{2019}', "'"))
            .collect();
        let mixed_case = raw.iter().any(|t| !is_shouted(t));

        let mut valences = Vec::with_capacity(raw.len());
        for (i, term) in lower.iter().enumerate() {
            let Some(mut v) = self.lexicon.valence(term) else {
                valences.push(0.0);
                continue;
            };
            if mixed_case && is_shouted(raw[i]) {
                v += CAPS_INCREMENT.copysign(v);
            }
            let window = i.saturating_sub(NEGATION_WINDOW)..i;
            for prev in &lower[window.clone()] {
                if let Some(boost) = self.lexicon.booster(prev) {
                    v += if v < 0.0 { -boost } else { boost };
                }
            }
            if lower[window].iter().any(|prev| self.lexicon.is_negation(prev)) {
                v *= NEGATION_SCALAR;
            }
            valences.push(v);
        }

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let marks = text.chars().filter(|&c| c == '!').count().min(4) as f64;
            sum += (marks * EXCLAMATION_INCREMENT).copysign(sum);
        }
        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);

        let pos: f64 = valences.iter().filter(|v| **v > 0.0).map(|v| v + 1.0).sum();
        let neg: f64 = valences.iter().filter(|v| **v < 0.0).map(|v| v.abs() + 1.0).sum();
        let neu = valences.iter().filter(|v| **v == 0.0).count() as f64;
        let total = pos + neg + neu;

        PolarityScores {
            positive: pos / total,
            negative: neg / total,
            neutral: neu / total,
            compound,
        }
    }
}

/// Uppercase word of at least two letters.
fn is_shouted(token: &str) -> bool {
    token.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && token.chars().all(|c| !c.is_lowercase())
}
