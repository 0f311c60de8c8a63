//! Stemming algorithms for text normalization.
//!
//! Stemming reduces words to their root form by removing suffixes.
//! For example: "hopping" → "hop", "generalizations" → "gener",
//! "ponies" → "poni".
//!
//! [`PorterStemmer`] follows the 1980 algorithm with the refinements found in
//! the widely used NLTK implementation: a few irregular forms are looked up
//! directly, `y` only becomes `i` after a consonant, and step 2 knows the
//! extra `bli`, `fulli` and `logi` endings.
//!
//! # Examples
//!
//! ```
//! use comment_spam::text::stem::{PorterStemmer, Stemmer};
//!
//! let stemmer = PorterStemmer::new();
//! assert_eq!(stemmer.stem("caresses"), "caress");
//!
//! let words = vec!["free", "money", "subscribing"];
//! assert_eq!(stemmer.stem_tokens(&words), vec!["free", "money", "subscrib"]);
//! ```
//!
//! # References
//!
//! Porter, M.F. (1980). "An algorithm for suffix stripping."
//! Program, 14(3), 130-137.

/// Trait for stemming algorithms.
///
/// Stemming is total: every input produces some output, so the methods are
/// infallible.
pub trait Stemmer: Send + Sync {
    /// Stem a single word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Stem multiple tokens.
    fn stem_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String>
    where
        Self: Sized,
    {
        tokens.iter().map(|token| self.stem(token.as_ref())).collect()
    }
}

/// Porter stemmer, steps 1a through 5b of the 1980 paper with the NLTK
/// refinements.
///
/// Words of one or two letters are returned unchanged. Words containing
/// non-ASCII characters are lowercased but not stemmed; the suffix rules
/// are defined over the English alphabet only.
///
/// # Examples
///
/// ```
/// use comment_spam::text::stem::{PorterStemmer, Stemmer};
///
/// let stemmer = PorterStemmer::new();
/// assert_eq!(stemmer.stem("relational"), "relat");
/// assert_eq!(stemmer.stem("skies"), "sky");
/// assert_eq!(stemmer.stem("money"), "money");
/// assert_eq!(stemmer.stem("is"), "is");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

/// Forms stemmed by lookup instead of by rule.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("fulli", "ful"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

impl PorterStemmer {
    /// Create a new Porter Stemmer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if let Some(&(_, stem)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == lower) {
            return stem.to_string();
        }
        if lower.len() <= 2 || !lower.is_ascii() {
            return lower;
        }

        let mut w = Word::new(lower.into_bytes());
        w.step1ab();
        w.step1c();
        w.step2();
        w.step3();
        w.step4();
        w.step5();
        w.into_string()
    }
}

/// Working buffer for one word. All indices are byte offsets; the buffer is
/// ASCII lowercase.
struct Word {
    b: Vec<u8>,
}

impl Word {
    fn new(b: Vec<u8>) -> Self {
        Self { b }
    }

    fn into_string(self) -> String {
        String::from_utf8(self.b).unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.b.len()
    }

    fn last(&self) -> Option<u8> {
        self.b.last().copied()
    }

    /// True when `b[i]` is a consonant. `y` counts as a consonant at the
    /// start of a word or after a vowel.
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of VC sequences in `b[..len]`, the `m` of `[C](VC){m}[V]`.
    fn measure(&self, len: usize) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return count;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            count += 1;
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    /// `*d`: `b[..len]` ends with a double consonant.
    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// `*o`: `b[..len]` ends consonant-vowel-consonant, last not w, x or y.
    /// A two-letter vowel-consonant stem also qualifies.
    fn ends_cvc(&self, len: usize) -> bool {
        let three = len >= 3
            && self.is_consonant(len - 1)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 3)
            && !matches!(self.b[len - 1], b'w' | b'x' | b'y');
        three || (len == 2 && !self.is_consonant(0) && self.is_consonant(1))
    }

    /// Length of the stem left after removing `suffix`, if present.
    fn stem_len(&self, suffix: &str) -> Option<usize> {
        self.b
            .ends_with(suffix.as_bytes())
            .then(|| self.len() - suffix.len())
    }

    fn replace_from(&mut self, stem_len: usize, replacement: &str) {
        self.b.truncate(stem_len);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    /// First rule whose suffix matches decides; it fires only when the
    /// remaining stem has `m > 0`.
    fn apply_first_rule(&mut self, rules: &[(&str, &str)]) {
        let hit = rules
            .iter()
            .find_map(|&(suffix, repl)| self.stem_len(suffix).map(|j| (j, repl)));
        if let Some((j, repl)) = hit {
            if self.measure(j) > 0 {
                self.replace_from(j, repl);
            }
        }
    }

    fn step1ab(&mut self) {
        if self.last() == Some(b's') {
            if let Some(j) = self.stem_len("sses") {
                self.replace_from(j, "ss");
            } else if let Some(j) = self.stem_len("ies") {
                self.replace_from(j, if self.len() == 4 { "ie" } else { "i" });
            } else if self.b[self.len() - 2] != b's' {
                self.b.pop();
            }
        }

        if let Some(j) = self.stem_len("ied") {
            self.replace_from(j, if self.len() == 4 { "ie" } else { "i" });
            return;
        }

        if let Some(j) = self.stem_len("eed") {
            if self.measure(j) > 0 {
                self.b.pop();
            }
            return;
        }

        let stripped = ["ed", "ing"]
            .iter()
            .find_map(|suffix| self.stem_len(suffix))
            .filter(|&j| self.has_vowel(j));
        let Some(j) = stripped else {
            return;
        };

        self.b.truncate(j);
        if ["at", "bl", "iz"].iter().any(|s| self.b.ends_with(s.as_bytes())) {
            self.b.push(b'e');
        } else if self.ends_double_consonant(self.len()) {
            if !matches!(self.last(), Some(b'l' | b's' | b'z')) {
                self.b.pop();
            }
        } else if self.measure(self.len()) == 1 && self.ends_cvc(self.len()) {
            self.b.push(b'e');
        }
    }

    /// `y` becomes `i` after a consonant once the stem is longer than one letter.
    fn step1c(&mut self) {
        if let Some(j) = self.stem_len("y") {
            if j > 1 && self.is_consonant(j - 1) {
                self.b[j] = b'i';
            }
        }
    }

    fn step2(&mut self) {
        // "alli" goes first and the result is run through the step again
        if let Some(j) = self.stem_len("alli") {
            if self.measure(j) > 0 {
                self.replace_from(j, "al");
                self.step2();
                return;
            }
        }
        // "logi" is measured with its "l" kept
        if let Some(j) = self.stem_len("logi") {
            if self.measure(j + 1) > 0 {
                self.replace_from(j, "log");
            }
            return;
        }
        self.apply_first_rule(STEP2_RULES);
    }

    fn step3(&mut self) {
        self.apply_first_rule(STEP3_RULES);
    }

    fn step4(&mut self) {
        let Some((suffix, j)) = STEP4_SUFFIXES
            .iter()
            .find_map(|&suffix| self.stem_len(suffix).map(|j| (suffix, j)))
        else {
            return;
        };
        if suffix == "ion" && !(j > 0 && matches!(self.b[j - 1], b's' | b't')) {
            return;
        }
        if self.measure(j) > 1 {
            self.b.truncate(j);
        }
    }

    fn step5(&mut self) {
        if self.last() == Some(b'e') {
            let stem = self.len() - 1;
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                self.b.pop();
            }
        }
        let len = self.len();
        if self.last() == Some(b'l') && self.ends_double_consonant(len) && self.measure(len) > 1
        {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        PorterStemmer::new().stem(word)
    }

    #[test]
    fn test_porter_step1a_plurals() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("ties"), "tie");
        assert_eq!(stem("lies"), "lie");
        assert_eq!(stem("caress"), "caress");
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn test_porter_step1b() {
        assert_eq!(stem("feed"), "feed");
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("plastered"), "plaster");
        assert_eq!(stem("bled"), "bled");
        assert_eq!(stem("motoring"), "motor");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("conflated"), "conflat");
        assert_eq!(stem("troubled"), "troubl");
        assert_eq!(stem("sized"), "size");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("tanned"), "tan");
        assert_eq!(stem("falling"), "fall");
        assert_eq!(stem("hissing"), "hiss");
        assert_eq!(stem("fizzed"), "fizz");
        assert_eq!(stem("failing"), "fail");
        assert_eq!(stem("filing"), "file");
        assert_eq!(stem("cried"), "cri");
        assert_eq!(stem("died"), "die");
    }

    #[test]
    fn test_porter_step1c() {
        assert_eq!(stem("happy"), "happi");
        assert_eq!(stem("money"), "money");
        assert_eq!(stem("today"), "today");
        assert_eq!(stem("really"), "realli");
        assert_eq!(stem("cry"), "cri");
    }

    #[test]
    fn test_porter_irregular_forms() {
        assert_eq!(stem("sky"), "sky");
        assert_eq!(stem("Skies"), "sky");
        assert_eq!(stem("dying"), "die");
        assert_eq!(stem("news"), "news");
        assert_eq!(stem("succeed"), "succeed");
    }

    #[test]
    fn test_porter_step2_and_3() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("conditional"), "condit");
        assert_eq!(stem("rational"), "ration");
        assert_eq!(stem("valenci"), "valenc");
        assert_eq!(stem("digitizer"), "digit");
        assert_eq!(stem("vietnamization"), "vietnam");
        assert_eq!(stem("generalizations"), "gener");
        assert_eq!(stem("hopefulness"), "hope");
        assert_eq!(stem("triplicate"), "triplic");
        assert_eq!(stem("electrical"), "electr");
        assert_eq!(stem("goodness"), "good");
        assert_eq!(stem("sensibility"), "sensibl");
        assert_eq!(stem("radically"), "radic");
        assert_eq!(stem("hopefully"), "hope");
        assert_eq!(stem("analogi"), "analog");
    }

    #[test]
    fn test_porter_step4() {
        assert_eq!(stem("revival"), "reviv");
        assert_eq!(stem("allowance"), "allow");
        assert_eq!(stem("airliner"), "airlin");
        assert_eq!(stem("replacement"), "replac");
        assert_eq!(stem("adjustment"), "adjust");
        assert_eq!(stem("dependent"), "depend");
        assert_eq!(stem("adoption"), "adopt");
        assert_eq!(stem("communism"), "commun");
        assert_eq!(stem("activate"), "activ");
        assert_eq!(stem("effective"), "effect");
        // "ion" only drops after s or t
        assert_eq!(stem("onion"), "onion");
    }

    #[test]
    fn test_porter_step5() {
        assert_eq!(stem("probate"), "probat");
        assert_eq!(stem("rate"), "rate");
        assert_eq!(stem("cease"), "ceas");
        assert_eq!(stem("controlling"), "control");
        assert_eq!(stem("roll"), "roll");
        assert_eq!(stem("oscillators"), "oscil");
    }

    #[test]
    fn test_porter_comment_vocabulary() {
        assert_eq!(stem("free"), "free");
        assert_eq!(stem("prize"), "prize");
        assert_eq!(stem("love"), "love");
        assert_eq!(stem("video"), "video");
        assert_eq!(stem("subscribe"), "subscrib");
        assert_eq!(stem("channel"), "channel");
    }

    #[test]
    fn test_porter_short_words() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("as"), "as");
        assert_eq!(stem(""), "");
    }

    #[test]
    fn test_porter_uppercase() {
        assert_eq!(stem("HOPPING"), "hop");
        assert_eq!(stem("Cats"), "cat");
    }

    #[test]
    fn test_porter_non_ascii_untouched() {
        assert_eq!(stem("Café"), "café");
        assert_eq!(stem("naïveties"), "naïveties");
    }

    #[test]
    fn test_stem_tokens() {
        let stemmer = PorterStemmer::new();
        let words = vec!["running", "cats", "easily"];
        let stemmed = stemmer.stem_tokens(&words);
        assert_eq!(stemmed, vec!["run", "cat", "easili"]);
        assert!(stemmer.stem_tokens::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_measure() {
        let m = |s: &str| Word::new(s.as_bytes().to_vec()).measure(s.len());
        assert_eq!(m("tr"), 0);
        assert_eq!(m("tree"), 0);
        assert_eq!(m("by"), 0);
        assert_eq!(m("trouble"), 1);
        assert_eq!(m("oats"), 1);
        assert_eq!(m("trees"), 1);
        assert_eq!(m("troubles"), 2);
        assert_eq!(m("private"), 2);
    }

    #[test]
    fn test_consonant_y() {
        let w = Word::new(b"toy".to_vec());
        assert!(w.is_consonant(0));
        assert!(!w.is_consonant(1));
        assert!(w.is_consonant(2));
        let w = Word::new(b"syzygy".to_vec());
        assert!(!w.is_consonant(1));
    }

    #[test]
    fn test_ends_cvc() {
        let cvc = |s: &str| Word::new(s.as_bytes().to_vec()).ends_cvc(s.len());
        assert!(cvc("hop"));
        assert!(cvc("fil"));
        assert!(!cvc("hoop"));
        assert!(!cvc("snow"));
        assert!(!cvc("box"));
        assert!(!cvc("hi"));
        assert!(cvc("ow"));
    }
}
