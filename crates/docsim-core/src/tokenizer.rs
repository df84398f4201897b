//! Clause/word tokenizer for mixed Chinese/English text
//!
//! Splits ASCII words on alphanumeric boundaries and CJK text into
//! clause-length runs bounded by punctuation and whitespace.

/// Sentence punctuation treated as token separators alongside whitespace.
pub const DEFAULT_SEPARATORS: &str = "，。！？；,.!?;";

/// What a character contributes to the current token run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// ASCII letter or digit — accumulates into a word token
    Word,
    /// Whitespace or configured punctuation — closes the current run
    Separator,
    /// Anything else (typically CJK) — accumulates into a clause token
    Clause,
}

/// Tokenizer that splits text into words (ASCII alphanumeric runs) and
/// clauses (runs of everything else), discarding separators.
///
/// Case is preserved; no length filtering. The separator set is
/// configurable since different corpora punctuate differently.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separators: Vec<char>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATORS)
    }
}

impl Tokenizer {
    /// Create a tokenizer with a custom punctuation separator set.
    /// Whitespace is always a separator regardless of this set.
    pub fn new(separators: &str) -> Self {
        Self {
            separators: separators.chars().collect(),
        }
    }

    /// True if `c` closes the current token without joining any token.
    pub fn is_separator(&self, c: char) -> bool {
        c.is_whitespace() || self.separators.contains(&c)
    }

    fn classify(&self, c: char) -> CharClass {
        if c.is_ascii_alphanumeric() {
            CharClass::Word
        } else if self.is_separator(c) {
            CharClass::Separator
        } else {
            CharClass::Clause
        }
    }

    /// Tokenize text into an ordered sequence of clause/word tokens.
    ///
    /// Adjacent characters of the same class extend the current token;
    /// word and clause runs never merge with each other; separators are
    /// dropped. Empty or separator-only input yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_class = CharClass::Separator;

        for c in text.chars() {
            let class = self.classify(c);
            if class != current_class && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current_class = class;
            if class != CharClass::Separator {
                current.push(c);
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }
}
