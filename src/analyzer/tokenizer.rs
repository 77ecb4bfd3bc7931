//! Tokenizer backends for the keyword analyzer
//!
//! Tokens are maximal runs of a single script class (Hangul syllables,
//! Latin letters, or digits), so a token never mixes scripts. Tokens are
//! lowercased, and short tokens and stopwords are dropped. The backend
//! sits behind the [`Tokenize`] trait so a morphological analyzer can be
//! slotted in at construction time without touching the scoring code.

use crate::analyzer::stopwords::{STOPWORDS_EN, STOPWORDS_KO};
use std::collections::HashSet;

/// Default minimum token length
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Splits raw text into analysis tokens
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Script class a character belongs to for tokenization purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Hangul,
    Latin,
    Digit,
}

fn classify(c: char) -> Option<CharClass> {
    match c {
        '가'..='힣' => Some(CharClass::Hangul),
        'a'..='z' | 'A'..='Z' => Some(CharClass::Latin),
        '0'..='9' => Some(CharClass::Digit),
        _ => None,
    }
}

/// Script-run tokenizer with stopword filtering
pub struct ScriptTokenizer {
    min_len: usize,
    stopwords: HashSet<&'static str>,
}

impl ScriptTokenizer {
    /// Creates a tokenizer dropping tokens shorter than `min_len`
    pub fn new(min_len: usize) -> Self {
        let stopwords = STOPWORDS_EN
            .iter()
            .chain(STOPWORDS_KO.iter())
            .copied()
            .collect();
        Self { min_len, stopwords }
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() >= self.min_len && !self.stopwords.contains(token)
    }
}

impl Default for ScriptTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LEN)
    }
}

impl Tokenize for ScriptTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_class: Option<CharClass> = None;

        for c in text.chars() {
            let class = classify(c);
            match (class, current_class) {
                (Some(class), Some(open)) if class == open => current.push(c),
                (Some(class), _) => {
                    self.flush(&mut current, &mut tokens);
                    current_class = Some(class);
                    current.push(c);
                }
                (None, _) => {
                    self.flush(&mut current, &mut tokens);
                    current_class = None;
                }
            }
        }
        self.flush(&mut current, &mut tokens);

        tokens
    }
}

impl ScriptTokenizer {
    fn flush(&self, current: &mut String, tokens: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let token = current.to_lowercase();
        current.clear();
        if self.keep(&token) {
            tokens.push(token);
        }
    }
}
