//! Text spell checking on top of a [`Lexicon`].

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::dictionary::{clean_word, split_words};
use crate::spelling::lexicon::{Lexicon, LexiconConfig, Strategy};

/// A cleaned word of the checked text and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Cleaned word.
    pub word: String,
    /// Index among all words of the text, starting at 0.
    pub position: usize,
    /// Line number, starting at 1.
    pub line: usize,
}

/// Split text into cleaned words, tracking line numbers and positions.
/// Words are split the same way dictionaries are; segments that clean to
/// nothing (numbers, punctuation) are dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        for word in split_words(line) {
            tokens.push(Token {
                word,
                position: tokens.len(),
                line: line_index + 1,
            });
        }
    }
    tokens
}

/// An unknown word and the corrections offered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misspelling {
    pub word: String,
    pub position: usize,
    pub line: usize,
    pub suggestions: Vec<String>,
    pub strategy: Strategy,
}

/// Result of checking a text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpellCheckResult {
    /// Unknown words, in text order.
    pub errors: Vec<Misspelling>,
    pub total_words: usize,
    pub correct_words: usize,
    pub incorrect_words: usize,
    pub processing_time_ms: f64,
}

impl SpellCheckResult {
    /// Share of words that were found in the dictionary, 1.0 for empty text.
    pub fn accuracy(&self) -> f64 {
        if self.total_words == 0 {
            1.0
        } else {
            self.correct_words as f64 / self.total_words as f64
        }
    }
}

/// Checks texts word by word against a lexicon.
#[derive(Debug, Clone, Default)]
pub struct SpellChecker {
    lexicon: Lexicon,
}

impl SpellChecker {
    /// Create a checker over an existing lexicon.
    pub fn new(lexicon: Lexicon) -> Self {
        SpellChecker { lexicon }
    }

    /// Create a checker from a dictionary file.
    pub fn from_file<P: AsRef<Path>>(path: P, config: LexiconConfig) -> Result<Self> {
        Ok(SpellChecker::new(Lexicon::from_file(path, config)?))
    }

    /// The underlying lexicon.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Clean and add a word. Returns `false` if it cleans to nothing or is already known.
    pub fn add_word(&mut self, word: &str) -> bool {
        let cleaned = clean_word(word);
        !cleaned.is_empty() && self.lexicon.insert(&cleaned)
    }

    /// Whether the cleaned form of `word` is in the dictionary.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.lexicon.contains(&clean_word(word))
    }

    /// Suggestions for a cleaned word, limited by the lexicon configuration.
    pub fn suggestions_for(&self, word: &str, strategy: Strategy) -> Vec<String> {
        self.lexicon.suggest_with_config(word, strategy)
    }

    /// Check one token. Words shorter than the configured minimum length are
    /// never loaded from dictionaries, so they are not flagged either.
    pub(crate) fn check_token(&self, token: &Token, strategy: Strategy) -> Option<Misspelling> {
        let too_short = token.word.chars().count() < self.lexicon.config().min_word_len;
        if too_short || self.lexicon.contains(&token.word) {
            return None;
        }

        Some(Misspelling {
            word: token.word.clone(),
            position: token.position,
            line: token.line,
            suggestions: self.suggestions_for(&token.word, strategy),
            strategy,
        })
    }

    /// Check every word of `text`.
    pub fn check_text(&self, text: &str, strategy: Strategy) -> SpellCheckResult {
        let start = Instant::now();
        let tokens = tokenize(text);

        let errors: Vec<Misspelling> = tokens
            .iter()
            .filter_map(|token| self.check_token(token, strategy))
            .collect();

        let result = summarize(tokens.len(), errors, start);
        debug!(
            "checked {} words with {strategy}: {} unknown",
            result.total_words, result.incorrect_words
        );
        result
    }

    /// Read and check a text file.
    pub fn check_file<P: AsRef<Path>>(&self, path: P, strategy: Strategy) -> Result<SpellCheckResult> {
        let text = fs::read_to_string(path)?;
        Ok(self.check_text(&text, strategy))
    }
}

pub(crate) fn summarize(
    total_words: usize,
    errors: Vec<Misspelling>,
    start: Instant,
) -> SpellCheckResult {
    let incorrect_words = errors.len();
    SpellCheckResult {
        errors,
        total_words,
        correct_words: total_words - incorrect_words,
        incorrect_words,
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}
