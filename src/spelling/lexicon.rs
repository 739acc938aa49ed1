//! The lexicon ties the three matching strategies to one vocabulary.
//!
//! A [`Lexicon`] owns a [`PrefixIndex`] and a [`FeatureSpaceIndex`] filled from
//! the same words, and answers suggestion queries with whichever
//! [`Strategy`] the caller picks.
//!
//! Removal only touches the prefix index. The feature index has no removal,
//! so a removed word can still come back from the kd-tree strategy.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellError};
use crate::feature::kdtree::FeatureSpaceIndex;
use crate::spelling::dictionary;
use crate::spelling::guided::GuidedEditSearch;
use crate::spelling::trie::PrefixIndex;

/// Which engine answers a suggestion query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Bounded edit-distance search over the prefix tree.
    Trie,
    /// Nearest neighbors in embedding space.
    KdTree,
    /// Priority-guided edit search over the prefix tree.
    #[default]
    AStar,
}

impl Strategy {
    /// Every strategy, in a fixed order.
    pub const ALL: [Strategy; 3] = [Strategy::Trie, Strategy::KdTree, Strategy::AStar];

    /// Get the name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Trie => "trie",
            Strategy::KdTree => "kdtree",
            Strategy::AStar => "astar",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SpellError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trie" => Ok(Strategy::Trie),
            "kdtree" | "kd-tree" | "kd" => Ok(Strategy::KdTree),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(SpellError::invalid_argument(format!(
                "unknown strategy: {s}"
            ))),
        }
    }
}

/// A suggested correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Distance from the query. Edit distance for the tree searches,
    /// Euclidean embedding distance for the kd-tree.
    pub distance: f64,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(word: String, distance: f64) -> Self {
        Suggestion { word, distance }
    }
}

/// Common interface of the three matching engines.
pub trait SuggestionEngine {
    /// The strategy this engine implements.
    fn strategy(&self) -> Strategy;

    /// Up to `limit` suggestions for `word`, best first. Engines that do not
    /// work in edit distance ignore `max_distance`.
    fn suggest(&self, word: &str, max_distance: usize, limit: usize) -> Vec<Suggestion>;
}

fn edit_suggestions(matches: Vec<(usize, String)>, limit: usize) -> Vec<Suggestion> {
    matches
        .into_iter()
        .take(limit)
        .map(|(distance, word)| Suggestion::new(word, distance as f64))
        .collect()
}

impl SuggestionEngine for PrefixIndex {
    fn strategy(&self) -> Strategy {
        Strategy::Trie
    }

    fn suggest(&self, word: &str, max_distance: usize, limit: usize) -> Vec<Suggestion> {
        edit_suggestions(self.fuzzy_search(word, max_distance), limit)
    }
}

impl SuggestionEngine for FeatureSpaceIndex {
    fn strategy(&self) -> Strategy {
        Strategy::KdTree
    }

    fn suggest(&self, word: &str, _max_distance: usize, limit: usize) -> Vec<Suggestion> {
        self.find_k_nearest_with_distance(word, limit)
            .into_iter()
            .map(|(distance, word)| Suggestion::new(word, distance as f64))
            .collect()
    }
}

impl SuggestionEngine for GuidedEditSearch<'_> {
    fn strategy(&self) -> Strategy {
        Strategy::AStar
    }

    fn suggest(&self, word: &str, max_distance: usize, limit: usize) -> Vec<Suggestion> {
        edit_suggestions(self.find_similar_words(word, max_distance), limit)
    }
}

/// Configuration for a lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Maximum edit distance for the tree searches.
    pub max_distance: usize,
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
    /// Shortest word accepted when loading a dictionary file.
    pub min_word_len: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        LexiconConfig {
            max_distance: 2,
            max_suggestions: 5,
            min_word_len: 2,
        }
    }
}

/// Suggestions from one strategy, with how long the query took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub strategy: Strategy,
    pub suggestions: Vec<Suggestion>,
    pub elapsed_ms: f64,
}

/// A vocabulary indexed for all three strategies.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    prefix: PrefixIndex,
    feature: FeatureSpaceIndex,
    config: LexiconConfig,
}

impl Lexicon {
    /// Create an empty lexicon with the default configuration.
    pub fn new() -> Self {
        Lexicon::default()
    }

    /// Create an empty lexicon with a custom configuration.
    pub fn with_config(config: LexiconConfig) -> Self {
        Lexicon {
            config,
            ..Default::default()
        }
    }

    /// Build a lexicon from already cleaned words.
    pub fn from_words<I, S>(words: I, config: LexiconConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Lexicon::with_config(config);
        lexicon.load_vocabulary(words);
        lexicon
    }

    /// Load and clean a whitespace-separated word list from a file.
    pub fn from_file<P: AsRef<Path>>(path: P, config: LexiconConfig) -> Result<Self> {
        let words = dictionary::load_from_file(path.as_ref(), config.min_word_len)?;
        info!(
            "loaded {} words from {}",
            words.len(),
            path.as_ref().display()
        );
        Ok(Lexicon::from_words(words, config))
    }

    /// Insert every word into both indexes. Returns how many words were new.
    pub fn load_vocabulary<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for word in words {
            if self.insert(word.as_ref()) {
                added += 1;
            }
        }
        debug!(
            "vocabulary load added {added} words ({} total)",
            self.prefix.len()
        );
        added
    }

    /// Insert one word into both indexes. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if !self.prefix.insert(word) {
            return false;
        }
        self.feature.insert(word);
        true
    }

    /// Remove a word from the prefix index only. The feature index keeps it.
    pub fn remove_word(&mut self, word: &str) -> bool {
        self.prefix.remove(word)
    }

    /// Exact membership in the prefix index.
    pub fn contains(&self, word: &str) -> bool {
        self.prefix.contains(word)
    }

    /// Number of words in the prefix index.
    pub fn vocabulary_len(&self) -> usize {
        self.prefix.len()
    }

    /// The prefix index.
    pub fn prefix_index(&self) -> &PrefixIndex {
        &self.prefix
    }

    /// The feature index.
    pub fn feature_index(&self) -> &FeatureSpaceIndex {
        &self.feature
    }

    /// A guided search over this lexicon's prefix index.
    pub fn guided(&self) -> GuidedEditSearch<'_> {
        GuidedEditSearch::new(&self.prefix)
    }

    /// The current configuration.
    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: LexiconConfig) {
        self.config = config;
    }

    /// Scored suggestions from the chosen strategy, at most `max_suggestions`.
    pub fn suggestions(
        &self,
        word: &str,
        strategy: Strategy,
        max_distance: usize,
        max_suggestions: usize,
    ) -> Vec<Suggestion> {
        match strategy {
            Strategy::Trie => self.prefix.suggest(word, max_distance, max_suggestions),
            Strategy::KdTree => self.feature.suggest(word, max_distance, max_suggestions),
            Strategy::AStar => self.guided().suggest(word, max_distance, max_suggestions),
        }
    }

    /// Suggested words from the chosen strategy, best first, at most `max_suggestions`.
    pub fn suggest(
        &self,
        word: &str,
        strategy: Strategy,
        max_distance: usize,
        max_suggestions: usize,
    ) -> Vec<String> {
        self.suggestions(word, strategy, max_distance, max_suggestions)
            .into_iter()
            .map(|s| s.word)
            .collect()
    }

    /// Like [`suggest`](Self::suggest), with limits from the configuration.
    pub fn suggest_with_config(&self, word: &str, strategy: Strategy) -> Vec<String> {
        self.suggest(
            word,
            strategy,
            self.config.max_distance,
            self.config.max_suggestions,
        )
    }

    /// Run every strategy on `word` with the configured limits.
    pub fn compare(&self, word: &str) -> Vec<StrategyComparison> {
        Strategy::ALL
            .iter()
            .map(|&strategy| {
                let start = Instant::now();
                let suggestions = self.suggestions(
                    word,
                    strategy,
                    self.config.max_distance,
                    self.config.max_suggestions,
                );
                StrategyComparison {
                    strategy,
                    suggestions,
                    elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
                }
            })
            .collect()
    }
}
