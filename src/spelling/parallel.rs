//! Batch suggestion and text checking on a dedicated thread pool.

use std::sync::Arc;
use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellError};
use crate::spelling::checker::{SpellCheckResult, SpellChecker, summarize, tokenize};
use crate::spelling::lexicon::Strategy;

/// Configuration for the parallel checker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

/// Suggestions for one word of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSuggestion {
    pub word: String,
    pub suggestions: Vec<String>,
}

/// Runs a [`SpellChecker`] over many words at once.
///
/// The lexicon is only read during queries, so workers share it without locking.
pub struct ParallelSpellChecker {
    /// Shared checker.
    checker: Arc<SpellChecker>,

    /// Thread pool for parallel execution.
    thread_pool: Arc<ThreadPool>,
}

impl ParallelSpellChecker {
    /// Create a parallel checker with its own thread pool.
    pub fn new(checker: Arc<SpellChecker>, config: ParallelConfig) -> Result<Self> {
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        if thread_pool_size == 0 {
            return Err(SpellError::invalid_argument(
                "thread pool size must be at least 1",
            ));
        }

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("spellcore-worker-{i}"))
            .build()
            .map_err(|e| SpellError::internal(format!("Failed to create thread pool: {e}")))?;

        debug!("parallel checker using {thread_pool_size} threads");

        Ok(Self {
            checker,
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// The shared checker.
    pub fn checker(&self) -> &SpellChecker {
        &self.checker
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Suggestions for every word, in input order.
    pub fn suggest_batch<S>(&self, words: &[S], strategy: Strategy) -> Vec<BatchSuggestion>
    where
        S: AsRef<str> + Sync,
    {
        let checker = &self.checker;
        self.thread_pool.install(|| {
            words
                .par_iter()
                .map(|word| {
                    let word = word.as_ref();
                    BatchSuggestion {
                        word: word.to_string(),
                        suggestions: checker.suggestions_for(word, strategy),
                    }
                })
                .collect()
        })
    }

    /// Check a text with words spread over the pool. The result matches
    /// [`SpellChecker::check_text`], errors in text order.
    pub fn check_text(&self, text: &str, strategy: Strategy) -> SpellCheckResult {
        let start = Instant::now();
        let tokens = tokenize(text);
        let checker = &self.checker;

        // Indexed collect keeps text order.
        let errors: Vec<_> = self.thread_pool.install(|| {
            tokens
                .par_iter()
                .map(|token| checker.check_token(token, strategy))
                .collect::<Vec<_>>()
        })
        .into_iter()
        .flatten()
        .collect();

        summarize(tokens.len(), errors, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::lexicon::{Lexicon, LexiconConfig};

    fn checker() -> Arc<SpellChecker> {
        Arc::new(SpellChecker::new(Lexicon::from_words(
            ["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "hello", "world"],
            LexiconConfig::default(),
        )))
    }

    #[test]
    fn test_thread_pool_size() {
        let config = ParallelConfig {
            thread_pool_size: Some(2),
        };
        let parallel = ParallelSpellChecker::new(checker(), config).unwrap();
        assert_eq!(parallel.num_threads(), 2);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = ParallelConfig {
            thread_pool_size: Some(0),
        };
        assert!(ParallelSpellChecker::new(checker(), config).is_err());
    }

    #[test]
    fn test_suggest_batch_keeps_order() {
        let parallel = ParallelSpellChecker::new(checker(), ParallelConfig::default()).unwrap();
        let words = ["helo", "wrld", "quik", "zzzzzzzz"];
        let batch = parallel.suggest_batch(&words[..], Strategy::AStar);

        let queried: Vec<&str> = batch.iter().map(|b| b.word.as_str()).collect();
        assert_eq!(queried, words.to_vec());
        assert_eq!(batch[0].suggestions[0], "hello");
        assert_eq!(batch[1].suggestions[0], "world");
        assert_eq!(batch[2].suggestions[0], "quick");
        assert!(batch[3].suggestions.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let checker = checker();
        let parallel = ParallelSpellChecker::new(
            Arc::clone(&checker),
            ParallelConfig {
                thread_pool_size: Some(4),
            },
        )
        .unwrap();

        let text = "teh quick brwn fox\njumsp ovr the lazzy dog\nhello wrld";
        for strategy in Strategy::ALL {
            let sequential = checker.check_text(text, strategy);
            let concurrent = parallel.check_text(text, strategy);
            assert_eq!(sequential.errors, concurrent.errors);
            assert_eq!(sequential.total_words, concurrent.total_words);
            assert_eq!(sequential.incorrect_words, concurrent.incorrect_words);
        }
    }
}
