//! Spelling suggestion engines and text checking.
//!
//! This module provides the edit-distance searches over a prefix tree, the
//! lexicon that ties them to the embedding index, and the checkers that run
//! them over whole texts.

pub mod checker;
pub mod dictionary;
pub mod guided;
pub mod levenshtein;
pub mod lexicon;
pub mod parallel;
pub mod trie;

// Re-export commonly used types
pub use checker::*;
pub use dictionary::*;
pub use guided::*;
pub use levenshtein::*;
pub use lexicon::*;
pub use parallel::*;
pub use trie::*;
