//! # Spellcore
//!
//! Approximate string matching for spelling suggestions.
//!
//! ## Features
//!
//! - Prefix tree search with dynamic-programming Levenshtein rows
//! - Nearest neighbor search over five-dimensional word embeddings
//! - Priority-guided edit search with exact verification
//! - Sequential and parallel text checking
//! - Command line interface with human and JSON output

pub mod cli;
pub mod error;
pub mod feature;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
