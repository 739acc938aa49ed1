//! Command line argument parsing for the spellcore CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::spelling::{LexiconConfig, Strategy};

/// Spellcore - approximate string matching for spelling suggestions
#[derive(Parser, Debug, Clone)]
#[command(name = "spellcore")]
#[command(about = "Spelling suggestions from a prefix tree, a kd-tree and a guided edit search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellcoreArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellcoreArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check a text file against a dictionary
    Check(CheckArgs),

    /// Suggest corrections for individual words
    Suggest(SuggestArgs),

    /// Run every strategy on one word and time them
    Compare(CompareArgs),
}

/// Limits shared by every command.
#[derive(Parser, Debug, Clone)]
pub struct LimitArgs {
    /// Maximum edit distance for the tree searches
    #[arg(short = 'd', long, default_value = "2")]
    pub max_distance: usize,

    /// Maximum number of suggestions per word
    #[arg(short = 'n', long, default_value = "5")]
    pub max_suggestions: usize,

    /// Shortest dictionary word to load
    #[arg(long, default_value = "2")]
    pub min_word_len: usize,
}

impl LimitArgs {
    /// Lexicon configuration from these limits.
    pub fn to_config(&self) -> LexiconConfig {
        LexiconConfig {
            max_distance: self.max_distance,
            max_suggestions: self.max_suggestions,
            min_word_len: self.min_word_len,
        }
    }
}

/// Arguments for checking a text
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Dictionary file, whitespace-separated words
    #[arg(value_name = "DICTIONARY")]
    pub dictionary: PathBuf,

    /// Text file to check
    #[arg(value_name = "TEXT_FILE")]
    pub text_file: PathBuf,

    /// Suggestion strategy (trie, kdtree, astar)
    #[arg(short, long, default_value = "astar")]
    pub strategy: Strategy,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Check words on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(long, requires = "parallel")]
    pub threads: Option<usize>,
}

/// Arguments for suggesting corrections
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Dictionary file, whitespace-separated words
    #[arg(value_name = "DICTIONARY")]
    pub dictionary: PathBuf,

    /// Words to look up
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Suggestion strategy (trie, kdtree, astar)
    #[arg(short, long, default_value = "astar")]
    pub strategy: Strategy,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Arguments for comparing strategies
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Dictionary file, whitespace-separated words
    #[arg(value_name = "DICTIONARY")]
    pub dictionary: PathBuf,

    /// Word to look up
    #[arg(value_name = "WORD")]
    pub word: String,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
