//! Output formatting for CLI commands.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellcoreArgs};
use crate::error::Result;
use crate::spelling::{SpellCheckResult, Strategy, StrategyComparison, Suggestion};

/// Result structure for checking a text file.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckReport {
    pub dictionary_words: usize,
    pub strategy: Strategy,
    pub parallel: bool,
    #[serde(flatten)]
    pub result: SpellCheckResult,
}

/// Suggestions for one queried word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordSuggestions {
    pub word: String,
    pub known: bool,
    pub suggestions: Vec<Suggestion>,
}

/// Result structure for the suggest command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestReport {
    pub strategy: Strategy,
    pub words: Vec<WordSuggestions>,
}

/// Result structure for the compare command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareReport {
    pub word: String,
    pub known: bool,
    pub comparisons: Vec<StrategyComparison>,
}

/// Reports that have a human-readable rendering.
pub trait HumanOutput {
    /// Render the report as plain text.
    fn render_human(&self) -> String;
}

impl HumanOutput for CheckReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let result = &self.result;

        for error in &result.errors {
            let _ = writeln!(
                out,
                "line {}, word {}: {} -> {}",
                error.line,
                error.position + 1,
                error.word,
                format_words(&error.suggestions)
            );
        }
        if !result.errors.is_empty() {
            out.push('\n');
        }

        let _ = writeln!(out, "Spell Check Results:");
        let _ = writeln!(out, "════════════════════");
        let _ = writeln!(out, "Dictionary words: {}", self.dictionary_words);
        let _ = writeln!(
            out,
            "Strategy: {}{}",
            self.strategy,
            if self.parallel { " (parallel)" } else { "" }
        );
        let _ = writeln!(out, "Total words: {}", result.total_words);
        let _ = writeln!(out, "Correct words: {}", result.correct_words);
        let _ = writeln!(out, "Incorrect words: {}", result.incorrect_words);
        let _ = writeln!(out, "Accuracy: {:.1}%", result.accuracy() * 100.0);
        let _ = writeln!(out, "Processing time: {:.3}ms", result.processing_time_ms);
        out
    }
}

impl HumanOutput for SuggestReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for entry in &self.words {
            if entry.known {
                let _ = writeln!(out, "{}: correct", entry.word);
            } else {
                let _ = writeln!(
                    out,
                    "{} ({}): {}",
                    entry.word,
                    self.strategy,
                    format_suggestions(&entry.suggestions)
                );
            }
        }
        out
    }
}

impl HumanOutput for CompareReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Strategy comparison for '{}'{}:",
            self.word,
            if self.known { " (in dictionary)" } else { "" }
        );
        let _ = writeln!(out, "══════════════════════");
        for comparison in &self.comparisons {
            let _ = writeln!(
                out,
                "{:<8} {:>9.3}ms  {}",
                comparison.strategy.name(),
                comparison.elapsed_ms,
                format_suggestions(&comparison.suggestions)
            );
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SpellcoreArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &SpellcoreArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpellcoreArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn format_words(words: &[String]) -> String {
    if words.is_empty() {
        "(no suggestions)".to_string()
    } else {
        words.join(", ")
    }
}

fn format_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "(no suggestions)".to_string();
    }
    suggestions
        .iter()
        .map(|s| format!("{} ({})", s.word, format_distance(s.distance)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Edit distances print as integers, embedding distances with three decimals.
fn format_distance(distance: f64) -> String {
    if distance.fract() == 0.0 {
        format!("{distance:.0}")
    } else {
        format!("{distance:.3}")
    }
}
