//! Command implementations for the spellcore CLI.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::spelling::*;

/// Execute a CLI command.
pub fn execute_command(args: SpellcoreArgs) -> Result<()> {
    match &args.command {
        Command::Check(check_args) => check_text(check_args, &args),
        Command::Suggest(suggest_args) => suggest_words(suggest_args, &args),
        Command::Compare(compare_args) => compare_strategies(compare_args, &args),
    }
}

fn load_lexicon(path: &Path, limits: &LimitArgs) -> Result<Lexicon> {
    let lexicon = Lexicon::from_file(path, limits.to_config())?;
    info!(
        "dictionary {} ready with {} words",
        path.display(),
        lexicon.vocabulary_len()
    );
    Ok(lexicon)
}

/// Check a text file.
fn check_text(args: &CheckArgs, cli_args: &SpellcoreArgs) -> Result<()> {
    let lexicon = load_lexicon(&args.dictionary, &args.limits)?;
    let dictionary_words = lexicon.vocabulary_len();
    let checker = SpellChecker::new(lexicon);

    let result = if args.parallel {
        let text = fs::read_to_string(&args.text_file)?;
        let config = ParallelConfig {
            thread_pool_size: args.threads,
        };
        let parallel = ParallelSpellChecker::new(Arc::new(checker), config)?;
        info!("checking on {} threads", parallel.num_threads());
        parallel.check_text(&text, args.strategy)
    } else {
        checker.check_file(&args.text_file, args.strategy)?
    };

    info!(
        "checked {}: {} of {} words unknown",
        args.text_file.display(),
        result.incorrect_words,
        result.total_words
    );

    output_result(
        "Spell check completed",
        &CheckReport {
            dictionary_words,
            strategy: args.strategy,
            parallel: args.parallel,
            result,
        },
        cli_args,
    )
}

/// Suggest corrections for each word on the command line.
fn suggest_words(args: &SuggestArgs, cli_args: &SpellcoreArgs) -> Result<()> {
    let lexicon = load_lexicon(&args.dictionary, &args.limits)?;
    let config = lexicon.config().clone();

    let words = args
        .words
        .iter()
        .map(|raw| {
            let word = clean_word(raw);
            let known = lexicon.contains(&word);
            let suggestions = if known {
                Vec::new()
            } else {
                lexicon.suggestions(
                    &word,
                    args.strategy,
                    config.max_distance,
                    config.max_suggestions,
                )
            };
            WordSuggestions {
                word,
                known,
                suggestions,
            }
        })
        .collect();

    output_result(
        "Suggestions",
        &SuggestReport {
            strategy: args.strategy,
            words,
        },
        cli_args,
    )
}

/// Run every strategy on one word.
fn compare_strategies(args: &CompareArgs, cli_args: &SpellcoreArgs) -> Result<()> {
    let lexicon = load_lexicon(&args.dictionary, &args.limits)?;
    let word = clean_word(&args.word);

    output_result(
        "Strategy comparison",
        &CompareReport {
            known: lexicon.contains(&word),
            comparisons: lexicon.compare(&word),
            word,
        },
        cli_args,
    )
}
