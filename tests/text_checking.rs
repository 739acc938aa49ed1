use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use spellcore::error::{Result, SpellError};
use spellcore::spelling::{
    LexiconConfig, ParallelConfig, ParallelSpellChecker, SpellChecker, Strategy,
};

fn write_temp(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn sample_checker() -> Result<SpellChecker> {
    let dictionary = write_temp(
        "the quick brown fox jumps over the lazy dog\n\
         spelling checker finds mistakes in text\n",
    )?;
    SpellChecker::from_file(dictionary.path(), LexiconConfig::default())
}

#[test]
fn check_file_reports_positions_and_suggestions() -> Result<()> {
    let checker = sample_checker()?;
    let text = write_temp("The quick brwn fox.\nA speling checker finds mistaks!\n")?;

    let result = checker.check_file(text.path(), Strategy::AStar)?;

    assert_eq!(result.total_words, 9);
    assert_eq!(result.incorrect_words, 3);
    assert_eq!(result.correct_words, 6);

    let found: Vec<(&str, usize, usize)> = result
        .errors
        .iter()
        .map(|e| (e.word.as_str(), e.line, e.position))
        .collect();
    assert_eq!(
        found,
        vec![("brwn", 1, 2), ("speling", 2, 5), ("mistaks", 2, 8)]
    );
    assert_eq!(result.errors[0].suggestions.first().map(String::as_str), Some("brown"));
    assert_eq!(result.errors[1].suggestions.first().map(String::as_str), Some("spelling"));
    assert_eq!(result.errors[2].suggestions.first().map(String::as_str), Some("mistakes"));
    Ok(())
}

#[test]
fn every_strategy_flags_the_same_words() -> Result<()> {
    let checker = sample_checker()?;
    let text = "teh lazy dgo jumps";

    let flagged: Vec<Vec<String>> = Strategy::ALL
        .iter()
        .map(|&strategy| {
            checker
                .check_text(text, strategy)
                .errors
                .into_iter()
                .map(|e| e.word)
                .collect()
        })
        .collect();

    for words in &flagged {
        assert_eq!(words, &vec!["teh".to_string(), "dgo".to_string()]);
    }
    Ok(())
}

#[test]
fn parallel_checker_matches_sequential() -> Result<()> {
    let checker = Arc::new(sample_checker()?);
    let parallel = ParallelSpellChecker::new(
        Arc::clone(&checker),
        ParallelConfig {
            thread_pool_size: Some(3),
        },
    )?;

    let text = "the quikc brown fxo\njumps ovre the lazzy dog\n".repeat(20);
    let sequential = checker.check_text(&text, Strategy::Trie);
    let concurrent = parallel.check_text(&text, Strategy::Trie);

    assert_eq!(sequential.total_words, 180);
    assert_eq!(sequential.errors, concurrent.errors);
    assert!(
        concurrent
            .errors
            .windows(2)
            .all(|pair| pair[0].position < pair[1].position)
    );
    Ok(())
}

#[test]
fn missing_dictionary_is_a_dictionary_error() {
    let err = SpellChecker::from_file("/no/such/dictionary.txt", LexiconConfig::default())
        .unwrap_err();
    assert!(matches!(err, SpellError::Dictionary(_)));
}

#[test]
fn missing_text_file_is_an_io_error() -> Result<()> {
    let checker = sample_checker()?;
    let err = checker
        .check_file("/no/such/text.txt", Strategy::Trie)
        .unwrap_err();
    assert!(matches!(err, SpellError::Io(_)));
    Ok(())
}

#[test]
fn dictionary_compounds_and_contractions_validate_in_text() -> Result<()> {
    let dictionary = write_temp("well-known thing\ndon't stop\n")?;
    let checker = SpellChecker::from_file(dictionary.path(), LexiconConfig::default())?;

    for strategy in Strategy::ALL {
        let result = checker.check_text("A well-known thing, don't stop.", strategy);
        assert_eq!(result.total_words, 6);
        assert!(result.errors.is_empty(), "{strategy}: {:?}", result.errors);
    }
    Ok(())
}
