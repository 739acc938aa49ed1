//! Dictionary loading and word cleaning.
//!
//! The indexes expect cleaned tokens: letters only, lowercase. This module
//! turns raw word lists into that form.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Result, SpellError};

/// Keep only the alphabetic characters of `raw`, lowercased.
pub fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split a line into cleaned words on Unicode word boundaries.
///
/// Dictionaries and checked texts both go through this, so a spelling that
/// loads from a dictionary always matches the same spelling in a text.
/// Hyphenated compounds split into their parts; apostrophes inside a word
/// do not split it.
pub fn split_words(line: &str) -> impl Iterator<Item = String> + '_ {
    line.unicode_words()
        .map(clean_word)
        .filter(|word| !word.is_empty())
}

/// Read words, clean them, and drop words shorter than `min_len` characters.
/// Duplicates are dropped; first-seen order is kept.
pub fn load_words<R: BufRead>(reader: R, min_len: usize) -> Result<Vec<String>> {
    let mut seen = AHashSet::new();
    let mut words = Vec::new();

    for line in reader.lines() {
        let line = line?;
        for word in split_words(&line) {
            if word.chars().count() < min_len {
                continue;
            }
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }
    }

    Ok(words)
}

/// Load a word list from a file. See [`load_words`].
pub fn load_from_file<P: AsRef<Path>>(path: P, min_len: usize) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SpellError::dictionary(format!("cannot open {}: {e}", path.display()))
    })?;
    load_words(BufReader::new(file), min_len)
}
