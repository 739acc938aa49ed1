//! Edit distance primitives.
//!
//! Distances are computed one dynamic-programming row at a time. The prefix
//! tree search reuses the same row step, carrying a row per tree level instead
//! of per character of a single word.

/// Levenshtein distance between two strings: the fewest single-character
/// insertions, deletions and substitutions that turn one into the other.
///
/// This scans the whole O(mn) table and is the reference the index searches
/// are checked against.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    distance_to(a, &target)
}

fn distance_to(source: &str, target: &[char]) -> usize {
    let last = source
        .chars()
        .fold(initial_row(target.len()), |row, letter| {
            next_row(&row, target, letter)
        });
    last[target.len()]
}

/// The row for an empty source prefix: reaching the first `j` target
/// characters takes `j` insertions.
pub fn initial_row(target_len: usize) -> Vec<usize> {
    (0..=target_len).collect()
}

/// Extend the source prefix of `prev` by `letter`.
///
/// `prev[j]` is the distance from the current source prefix to the first `j`
/// characters of `target`; the result has the same shape.
pub fn next_row(prev: &[usize], target: &[char], letter: char) -> Vec<usize> {
    let mut row = Vec::with_capacity(prev.len());
    row.push(prev[0] + 1);

    for (j, &expected) in target.iter().enumerate() {
        let substitute = prev[j] + usize::from(expected != letter);
        let delete = prev[j + 1] + 1;
        let insert = row[j] + 1;
        row.push(substitute.min(delete).min(insert));
    }

    row
}

/// Smallest entry of a row. No extension of the source prefix can get closer.
pub fn row_min(row: &[usize]) -> usize {
    row.iter().copied().min().unwrap_or(0)
}

/// A query decoded once and scored against many candidates.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    query_chars: Vec<char>,
}

impl LevenshteinMatcher {
    pub fn new(query: &str) -> Self {
        LevenshteinMatcher {
            query_chars: query.chars().collect(),
        }
    }

    /// Decoded characters of the query.
    pub fn query_chars(&self) -> &[char] {
        &self.query_chars
    }

    /// Exact distance from `candidate` to the query.
    pub fn distance(&self, candidate: &str) -> usize {
        distance_to(candidate, &self.query_chars)
    }
}
