//! Deterministic feature vectors for words.
//!
//! Every word maps to five coordinates describing its letter make-up. Words
//! with similar shapes land close together, which is what the kd-tree exploits.
//! The mapping only looks at ASCII letters; a word without any maps to the
//! origin, so all such words collide there.

use serde::{Deserialize, Serialize};

use crate::feature::distance;

/// Number of coordinates in a word embedding.
pub const EMBEDDING_DIMENSIONS: usize = 5;

/// Letter count at which the length coordinate saturates.
const LENGTH_SATURATION: f32 = 20.0;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const COMMON_LETTERS: &[char] = &['e', 't', 'a', 'i', 'n', 'o'];

/// A fixed-dimension feature vector derived from a word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEmbedding {
    coords: Vec<f32>,
}

impl WordEmbedding {
    /// Wrap raw coordinates.
    pub fn new(coords: Vec<f32>) -> Self {
        WordEmbedding { coords }
    }

    /// The all-zero embedding.
    pub fn zero() -> Self {
        WordEmbedding::new(vec![0.0; EMBEDDING_DIMENSIONS])
    }

    /// Embed a word.
    ///
    /// Coordinates, in order: normalized length (capped at 1.0), vowel ratio,
    /// ratio of the letters `e t a i n o`, balance of `a..=m` against `n..=z`
    /// letters (in `[-1, 1]`), and the alphabet position of the first letter
    /// scaled to `(0, 1]`.
    ///
    /// Letters outside ASCII are skipped entirely: they do not count towards
    /// the length, and the first-letter axis uses the first ASCII letter.
    pub fn from_word(word: &str) -> Self {
        let letters: Vec<char> = word
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let Some(&first) = letters.first() else {
            return WordEmbedding::zero();
        };

        let total = letters.len() as f32;
        let vowels = letters.iter().filter(|c| VOWELS.contains(*c)).count() as f32;
        let common = letters
            .iter()
            .filter(|c| COMMON_LETTERS.contains(*c))
            .count() as f32;
        let first_half = letters.iter().filter(|c| ('a'..='m').contains(*c)).count() as f32;
        let second_half = total - first_half;

        WordEmbedding::new(vec![
            (total / LENGTH_SATURATION).min(1.0),
            vowels / total,
            common / total,
            (first_half - second_half) / total,
            (first as u8 - b'a' + 1) as f32 / 26.0,
        ])
    }

    /// The coordinates.
    pub fn coords(&self) -> &[f32] {
        &self.coords
    }

    /// Coordinate on one axis.
    pub fn axis(&self, axis: usize) -> f32 {
        self.coords[axis]
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Euclidean distance to another embedding.
    pub fn distance(&self, other: &WordEmbedding) -> f32 {
        distance::euclidean(&self.coords, &other.coords)
    }

    /// Squared Euclidean distance to another embedding.
    pub fn squared_distance(&self, other: &WordEmbedding) -> f32 {
        distance::squared_euclidean(&self.coords, &other.coords)
    }
}
