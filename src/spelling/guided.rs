//! Priority-guided edit search over the prefix tree.
//!
//! Fuzzy matching is treated as a shortest-path problem. A search state is a
//! prefix tree node paired with a cursor into the target word; edges are edit
//! operations. States are expanded in order of `f = g + h`, where `g` is the
//! edit cost so far and `h` is the number of target characters not yet
//! consumed.
//!
//! `h` does not account for characters that will still match for free, so the
//! cost at which a terminal node is reached is not trusted. Every candidate
//! word is re-scored with the full Levenshtein table before it is accepted.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::spelling::levenshtein::LevenshteinMatcher;
use crate::spelling::trie::{PrefixIndex, PrefixNode};

/// One entry of the search frontier. Lives for a single query.
#[derive(Debug, Clone)]
pub struct SearchFrontierState<'a> {
    /// Current position in the prefix tree.
    pub node: &'a PrefixNode,
    /// Dictionary-side characters spelled so far.
    pub path: String,
    /// Number of target characters consumed.
    pub target_index: usize,
    /// Edit cost accumulated so far.
    pub g: usize,
    /// Priority key, `g + h`.
    pub f: usize,
}

impl SearchFrontierState<'_> {
    fn key(&self) -> (usize, usize) {
        (std::ptr::from_ref(self.node) as usize, self.target_index)
    }
}

impl PartialEq for SearchFrontierState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchFrontierState<'_> {}

impl Ord for SearchFrontierState<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Scalar keys first; the path comparison only settles full ties.
        self.f
            .cmp(&other.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.target_index.cmp(&self.target_index))
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for SearchFrontierState<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* style fuzzy search borrowing a [`PrefixIndex`].
#[derive(Debug, Clone, Copy)]
pub struct GuidedEditSearch<'a> {
    index: &'a PrefixIndex,
}

impl<'a> GuidedEditSearch<'a> {
    /// Create a search over `index`.
    pub fn new(index: &'a PrefixIndex) -> Self {
        GuidedEditSearch { index }
    }

    /// Remaining target characters. Each one needs at least one step to consume.
    fn heuristic(target_len: usize, target_index: usize) -> usize {
        target_len - target_index
    }

    /// Exact membership check on the underlying index.
    pub fn word_exists(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Find every dictionary word within `max_distance` edits of `target`.
    ///
    /// Returns `(distance, word)` pairs sorted by verified distance, then by word.
    pub fn find_similar_words(&self, target: &str, max_distance: usize) -> Vec<(usize, String)> {
        let matcher = LevenshteinMatcher::new(target);
        let target_chars = matcher.query_chars();
        let target_len = target_chars.len();

        let mut open = BinaryHeap::new();
        let mut best_cost: AHashMap<(usize, usize), usize> = AHashMap::new();
        let mut verified: AHashSet<&str> = AHashSet::new();
        let mut results = Vec::new();
        let mut expanded = 0usize;

        open.push(Reverse(SearchFrontierState {
            node: self.index.root(),
            path: String::new(),
            target_index: 0,
            g: 0,
            f: Self::heuristic(target_len, 0),
        }));

        while let Some(Reverse(current)) = open.pop() {
            if current.g > max_distance {
                continue;
            }

            // Only re-expand a state when it is reached more cheaply than before.
            match best_cost.get(&current.key()) {
                Some(&seen) if seen <= current.g => continue,
                _ => {
                    best_cost.insert(current.key(), current.g);
                }
            }
            expanded += 1;

            if let Some(word) = current.node.word() {
                // The exact distance does not depend on the path, so each word is verified once.
                if verified.insert(word) {
                    let distance = matcher.distance(word);
                    if distance <= max_distance {
                        results.push((distance, word.to_string()));
                    }
                }
            }

            let cursor = current.target_index;
            let expected = target_chars.get(cursor).copied();

            for (letter, child) in current.node.children() {
                // Letter consumes the next target character: match or substitution.
                if let Some(expected) = expected {
                    let g = current.g + usize::from(letter != expected);
                    push_state(
                        &mut open,
                        child,
                        (current.path.as_str(), Some(letter)),
                        cursor + 1,
                        g,
                        target_len,
                        max_distance,
                    );
                }

                // Letter is extra in the dictionary word.
                push_state(
                    &mut open,
                    child,
                    (current.path.as_str(), Some(letter)),
                    cursor,
                    current.g + 1,
                    target_len,
                    max_distance,
                );
            }

            // Target character is extra in the query.
            if expected.is_some() {
                push_state(
                    &mut open,
                    current.node,
                    (current.path.as_str(), None),
                    cursor + 1,
                    current.g + 1,
                    target_len,
                    max_distance,
                );
            }
        }

        results.sort();
        debug!(
            "guided search for {target:?} (max distance {max_distance}) expanded {expanded} states, found {} words",
            results.len()
        );
        results
    }

    /// The closest word within `max_distance`, if any. Ties go to the
    /// alphabetically first word.
    pub fn find_best_match(&self, target: &str, max_distance: usize) -> Option<String> {
        self.find_similar_words(target, max_distance)
            .into_iter()
            .next()
            .map(|(_, word)| word)
    }
}

/// Queue a state unless it is already over budget. The path is the parent's
/// path plus an optional letter, and is only built for states that are kept.
fn push_state<'a>(
    open: &mut BinaryHeap<Reverse<SearchFrontierState<'a>>>,
    node: &'a PrefixNode,
    (parent_path, letter): (&str, Option<char>),
    target_index: usize,
    g: usize,
    target_len: usize,
    max_distance: usize,
) {
    if g > max_distance {
        return;
    }
    let mut path = String::with_capacity(parent_path.len() + letter.map_or(0, char::len_utf8));
    path.push_str(parent_path);
    path.extend(letter);
    open.push(Reverse(SearchFrontierState {
        node,
        path,
        target_index,
        g,
        f: g + GuidedEditSearch::heuristic(target_len, target_index),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::levenshtein::levenshtein_distance;

    fn index_of(words: &[&str]) -> PrefixIndex {
        let mut index = PrefixIndex::new();
        for word in words {
            index.insert(word);
        }
        index
    }

    #[test]
    fn test_word_exists() {
        let index = index_of(&["hello", "world"]);
        let search = GuidedEditSearch::new(&index);

        assert!(search.word_exists("hello"));
        assert!(search.word_exists("world"));
        assert!(!search.word_exists("helo"));
    }

    #[test]
    fn test_find_similar() {
        let index = index_of(&["hello", "hallo", "help", "world"]);
        let search = GuidedEditSearch::new(&index);

        assert_eq!(
            search.find_similar_words("helo", 2),
            vec![
                (1, "hello".to_string()),
                (1, "help".to_string()),
                (2, "hallo".to_string()),
            ]
        );
    }

    #[test]
    fn test_finds_words_needing_insertions() {
        let index = index_of(&["hello"]);
        let search = GuidedEditSearch::new(&index);

        assert_eq!(
            search.find_similar_words("helo", 1),
            vec![(1, "hello".to_string())]
        );
        assert_eq!(
            search.find_similar_words("he", 3),
            vec![(3, "hello".to_string())]
        );
    }

    #[test]
    fn test_best_match() {
        let index = index_of(&["hello", "help", "world"]);
        let search = GuidedEditSearch::new(&index);

        assert_eq!(search.find_best_match("wrld", 2), Some("world".to_string()));
        assert_eq!(search.find_best_match("hellp", 1), Some("hello".to_string()));
    }

    #[test]
    fn test_no_match_within_distance() {
        let index = index_of(&["hello", "world"]);
        let search = GuidedEditSearch::new(&index);

        assert!(search.find_similar_words("xyz", 1).is_empty());
        assert_eq!(search.find_best_match("xyz", 1), None);
    }

    #[test]
    fn test_empty_query_checks_root() {
        let mut index = index_of(&["ab"]);
        assert!(GuidedEditSearch::new(&index).find_similar_words("", 0).is_empty());

        index.insert("");
        let search = GuidedEditSearch::new(&index);
        assert_eq!(search.find_similar_words("", 0), vec![(0, String::new())]);
        assert_eq!(
            search.find_similar_words("", 2),
            vec![(0, String::new()), (2, "ab".to_string())]
        );
    }

    #[test]
    fn test_empty_index() {
        let index = PrefixIndex::new();
        let search = GuidedEditSearch::new(&index);
        assert!(search.find_similar_words("hello", 3).is_empty());
    }

    #[test]
    fn test_agrees_with_prefix_search() {
        let words = [
            "the", "then", "there", "these", "they", "than", "that", "this", "thin", "tin",
            "ten", "tan", "ant", "hat", "heat", "cheat",
        ];
        let index = index_of(&words);
        let search = GuidedEditSearch::new(&index);

        for query in ["teh", "thn", "thier", "hta", "chat", "t", ""] {
            for max_distance in 0..=3 {
                let guided = search.find_similar_words(query, max_distance);
                assert_eq!(guided, index.fuzzy_search(query, max_distance));
                for (distance, word) in &guided {
                    assert_eq!(*distance, levenshtein_distance(query, word));
                }
            }
        }
    }

    #[test]
    fn test_frontier_order_settles_on_scalar_keys_first() {
        let index = index_of(&["ab"]);
        let node = index.root();
        let state = |path: &str, target_index: usize, g: usize, f: usize| SearchFrontierState {
            node,
            path: path.to_string(),
            target_index,
            g,
            f,
        };

        assert!(state("zz", 0, 0, 1) < state("aa", 0, 0, 2));
        assert!(state("zz", 0, 0, 2) < state("aa", 0, 1, 2));
        // On equal f and g, the state further along the target comes first,
        // whatever its path.
        assert!(state("zz", 2, 1, 2) < state("aa", 1, 1, 2));
        assert!(state("aa", 1, 1, 2) < state("ab", 1, 1, 2));
    }

    #[test]
    fn test_frontier_paths_spell_the_dictionary_side() {
        let index = index_of(&["cat"]);
        let mut open = BinaryHeap::new();
        let root = index.root();
        let Some(child) = root.child('c') else {
            panic!("missing child");
        };

        push_state(&mut open, child, ("", Some('c')), 1, 0, 3, 1);
        push_state(&mut open, root, ("", None), 1, 1, 3, 1);
        push_state(&mut open, child, ("", Some('c')), 0, 2, 3, 1);

        let mut paths: Vec<(String, usize)> = open
            .into_iter()
            .map(|Reverse(state)| (state.path, state.g))
            .collect();
        paths.sort();
        assert_eq!(paths, vec![(String::new(), 1), ("c".to_string(), 0)]);
    }
}
