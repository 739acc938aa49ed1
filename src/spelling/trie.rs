//! Prefix tree over dictionary words.
//!
//! The tree answers exact membership queries and bounded edit-distance
//! searches. Each node owns its children outright, so insertion, removal and
//! traversal are plain recursion over owned data.

use std::collections::BTreeMap;

use log::debug;

use crate::spelling::levenshtein::{initial_row, next_row, row_min};

/// A single node of the prefix tree.
#[derive(Debug, Clone, Default)]
pub struct PrefixNode {
    children: BTreeMap<char, PrefixNode>,
    /// The word spelled by the path to this node. `Some` iff the node is terminal.
    word: Option<String>,
}

impl PrefixNode {
    /// Create an empty, non-terminal node.
    pub fn new() -> Self {
        PrefixNode::default()
    }

    /// Whether a dictionary word ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.word.is_some()
    }

    /// The word stored at this node, if it is terminal.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Child nodes keyed by edge character, in character order.
    pub fn children(&self) -> impl Iterator<Item = (char, &PrefixNode)> {
        self.children.iter().map(|(&c, node)| (c, node))
    }

    /// Look up the child along edge `c`.
    pub fn child(&self, c: char) -> Option<&PrefixNode> {
        self.children.get(&c)
    }

    /// A node that stores no word and leads nowhere can be dropped.
    fn is_dead(&self) -> bool {
        !self.is_terminal() && self.children.is_empty()
    }

    /// Remove `rest` below this node. Returns whether a word was removed.
    fn remove(&mut self, rest: &[char]) -> bool {
        let Some((&first, tail)) = rest.split_first() else {
            return self.word.take().is_some();
        };

        let Some(child) = self.children.get_mut(&first) else {
            return false;
        };

        let removed = child.remove(tail);
        if removed && child.is_dead() {
            self.children.remove(&first);
        }
        removed
    }

    fn collect_words<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(word) = &self.word {
            out.push(word);
        }
        for child in self.children.values() {
            child.collect_words(out);
        }
    }

    fn fuzzy_recursive(
        &self,
        target: &[char],
        row: &[usize],
        max_distance: usize,
        results: &mut Vec<(usize, String)>,
    ) {
        if let Some(word) = &self.word {
            let distance = row[target.len()];
            if distance <= max_distance {
                results.push((distance, word.clone()));
            }
        }

        for (&letter, child) in &self.children {
            let child_row = next_row(row, target, letter);
            // Further letters can only keep or raise the row minimum.
            if row_min(&child_row) > max_distance {
                continue;
            }
            child.fuzzy_recursive(target, &child_row, max_distance, results);
        }
    }
}

/// Prefix tree holding the dictionary vocabulary.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    root: PrefixNode,
    len: usize,
}

impl PrefixIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        PrefixIndex::default()
    }

    /// Insert a word. Returns `true` if the word was not present before.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }

        let added = node.word.is_none();
        node.word = Some(word.to_string());
        if added {
            self.len += 1;
        }
        added
    }

    /// Exact membership check.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = &self.root;
        for c in word.chars() {
            match node.child(c) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_terminal()
    }

    /// Remove a word, pruning nodes that no longer lead to any word.
    /// Removing a word that is not present is a no-op and returns `false`.
    pub fn remove(&mut self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let removed = self.root.remove(&chars);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Find every word within `max_distance` edits of `word`.
    ///
    /// Returns `(distance, word)` pairs sorted by distance, then by word.
    pub fn fuzzy_search(&self, word: &str, max_distance: usize) -> Vec<(usize, String)> {
        let target: Vec<char> = word.chars().collect();
        let row = initial_row(target.len());

        let mut results = Vec::new();
        self.root
            .fuzzy_recursive(&target, &row, max_distance, &mut results);
        results.sort();

        debug!(
            "prefix search for {word:?} (max distance {max_distance}) found {} words",
            results.len()
        );
        results
    }

    /// Number of words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no words.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All stored words in character order.
    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_words(&mut out);
        out
    }

    /// The root node, for searches that walk the tree themselves.
    pub fn root(&self) -> &PrefixNode {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(words: &[&str]) -> PrefixIndex {
        let mut index = PrefixIndex::new();
        for word in words {
            index.insert(word);
        }
        index
    }

    #[test]
    fn test_insert_and_contains() {
        let index = index_of(&["hello", "help", "world"]);

        assert!(index.contains("hello"));
        assert!(index.contains("help"));
        assert!(index.contains("world"));
        assert!(!index.contains("hel"));
        assert!(!index.contains("helpful"));
        assert!(!index.contains("xyz"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicate_insert_counts_once() {
        let mut index = PrefixIndex::new();
        assert!(index.insert("apple"));
        assert!(!index.insert("apple"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_prunes_dead_branches() {
        let mut index = index_of(&["hello", "help"]);

        assert!(index.remove("hello"));
        assert!(!index.contains("hello"));
        assert!(index.contains("help"));

        // The "lo" tail is gone, the shared "hel" prefix remains.
        let hel = index
            .root()
            .child('h')
            .and_then(|n| n.child('e'))
            .and_then(|n| n.child('l'))
            .expect("shared prefix should survive");
        assert!(hel.child('l').is_none());
        assert!(hel.child('p').is_some());
    }

    #[test]
    fn test_remove_keeps_prefix_words() {
        let mut index = index_of(&["car", "cart"]);

        assert!(index.remove("cart"));
        assert!(index.contains("car"));
        assert!(index.root().child('c').is_some());

        assert!(index.remove("car"));
        assert!(index.is_empty());
        assert!(index.root().children().next().is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut index = index_of(&["hello"]);

        assert!(!index.remove("hell"));
        assert!(!index.remove("goodbye"));
        assert!(index.contains("hello"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty_word() {
        let mut index = index_of(&["hello"]);
        assert!(!index.contains(""));

        index.insert("");
        assert!(index.contains(""));
        assert!(index.root().is_terminal());
    }

    #[test]
    fn test_case_sensitivity() {
        let index = index_of(&["hello"]);
        assert!(index.contains("hello"));
        assert!(!index.contains("Hello"));
    }

    #[test]
    fn test_fuzzy_search() {
        let index = index_of(&["hello", "hallo", "help", "world"]);

        let results = index.fuzzy_search("helo", 2);
        assert_eq!(
            results,
            vec![
                (1, "hello".to_string()),
                (1, "help".to_string()),
                (2, "hallo".to_string()),
            ]
        );
    }

    #[test]
    fn test_fuzzy_search_zero_distance() {
        let index = index_of(&["hello", "help"]);

        assert_eq!(index.fuzzy_search("help", 0), vec![(0, "help".to_string())]);
        assert!(index.fuzzy_search("helo", 0).is_empty());
    }

    #[test]
    fn test_fuzzy_search_empty_index() {
        let index = PrefixIndex::new();
        assert!(index.fuzzy_search("anything", 3).is_empty());
    }

    #[test]
    fn test_words_in_order() {
        let index = index_of(&["cat", "apple", "car"]);
        assert_eq!(index.words(), vec!["apple", "car", "cat"]);
    }
}
