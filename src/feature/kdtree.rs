//! kd-tree over word embeddings.
//!
//! Points are inserted one at a time, cycling the splitting axis with depth.
//! There is no rebalancing: insertion order decides the shape of the tree, and
//! a sorted insertion order degrades it into a list. There is no removal
//! either; the index only grows.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::feature::distance::check_dimensions;
use crate::feature::embedding::{EMBEDDING_DIMENSIONS, WordEmbedding};

/// A point in the tree, owning both of its subtrees.
#[derive(Debug, Clone)]
pub struct FeatureTreeNode {
    word: String,
    embedding: WordEmbedding,
    left: Option<Box<FeatureTreeNode>>,
    right: Option<Box<FeatureTreeNode>>,
}

impl FeatureTreeNode {
    fn new(word: String, embedding: WordEmbedding) -> Self {
        FeatureTreeNode {
            word,
            embedding,
            left: None,
            right: None,
        }
    }

    /// The word this point was built from.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The point's coordinates.
    pub fn embedding(&self) -> &WordEmbedding {
        &self.embedding
    }

    fn children(&self) -> impl Iterator<Item = &FeatureTreeNode> {
        self.left.iter().chain(self.right.iter()).map(|n| &**n)
    }
}

/// Bounded list of the best points seen so far, ascending by squared distance.
struct Candidates<'a> {
    capacity: usize,
    entries: Vec<(f32, &'a FeatureTreeNode)>,
}

impl<'a> Candidates<'a> {
    fn new(capacity: usize) -> Self {
        Candidates {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    fn worst(&self) -> f32 {
        self.entries.last().map_or(f32::INFINITY, |(d, _)| *d)
    }

    fn offer(&mut self, squared_distance: f32, node: &'a FeatureTreeNode) {
        let position = self
            .entries
            .partition_point(|(d, n)| compare(*d, n, squared_distance, node).is_le());
        self.entries.insert(position, (squared_distance, node));
        self.entries.truncate(self.capacity);
    }
}

/// Order by distance, then by word so equal distances come out stably.
fn compare(da: f32, a: &FeatureTreeNode, db: f32, b: &FeatureTreeNode) -> Ordering {
    da.total_cmp(&db).then_with(|| a.word.cmp(&b.word))
}

/// Nearest-neighbor index over word embeddings.
#[derive(Debug, Clone)]
pub struct FeatureSpaceIndex {
    root: Option<Box<FeatureTreeNode>>,
    dimensions: usize,
    len: usize,
}

impl Default for FeatureSpaceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureSpaceIndex {
    /// Create an empty index over [`EMBEDDING_DIMENSIONS`]-dimensional embeddings.
    pub fn new() -> Self {
        FeatureSpaceIndex {
            root: None,
            dimensions: EMBEDDING_DIMENSIONS,
            len: 0,
        }
    }

    /// Dimensionality of the indexed points.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree. Grows linearly under sorted insertion.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&FeatureTreeNode, usize)> =
            self.root.iter().map(|n| (&**n, 1)).collect();
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Embed and insert a word.
    pub fn insert(&mut self, word: &str) -> bool {
        self.insert_embedding(word, WordEmbedding::from_word(word))
    }

    /// Insert a precomputed embedding for `word`.
    ///
    /// An embedding of the wrong dimensionality is logged and skipped; returns
    /// whether the point was inserted.
    pub fn insert_embedding(&mut self, word: &str, embedding: WordEmbedding) -> bool {
        if let Err(e) = check_dimensions(self.dimensions, embedding.dimension()) {
            warn!("skipping {word:?}: {e}");
            return false;
        }

        let dimensions = self.dimensions;
        let mut slot = &mut self.root;
        let mut depth = 0;
        while let Some(node) = slot {
            let axis = depth % dimensions;
            slot = if embedding.axis(axis) < node.embedding.axis(axis) {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        *slot = Some(Box::new(FeatureTreeNode::new(word.to_string(), embedding)));
        self.len += 1;
        true
    }

    /// The `k` words whose embeddings are nearest to that of `word`, nearest first.
    pub fn find_k_nearest(&self, word: &str, k: usize) -> Vec<String> {
        self.find_k_nearest_with_distance(word, k)
            .into_iter()
            .map(|(_, w)| w)
            .collect()
    }

    /// Like [`find_k_nearest`](Self::find_k_nearest), with the Euclidean distance of each hit.
    pub fn find_k_nearest_with_distance(&self, word: &str, k: usize) -> Vec<(f32, String)> {
        let Some(root) = self.root.as_deref() else {
            debug!("nearest-neighbor query for {word:?} on an empty index");
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let target = WordEmbedding::from_word(word);
        let mut candidates = Candidates::new(k);
        self.search_nearest(root, &target, &mut candidates);

        candidates
            .entries
            .into_iter()
            .map(|(d, node)| (d.sqrt(), node.word.clone()))
            .collect()
    }

    /// Branch-and-bound walk with an explicit stack, so a degenerate tree
    /// cannot exhaust the call stack.
    fn search_nearest<'a>(
        &self,
        root: &'a FeatureTreeNode,
        target: &WordEmbedding,
        candidates: &mut Candidates<'a>,
    ) {
        // (node, depth, squared distance from the target to the node's splitting plane)
        let mut stack: Vec<(&'a FeatureTreeNode, usize, Option<f32>)> = vec![(root, 0, None)];

        while let Some((node, depth, plane_gap)) = stack.pop() {
            // A far side can only hold a closer point if its splitting plane
            // is no farther than the current worst candidate.
            if let Some(gap) = plane_gap {
                if candidates.is_full() && gap > candidates.worst() {
                    continue;
                }
            }

            candidates.offer(node.embedding.squared_distance(target), node);

            let axis = depth % self.dimensions;
            let diff = target.axis(axis) - node.embedding.axis(axis);
            let (near, far) = if diff < 0.0 {
                (&node.left, &node.right)
            } else {
                (&node.right, &node.left)
            };

            // Far first: the near subtree is popped and finished before it.
            if let Some(far) = far {
                stack.push((&**far, depth + 1, Some(diff * diff)));
            }
            if let Some(near) = near {
                stack.push((&**near, depth + 1, None));
            }
        }
    }
}

impl Drop for FeatureSpaceIndex {
    fn drop(&mut self) {
        // Unlink nodes one by one instead of dropping recursively.
        let mut stack: Vec<Box<FeatureTreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
