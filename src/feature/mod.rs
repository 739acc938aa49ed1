//! Word embeddings and the kd-tree that indexes them.

pub mod distance;
pub mod embedding;
pub mod kdtree;

pub use distance::*;
pub use embedding::*;
pub use kdtree::*;
