//! Owned tree node
//!
//! Node = power + bucket + two exclusively owned subtrees.
//! No parent links: every traversal is top-down.

use std::fmt;

use super::Bucket;

/// Owned child slot
pub type Link = Option<Box<Node>>;

/// AVL node keyed by power
#[derive(Debug, Clone)]
pub struct Node {
    /// Ordering key
    pub power: u64,

    /// Identifiers stored under `power` (non-empty while linked)
    pub bucket: Bucket,

    /// Subtree with strictly smaller powers
    pub left: Link,

    /// Subtree with strictly greater powers
    pub right: Link,
}

impl Node {
    /// Create a detached leaf holding a single identifier
    pub fn leaf(power: u64, identifier: u64) -> Box<Self> {
        let mut bucket = Bucket::new();
        bucket.add(identifier);
        Box::new(Self {
            power,
            bucket,
            left: None,
            right: None,
        })
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree
    pub fn subtree_len(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.subtree_len())
            + self.right.as_ref().map_or(0, |n| n.subtree_len())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.power, self.bucket.len())
    }
}
