//! AVL-ordered priority container
//!
//! Nodes are keyed by power; each node carries a bucket of identifiers.
//! Extraction takes the smallest identifier stored at the lowest or the
//! highest power, and unlinks the node once its bucket drains.
//!
//! Rebalancing follows the configured [`BalanceMode`]:
//! `Subtree` re-runs the full bottom-up pass over the whole tree after every
//! insertion (and over each subtree on the removal walk), which costs time
//! proportional to subtree size. `Path` only revisits the nodes on the
//! mutated path and ends in the same shape.

mod balance;
mod bucket;
mod node;
mod rotation;

pub use balance::{balance_factor, height};
pub use bucket::Bucket;
pub use node::{Link, Node};

use std::cmp::Ordering;

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::BalanceMode;

/// Extraction on a container holding no identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The container has no nodes.
    #[error("container is empty")]
    Empty,
}

/// Structural invariant broken somewhere in a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Node left linked with no identifiers.
    #[error("node with power {power} has an empty bucket")]
    EmptyBucket {
        /// Power of the offending node.
        power: u64,
    },

    /// Power outside the open interval allowed by its ancestors.
    #[error("power {power} violates search order (allowed range {lower:?}..{upper:?})")]
    OutOfOrder {
        /// Power of the offending node.
        power: u64,
        /// Exclusive lower bound inherited from ancestors.
        lower: Option<u64>,
        /// Exclusive upper bound inherited from ancestors.
        upper: Option<u64>,
    },

    /// Subtree heights differ by more than one.
    #[error("node with power {power} has balance factor {factor}")]
    Unbalanced {
        /// Power of the offending node.
        power: u64,
        /// height(left) - height(right)
        factor: isize,
    },
}

/// Which extreme an extraction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Min,
    Max,
}

impl Edge {
    fn toward(self, node: &Node) -> &Link {
        match self {
            Edge::Min => &node.left,
            Edge::Max => &node.right,
        }
    }

    fn toward_mut(self, node: &mut Node) -> &mut Link {
        match self {
            Edge::Min => &mut node.left,
            Edge::Max => &mut node.right,
        }
    }

    fn away_mut(self, node: &mut Node) -> &mut Link {
        match self {
            Edge::Min => &mut node.right,
            Edge::Max => &mut node.left,
        }
    }
}

/// One independent ordered container.
#[derive(Debug, Clone, Default)]
pub struct PowerTree {
    root: Link,
    mode: BalanceMode,
    /// Identifiers stored across all buckets
    identifiers: usize,
}

impl PowerTree {
    /// Create an empty container using the reference (whole-subtree) rebalancing.
    pub fn new() -> Self {
        Self::with_mode(BalanceMode::Subtree)
    }

    /// Create an empty container with an explicit balance mode
    pub fn with_mode(mode: BalanceMode) -> Self {
        Self {
            root: None,
            mode,
            identifiers: 0,
        }
    }

    /// Balance mode this container was created with
    pub fn mode(&self) -> BalanceMode {
        self.mode
    }

    /// Store `identifier` under `power`.
    ///
    /// A new power creates a leaf; a known power grows that node's bucket.
    /// Never fails.
    pub fn insert(&mut self, power: u64, identifier: u64) {
        match self.mode {
            BalanceMode::Subtree => {
                self.descend_and_store(power, identifier);
                self.root = self.root.take().map(balance::balance);
            }
            BalanceMode::Path => {
                self.root = Some(insert_along_path(self.root.take(), power, identifier));
            }
        }
        self.identifiers += 1;
    }

    /// Plain BST descent; creates or extends the node for `power`.
    fn descend_and_store(&mut self, power: u64, identifier: u64) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match power.cmp(&node.power) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    node.bucket.add(identifier);
                    trace!(power, identifier, size = node.bucket.len(), "bucket extended");
                    return;
                }
            }
        }
        debug!(power, identifier, "node created");
        *slot = Some(Node::leaf(power, identifier));
    }

    /// Remove the smallest identifier stored at the highest power.
    pub fn extract_max(&mut self) -> Result<u64, ExtractError> {
        self.extract(Edge::Max)
    }

    /// Remove the smallest identifier stored at the lowest power.
    pub fn extract_min(&mut self) -> Result<u64, ExtractError> {
        self.extract(Edge::Min)
    }

    fn extract(&mut self, edge: Edge) -> Result<u64, ExtractError> {
        let node = extreme_mut(&mut self.root, edge).ok_or(ExtractError::Empty)?;
        let identifier = node.bucket.remove_min().ok_or(ExtractError::Empty)?;
        let drained = node.bucket.is_empty();
        let power = node.power;

        if drained {
            debug!(power, ?edge, "node drained, unlinking");
            let mode = self.mode;
            self.root = self
                .root
                .take()
                .and_then(|root| unlink_extreme(root, edge, mode));
        }

        self.identifiers = self.identifiers.saturating_sub(1);
        Ok(identifier)
    }

    /// True when no identifiers are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total identifiers across all buckets
    #[inline]
    pub fn len(&self) -> usize {
        self.identifiers
    }

    /// Number of distinct powers
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.subtree_len())
    }

    /// Height of the root (0 when empty)
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Lowest power present
    pub fn min_power(&self) -> Option<u64> {
        extreme(&self.root, Edge::Min).map(|node| node.power)
    }

    /// Highest power present
    pub fn max_power(&self) -> Option<u64> {
        extreme(&self.root, Edge::Max).map(|node| node.power)
    }

    /// In-order traversal over `(power, bucket)`
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    /// Powers in ascending order
    pub fn powers(&self) -> Vec<u64> {
        self.iter().map(|(power, _)| power).collect()
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.root = None;
        self.identifiers = 0;
    }

    /// Verify search order, AVL balance and non-empty buckets.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        check_subtree(&self.root, None, None)
    }

    /// Owned copy of the tree shape for inspection
    pub fn snapshot(&self) -> Option<TreeSnapshot> {
        self.root.as_deref().map(TreeSnapshot::from_node)
    }
}

/// Nested view of a tree, detached from the live nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeSnapshot {
    /// Node power
    pub power: u64,
    /// Bucket contents, sorted ascending
    pub identifiers: Vec<u64>,
    /// Lower-power subtree
    pub left: Option<Box<TreeSnapshot>>,
    /// Higher-power subtree
    pub right: Option<Box<TreeSnapshot>>,
}

impl TreeSnapshot {
    fn from_node(node: &Node) -> Self {
        let mut identifiers = node.bucket.as_slice().to_vec();
        identifiers.sort_unstable();
        Self {
            power: node.power,
            identifiers,
            left: node.left.as_deref().map(|n| Box::new(Self::from_node(n))),
            right: node.right.as_deref().map(|n| Box::new(Self::from_node(n))),
        }
    }
}

/// In-order iterator over a [`PowerTree`]
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u64, &'a Bucket);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some((node.power, &node.bucket))
    }
}

fn restore(node: Box<Node>, mode: BalanceMode) -> Box<Node> {
    match mode {
        BalanceMode::Subtree => balance::balance(node),
        BalanceMode::Path => balance::balance_local(node),
    }
}

/// Insert, then fix each node on the way back up.
fn insert_along_path(link: Link, power: u64, identifier: u64) -> Box<Node> {
    let Some(mut node) = link else {
        debug!(power, identifier, "node created");
        return Node::leaf(power, identifier);
    };

    match power.cmp(&node.power) {
        Ordering::Less => node.left = Some(insert_along_path(node.left.take(), power, identifier)),
        Ordering::Greater => {
            node.right = Some(insert_along_path(node.right.take(), power, identifier))
        }
        Ordering::Equal => {
            node.bucket.add(identifier);
            trace!(power, identifier, size = node.bucket.len(), "bucket extended");
            return node;
        }
    }
    balance::balance_local(node)
}

fn extreme(link: &Link, edge: Edge) -> Option<&Node> {
    let mut node = link.as_deref()?;
    while let Some(next) = edge.toward(node).as_deref() {
        node = next;
    }
    Some(node)
}

fn extreme_mut(link: &mut Link, edge: Edge) -> Option<&mut Node> {
    let mut node = link.as_deref_mut()?;
    while edge.toward(node).is_some() {
        node = edge.toward_mut(node).as_deref_mut()?;
    }
    Some(node)
}

/// Splice out the extreme node along `edge`, restoring balance on the walk back.
fn unlink_extreme(mut node: Box<Node>, edge: Edge, mode: BalanceMode) -> Link {
    let Some(child) = edge.toward_mut(&mut node).take() else {
        return edge.away_mut(&mut node).take();
    };
    *edge.toward_mut(&mut node) = unlink_extreme(child, edge, mode);
    Some(restore(node, mode))
}

fn check_subtree(
    link: &Link,
    lower: Option<u64>,
    upper: Option<u64>,
) -> Result<(), InvariantViolation> {
    let Some(node) = link else {
        return Ok(());
    };
    let power = node.power;

    if lower.is_some_and(|bound| power <= bound) || upper.is_some_and(|bound| power >= bound) {
        return Err(InvariantViolation::OutOfOrder {
            power,
            lower,
            upper,
        });
    }
    if node.bucket.is_empty() {
        return Err(InvariantViolation::EmptyBucket { power });
    }
    let factor = balance_factor(node);
    if factor.abs() > 1 {
        return Err(InvariantViolation::Unbalanced { power, factor });
    }

    check_subtree(&node.left, lower, Some(power))?;
    check_subtree(&node.right, Some(power), upper)
}
