//! Height, balance factor and AVL restoration
//!
//! Heights are never cached: `height` walks the whole subtree each call.
//!
//! Two restoration entry points:
//!   `balance`       - rebalances every node of a subtree, bottom-up
//!   `balance_local` - fixes a single node whose children are already balanced
//!
//! Both yield the same shape for a tree that was AVL before one insertion or
//! one extreme-node removal, since only nodes on the mutated path can be off.

use super::node::{Link, Node};
use super::rotation::{rotate_left_left, rotate_left_right, rotate_right_left, rotate_right_right};

/// Height of a subtree: 0 for an absent node, 1 for a leaf.
pub fn height(link: &Link) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
    }
}

/// height(left) - height(right)
pub fn balance_factor(node: &Node) -> isize {
    height(&node.left) as isize - height(&node.right) as isize
}

fn link_balance_factor(link: &Link) -> isize {
    link.as_deref().map_or(0, balance_factor)
}

/// Rebalance the whole subtree rooted at `node`, children first.
///
/// Returns the (possibly new) subtree root.
pub fn balance(mut node: Box<Node>) -> Box<Node> {
    node.left = node.left.take().map(balance);
    node.right = node.right.take().map(balance);
    balance_local(node)
}

/// Apply at most one single or double rotation at `node`.
pub fn balance_local(node: Box<Node>) -> Box<Node> {
    let bf = balance_factor(&node);

    if bf >= 2 {
        if link_balance_factor(&node.left) <= -1 {
            rotate_left_right(node)
        } else {
            rotate_left_left(node)
        }
    } else if bf <= -2 {
        if link_balance_factor(&node.right) >= 1 {
            rotate_right_left(node)
        } else {
            rotate_right_right(node)
        }
    } else {
        node
    }
}
