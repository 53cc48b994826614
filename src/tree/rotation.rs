//! The four AVL rotations
//!
//! Each takes ownership of an imbalanced node and returns the new local
//! root. BST order is preserved; every rotation is O(1).
//!
//! A rotation called without the child it needs leaves the subtree as is.

use tracing::trace;

use super::node::Node;

/// Left-Left: `a.left = b` becomes the root, `a` its right child.
pub fn rotate_left_left(mut a: Box<Node>) -> Box<Node> {
    let Some(mut b) = a.left.take() else {
        debug_assert!(false, "left-left rotation without a left child");
        return a;
    };
    trace!(pivot = a.power, promoted = b.power, "rotate left-left");

    a.left = b.right.take();
    b.right = Some(a);
    b
}

/// Left-Right: `c = a.left.right` becomes the root over `b` and `a`.
pub fn rotate_left_right(mut a: Box<Node>) -> Box<Node> {
    let Some(mut b) = a.left.take() else {
        debug_assert!(false, "left-right rotation without a left child");
        return a;
    };
    let Some(mut c) = b.right.take() else {
        debug_assert!(false, "left-right rotation without a left-right grandchild");
        a.left = Some(b);
        return a;
    };
    trace!(pivot = a.power, promoted = c.power, "rotate left-right");

    a.left = c.right.take();
    b.right = c.left.take();
    c.left = Some(b);
    c.right = Some(a);
    c
}

/// Right-Left: `c = a.right.left` becomes the root over `a` and `b`.
pub fn rotate_right_left(mut a: Box<Node>) -> Box<Node> {
    let Some(mut b) = a.right.take() else {
        debug_assert!(false, "right-left rotation without a right child");
        return a;
    };
    let Some(mut c) = b.left.take() else {
        debug_assert!(false, "right-left rotation without a right-left grandchild");
        a.right = Some(b);
        return a;
    };
    trace!(pivot = a.power, promoted = c.power, "rotate right-left");

    a.right = c.left.take();
    b.left = c.right.take();
    c.right = Some(b);
    c.left = Some(a);
    c
}

/// Right-Right: `a.right = b` becomes the root, `a` its left child.
pub fn rotate_right_right(mut a: Box<Node>) -> Box<Node> {
    let Some(mut b) = a.right.take() else {
        debug_assert!(false, "right-right rotation without a right child");
        return a;
    };
    trace!(pivot = a.power, promoted = b.power, "rotate right-right");

    a.right = b.left.take();
    b.left = Some(a);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Link;

    fn powers_in_order(link: &Link, out: &mut Vec<u64>) {
        if let Some(node) = link {
            powers_in_order(&node.left, out);
            out.push(node.power);
            powers_in_order(&node.right, out);
        }
    }

    /// Three-node path: `top`, its child on `first` side, grandchild on `second` side.
    fn chain(powers: [u64; 3], first_left: bool, second_left: bool) -> Box<Node> {
        let grandchild = Node::leaf(powers[2], powers[2]);
        let mut child = Node::leaf(powers[1], powers[1]);
        if second_left {
            child.left = Some(grandchild);
        } else {
            child.right = Some(grandchild);
        }
        let mut top = Node::leaf(powers[0], powers[0]);
        if first_left {
            top.left = Some(child);
        } else {
            top.right = Some(child);
        }
        top
    }

    #[test]
    fn test_left_left() {
        let root = chain([30, 20, 10], true, true);
        let root = rotate_left_left(root);
        assert_eq!(root.power, 20);
        assert_eq!(root.left.as_ref().map(|n| n.power), Some(10));
        assert_eq!(root.right.as_ref().map(|n| n.power), Some(30));
    }

    #[test]
    fn test_left_right() {
        let root = chain([30, 10, 20], true, false);
        let root = rotate_left_right(root);
        assert_eq!(root.power, 20);
        assert_eq!(root.left.as_ref().map(|n| n.power), Some(10));
        assert_eq!(root.right.as_ref().map(|n| n.power), Some(30));
    }

    #[test]
    fn test_right_left() {
        let root = chain([10, 30, 20], false, true);
        let root = rotate_right_left(root);
        assert_eq!(root.power, 20);
        assert_eq!(root.left.as_ref().map(|n| n.power), Some(10));
        assert_eq!(root.right.as_ref().map(|n| n.power), Some(30));
    }

    #[test]
    fn test_right_right() {
        let root = chain([10, 20, 30], false, false);
        let root = rotate_right_right(root);
        assert_eq!(root.power, 20);
        assert_eq!(root.left.as_ref().map(|n| n.power), Some(10));
        assert_eq!(root.right.as_ref().map(|n| n.power), Some(30));
    }

    #[test]
    fn test_rotation_keeps_inner_subtrees_ordered() {
        // a(50) with left b(30) whose children are 20 and 40; LL moves 40 under a.
        let mut b = Node::leaf(30, 0);
        b.left = Some(Node::leaf(20, 0));
        b.right = Some(Node::leaf(40, 0));
        let mut a = Node::leaf(50, 0);
        a.left = Some(b);
        a.right = Some(Node::leaf(60, 0));

        let root = Some(rotate_left_left(a));
        let mut powers = Vec::new();
        powers_in_order(&root, &mut powers);
        assert_eq!(powers, vec![20, 30, 40, 50, 60]);
        let right = root.as_ref().and_then(|n| n.right.as_ref());
        assert_eq!(right.and_then(|n| n.left.as_ref()).map(|n| n.power), Some(40));
    }
}
