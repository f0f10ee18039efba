//! Checking the tree's invariants. This takes `O(n)` time, and is meant for tests and debugging.

use super::*;
use thiserror::Error;

/// A broken invariant, as found by [`RedBlackTree::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("the root {0:?} is red")]
    RedRoot(NodeId),
    #[error("the sentinel is red")]
    RedSentinel,
    #[error("the red node {0:?} has a red child {1:?}")]
    RedRedEdge(NodeId, NodeId),
    #[error("the paths through the children of {node:?} count {left} and {right} black nodes")]
    BlackHeightMismatch { node: NodeId, left: usize, right: usize },
    #[error("the keys of {0:?} and {1:?} are out of order")]
    OutOfOrder(NodeId, NodeId),
    #[error("{child:?} is a child of {parent:?}, but its parent link is {link:?}")]
    BrokenParentLink {
        parent: NodeId,
        child: NodeId,
        link: NodeId,
    },
    #[error("{node:?} stores size {stored}, but its subtree has {actual} nodes")]
    SizeMismatch {
        node: NodeId,
        stored: usize,
        actual: usize,
    },
    #[error("the tree reaches {reachable} nodes, but the arena holds {stored}")]
    LeakedNodes { reachable: usize, stored: usize },
}

impl<K: Ord> RedBlackTree<K> {
    /// Checks all of the invariants. On success, returns the black-height of the root.
    ///```
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = (0..1000).collect();
    /// let black_height = tree.check_invariants().unwrap();
    /// assert_eq!(black_height, tree.black_height());
    /// assert!(tree.height() <= 2 * black_height);
    ///```
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if self.sentinel.color.is_red() {
            return Err(InvariantViolation::RedSentinel);
        }
        if self.root.is_nil() {
            return self.check_reachable().map(|()| 0);
        }
        if self.color_of(self.root).is_red() {
            return Err(InvariantViolation::RedRoot(self.root));
        }
        if !self.parent(self.root).is_nil() {
            return Err(InvariantViolation::BrokenParentLink {
                parent: NIL,
                child: self.root,
                link: self.parent(self.root),
            });
        }
        // the black-height counts the sentinel but not the node itself
        let black_height = self.check_subtree(self.root)? - 1;
        self.check_order()?;
        self.check_reachable()?;
        Ok(black_height)
    }

    /// Checks that every node in the arena hangs from the root. Relies on the
    /// subtree sizes, so for a non-empty tree it must run after they are checked.
    fn check_reachable(&self) -> Result<(), InvariantViolation> {
        if self.len() != self.nodes.len() {
            return Err(InvariantViolation::LeakedNodes {
                reachable: self.len(),
                stored: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Checks the local rules everywhere below `x`, and returns the number of
    /// black nodes on each path from `x` (inclusive) down to the sentinel (inclusive).
    fn check_subtree(&self, x: NodeId) -> Result<usize, InvariantViolation> {
        if x.is_nil() {
            return Ok(1);
        }
        let mut heights = [0; 2];
        let mut actual_size = 1;
        for (i, &side) in [Side::Left, Side::Right].iter().enumerate() {
            let child = self.child(x, side);
            if !child.is_nil() {
                if self.parent(child) != x {
                    return Err(InvariantViolation::BrokenParentLink {
                        parent: x,
                        child,
                        link: self.parent(child),
                    });
                }
                if self.color_of(x).is_red() && self.color_of(child).is_red() {
                    return Err(InvariantViolation::RedRedEdge(x, child));
                }
            }
            heights[i] = self.check_subtree(child)?;
            actual_size += self.size(child);
        }
        if heights[0] != heights[1] {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: x,
                left: heights[0],
                right: heights[1],
            });
        }
        if self.size(x) != actual_size {
            return Err(InvariantViolation::SizeMismatch {
                node: x,
                stored: self.size(x),
                actual: actual_size,
            });
        }
        let own = if self.color_of(x).is_black() { 1 } else { 0 };
        Ok(heights[0] + own)
    }

    /// Checks that consecutive nodes in the in-order walk have non-decreasing keys.
    fn check_order(&self) -> Result<(), InvariantViolation> {
        let mut prev = self.subtree_min(self.root);
        let mut x = self.next_node(prev);
        while !x.is_nil() {
            if self.nodes[x.0].key < self.nodes[prev.0].key {
                return Err(InvariantViolation::OutOfOrder(prev, x));
            }
            prev = x;
            x = self.next_node(x);
        }
        Ok(())
    }

    /// Asserts that all of the invariants hold. Otherwise, panics.
    pub fn assert_correctness(&self) {
        if let Err(violation) = self.check_invariants() {
            panic!("red-black tree invariant violated: {}", violation);
        }
    }
}
