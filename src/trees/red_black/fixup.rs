//! The rebalancing passes run after a structural change.
//!
//! Each pass is a loop. Every iteration first classifies the local configuration
//! into one of the cases below, and then applies it. Left/right mirror images
//! are the same case with the opposite [`Side`].

use super::*;

/// A step of the insertion fix-up, at a red node `z` whose parent is also red.
/// `side` is the side of the parent relative to the grandparent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InsertCase {
    /// The uncle is red: push the grandparent's blackness down and continue from the grandparent.
    RedUncle { side: Side },
    /// The uncle is black and `z` is an inner grandchild: rotate it to the outside.
    InnerChild { side: Side },
    /// The uncle is black and `z` is an outer grandchild: rotate the grandparent and finish.
    OuterChild { side: Side },
}

/// A step of the deletion fix-up, at a node `x` carrying an extra unit of blackness.
/// `side` is the side of `x` relative to its parent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeleteCase {
    /// The sibling is red: rotate it above the parent, so that `x` gets a black sibling.
    RedSibling { side: Side },
    /// The sibling and both its children are black: recolor the sibling and move up.
    BlackNephews { side: Side },
    /// The sibling's far child is black and its near child is red: rotate the red one to the far side.
    NearNephewRed { side: Side },
    /// The sibling's far child is red: rotate the parent and finish.
    FarNephewRed { side: Side },
}

impl<K> RedBlackTree<K> {
    /// Classifies the configuration at `z`, or returns `None` if there is nothing to fix,
    /// i.e., `z`'s parent is black. This includes the case where `z` is the root,
    /// since the root's parent is the sentinel.
    pub(super) fn insert_case(&self, z: NodeId) -> Option<InsertCase> {
        let parent = self.parent(z);
        if self.color_of(parent).is_black() {
            return None;
        }
        // a red parent is never the root, so the grandparent is a real node
        let side = self.side_of(parent);
        let grandparent = self.parent(parent);
        let uncle = self.child(grandparent, !side);
        Some(if self.color_of(uncle).is_red() {
            InsertCase::RedUncle { side }
        } else if self.child(parent, !side) == z {
            InsertCase::InnerChild { side }
        } else {
            InsertCase::OuterChild { side }
        })
    }

    /// Restores the coloring rules after `z` was inserted as a red leaf.
    pub(super) fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(case) = self.insert_case(z) {
            trace!("insert fixup at {:?}: {:?}", z, case);
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            match case {
                InsertCase::RedUncle { side } => {
                    let uncle = self.child(grandparent, !side);
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                }
                InsertCase::InnerChild { side } => {
                    self.rotate(parent, side);
                    // the old parent is now the outer grandchild
                    z = parent;
                }
                InsertCase::OuterChild { side } => {
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate(grandparent, !side);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Classifies the configuration at `x`, or returns `None` if the loop is done,
    /// i.e., `x` is the root or red.
    pub(super) fn delete_case(&self, x: NodeId) -> Option<DeleteCase> {
        if x == self.root || self.color_of(x).is_red() {
            return None;
        }
        let side = self.side_of(x);
        let sibling = self.child(self.parent(x), !side);
        // `x`'s side is short one black node, so the sibling's side has at least one
        debug_assert!(!sibling.is_nil(), "a doubly black node must have a real sibling");
        Some(if self.color_of(sibling).is_red() {
            DeleteCase::RedSibling { side }
        } else if self.color_of(self.child(sibling, !side)).is_red() {
            DeleteCase::FarNephewRed { side }
        } else if self.color_of(self.child(sibling, side)).is_red() {
            DeleteCase::NearNephewRed { side }
        } else {
            DeleteCase::BlackNephews { side }
        })
    }

    /// Restores the coloring rules after a black node was spliced out and replaced by `x`.
    /// `x` may be the sentinel, in which case its parent link names where the splice happened.
    pub(super) fn delete_fixup(&mut self, mut x: NodeId) {
        while let Some(case) = self.delete_case(x) {
            trace!("delete fixup at {:?}: {:?}", x, case);
            let parent = self.parent(x);
            match case {
                DeleteCase::RedSibling { side } => {
                    let sibling = self.child(parent, !side);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate(parent, side);
                }
                DeleteCase::BlackNephews { side } => {
                    let sibling = self.child(parent, !side);
                    self.set_color(sibling, Color::Red);
                    x = parent;
                }
                DeleteCase::NearNephewRed { side } => {
                    let sibling = self.child(parent, !side);
                    let near = self.child(sibling, side);
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate(sibling, !side);
                }
                DeleteCase::FarNephewRed { side } => {
                    let sibling = self.child(parent, !side);
                    let far = self.child(sibling, !side);
                    let parent_color = self.color_of(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate(parent, side);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a tree from `(key, color, parent key)` triples, bypassing the
    /// balancing logic. The first triple is the root.
    fn build(layout: &[(i32, Color, Option<i32>)]) -> RedBlackTree<i32> {
        let mut tree = RedBlackTree::new();
        for &(key, color, parent_key) in layout {
            let parent = parent_key.map_or(NIL, |p| tree.find(&p));
            let id = tree.allocate(
                key,
                Header {
                    color,
                    size: 1,
                    parent,
                    left: NIL,
                    right: NIL,
                },
            );
            if parent.is_nil() {
                tree.root = id;
            } else {
                let side = if key < tree.nodes[parent.0].key {
                    Side::Left
                } else {
                    Side::Right
                };
                tree.set_child(parent, side, id);
                let mut ancestor = parent;
                while !ancestor.is_nil() {
                    tree.nodes[ancestor.0].header.size += 1;
                    ancestor = tree.parent(ancestor);
                }
            }
        }
        tree
    }

    use crate::trees::Color::{Black as B, Red as R};

    #[test]
    fn insert_red_uncle() {
        let tree = build(&[(10, B, None), (5, R, Some(10)), (15, R, Some(10)), (1, R, Some(5))]);
        let z = tree.find(&1);
        assert_eq!(tree.insert_case(z), Some(InsertCase::RedUncle { side: Side::Left }));
    }

    #[test]
    fn insert_inner_and_outer_child() {
        let tree = build(&[(10, B, None), (5, R, Some(10)), (7, R, Some(5))]);
        let z = tree.find(&7);
        assert_eq!(tree.insert_case(z), Some(InsertCase::InnerChild { side: Side::Left }));

        let tree = build(&[(10, B, None), (15, R, Some(10)), (20, R, Some(15))]);
        let z = tree.find(&20);
        assert_eq!(tree.insert_case(z), Some(InsertCase::OuterChild { side: Side::Right }));
    }

    #[test]
    fn insert_nothing_to_fix() {
        let tree = build(&[(10, B, None), (5, R, Some(10))]);
        assert_eq!(tree.insert_case(tree.find(&5)), None);
        assert_eq!(tree.insert_case(tree.find(&10)), None);
    }

    #[test]
    fn inner_child_fixup_rebalances() {
        let mut tree = build(&[(10, B, None), (5, R, Some(10)), (7, R, Some(5))]);
        let z = tree.find(&7);
        tree.insert_fixup(z);
        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), Some(&7));
        assert_eq!(tree.height(), 2);
        tree.assert_correctness();
    }

    #[test]
    fn red_uncle_fixup_recolors_only() {
        let mut tree = build(&[(10, B, None), (5, R, Some(10)), (15, R, Some(10)), (1, R, Some(5))]);
        let root = tree.root;
        tree.insert_fixup(tree.find(&1));
        assert_eq!(tree.root, root);
        assert_eq!(tree.color(tree.find(&5)), Some(B));
        assert_eq!(tree.color(tree.find(&15)), Some(B));
        assert_eq!(tree.color(tree.find(&1)), Some(R));
        tree.assert_correctness();
    }

    /// Removes `key`'s node (which must have at most one child) the way `delete_node` does,
    /// and returns the node that carries the extra blackness.
    fn splice(tree: &mut RedBlackTree<i32>, key: i32) -> NodeId {
        let y = tree.find(&key);
        let x = if tree.left(y).is_nil() { tree.right(y) } else { tree.left(y) };
        let mut ancestor = tree.parent(y);
        while !ancestor.is_nil() {
            tree.nodes[ancestor.0].header.size -= 1;
            ancestor = tree.parent(ancestor);
        }
        tree.transplant(y, x);
        tree.nodes.remove(y.0);
        x
    }

    #[test]
    fn delete_red_sibling() {
        let mut tree = build(&[
            (10, B, None),
            (5, B, Some(10)),
            (20, R, Some(10)),
            (15, B, Some(20)),
            (25, B, Some(20)),
        ]);
        let x = splice(&mut tree, 5);
        assert!(x.is_nil());
        assert_eq!(tree.delete_case(x), Some(DeleteCase::RedSibling { side: Side::Left }));
        tree.delete_fixup(x);
        tree.assert_correctness();
    }

    #[test]
    fn delete_black_nephews() {
        let mut tree = build(&[(10, B, None), (5, B, Some(10)), (15, B, Some(10))]);
        let x = splice(&mut tree, 15);
        assert_eq!(tree.delete_case(x), Some(DeleteCase::BlackNephews { side: Side::Right }));
        tree.delete_fixup(x);
        assert_eq!(tree.color(tree.find(&5)), Some(R));
        tree.assert_correctness();
    }

    #[test]
    fn delete_near_nephew_red() {
        let mut tree = build(&[(10, B, None), (5, B, Some(10)), (15, B, Some(10)), (12, R, Some(15))]);
        let x = splice(&mut tree, 5);
        assert_eq!(tree.delete_case(x), Some(DeleteCase::NearNephewRed { side: Side::Left }));
        tree.delete_fixup(x);
        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), Some(&12));
        tree.assert_correctness();
    }

    #[test]
    fn delete_far_nephew_red() {
        let mut tree = build(&[(10, B, None), (5, B, Some(10)), (15, B, Some(10)), (1, R, Some(5))]);
        let x = splice(&mut tree, 15);
        assert_eq!(tree.delete_case(x), Some(DeleteCase::FarNephewRed { side: Side::Right }));
        tree.delete_fixup(x);
        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), Some(&5));
        assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), vec![1, 5, 10]);
        tree.assert_correctness();
    }

    #[test]
    fn delete_nothing_to_fix() {
        let tree = build(&[(10, B, None), (5, R, Some(10))]);
        assert_eq!(tree.delete_case(tree.find(&10)), None);
        assert_eq!(tree.delete_case(tree.find(&5)), None);
    }
}
