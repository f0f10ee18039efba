//! Rotations and transplanting. These are the only operations that relink nodes.

use super::*;

impl<K> RedBlackTree<K> {
    /// Replaces `old` with `new` in `parent`'s child slot, or as the root if
    /// `parent` is the sentinel.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_child(parent, Side::Left, new);
        } else {
            self.set_child(parent, Side::Right, new);
        }
    }

    /// Rotates at `x`. With [`Side::Left`], `x`'s right child moves up and `x` becomes
    /// its left child; [`Side::Right`] is the mirror image.
    /// The in-order sequence of keys is preserved.
    ///
    /// ```text
    ///     x                y
    ///    / \     Left     / \
    ///   a   y    ---->   x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    pub(super) fn rotate(&mut self, x: NodeId, side: Side) {
        let y = self.child(x, !side);
        debug_assert!(!x.is_nil() && !y.is_nil(), "rotating around the sentinel");

        let inner = self.child(y, side);
        self.set_child(x, !side, inner);
        if !inner.is_nil() {
            self.set_parent(inner, x);
        }

        let parent = self.parent(x);
        self.set_parent(y, parent);
        self.replace_child(parent, x, y);

        self.set_child(y, side, x);
        self.set_parent(x, y);

        // `y` now spans exactly the subtree `x` used to span
        let size = self.size(x);
        self.header_mut(y).size = size;
        self.recompute_size(x);
    }

    /// Puts the subtree rooted at `v` in the place of the subtree rooted at `u`.
    /// `v`'s parent is set even if `v` is the sentinel, since the delete fix-up
    /// starts from `v` and needs to find its parent.
    pub(super) fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        self.replace_child(parent, u, v);
        self.set_parent(v, parent);
    }
}
