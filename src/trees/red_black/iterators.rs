use super::*;

/// In-order iterator over `(key, color)` pairs, created by [`RedBlackTree::in_order`].
///
/// Each step follows parent links from the previous node, so the iterator holds no stack,
/// and a full traversal takes `O(n)` time. A clone continues independently from the
/// same position.
pub struct Iter<'a, K> {
    tree: &'a RedBlackTree<K>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<'a, K> Clone for Iter<'a, K> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.remaining -= 1;
        self.front = self.tree.next_node(x);
        let node = &self.tree.nodes[x.0];
        Some((&node.key, node.header.color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.remaining -= 1;
        self.back = self.tree.prev_node(x);
        let node = &self.tree.nodes[x.0];
        Some((&node.key, node.header.color))
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}

impl<'a, K> std::iter::FusedIterator for Iter<'a, K> {}

/// In-order iterator over the keys alone, created by [`RedBlackTree::keys`].
pub type Keys<'a, K> = std::iter::Map<Iter<'a, K>, fn((&'a K, Color)) -> &'a K>;

/// Owning in-order iterator, created by `RedBlackTree::into_iter`.
pub struct IntoIter<K> {
    keys: std::vec::IntoIter<K>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.keys.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K> RedBlackTree<K> {
    /// Iterates over the whole tree in ascending key order, yielding each key with its color.
    /// Call it again to restart from the smallest key.
    ///```
    /// use redblack::{RedBlackTree, Color};
    ///
    /// let tree: RedBlackTree<i32> = (17..=89).collect();
    ///
    /// assert_eq!(tree.in_order().map(|(k, _)| *k).collect::<Vec<_>>(), (17..=89).collect::<Vec<_>>());
    /// assert_eq!(tree.in_order().rev().next(), Some((&89, tree.color(tree.max_node().unwrap()).unwrap())));
    /// assert!(tree.in_order().any(|(_, color)| color == Color::Red));
    ///```
    pub fn in_order(&self) -> Iter<'_, K> {
        let front = self.min_node().unwrap_or(NIL);
        let back = self.max_node().unwrap_or(NIL);
        Iter {
            tree: self,
            front,
            back,
            remaining: self.len(),
        }
    }

    /// Iterates over the keys in ascending order.
    pub fn keys<'a>(&'a self) -> Keys<'a, K> {
        let key_only: fn((&'a K, Color)) -> &'a K = |(key, _)| key;
        self.in_order().map(key_only)
    }

    /// Iterates over the node handles in ascending key order.
    pub(super) fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut x = self.min_node().unwrap_or(NIL);
        std::iter::from_fn(move || {
            if x.is_nil() {
                return None;
            }
            let current = x;
            x = self.next_node(x);
            Some(current)
        })
    }

    /// Consumes the tree, returning its keys in ascending order.
    pub(super) fn into_sorted_iter(mut self) -> IntoIter<K> {
        let order: Vec<NodeId> = self.node_ids().collect();
        let keys: Vec<K> = order
            .into_iter()
            .map(|x| self.nodes.remove(x.0).key)
            .collect();
        IntoIter {
            keys: keys.into_iter(),
        }
    }
}
