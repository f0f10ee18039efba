//! Standard trait implementations for [`RedBlackTree`].

use super::*;
use std::fmt;

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for RedBlackTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl<K: Ord> std::iter::FromIterator<K> for RedBlackTree<K> {
    /// Inserts the keys one by one. This takes `O(n log n)` time.
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut tree = RedBlackTree::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

impl<K> IntoIterator for RedBlackTree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Consumes the tree. The keys come out in ascending order.
    ///```
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    ///```
    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_iter()
    }
}
