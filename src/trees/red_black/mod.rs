//! Implementation of red-black trees.
//!
//! A red-black tree is a binary search tree in which every node is colored red or black,
//! such that the root is black, no red node has a red child, and every path from a node
//! down to an empty leaf passes through the same number of black nodes.
//! These rules keep the height below `2 * log2(n + 1)`, so searching, inserting and
//! deleting all take `O(log n)` worst-case time.
//!
//! The nodes are stored in an arena and refer to each other by [`NodeId`].
//! Every tree owns its own sentinel node, which stands for all the empty leaves
//! and for the root's parent, and is always black.
//! Every node also keeps the size of its subtree, which gives `O(log n)`
//! [`RedBlackTree::select`] and [`RedBlackTree::rank`].

// these are separate files for parts of the implementation,
// their contents are methods on `RedBlackTree`.
mod fixup;
mod implementations;
mod iterators;
mod rotations;
mod validation;

pub use iterators::{IntoIter, Iter, Keys};
pub use validation::InvariantViolation;

use super::{Color, NodeId, Side, NIL};
use crate::TreeError;
use log::{debug, trace};
use slab::Slab;
use std::convert::TryFrom;

/// The part of a node shared with the sentinel: color, subtree size, and links.
#[derive(Clone, Debug)]
struct Header {
    color: Color,
    size: usize,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

impl Header {
    fn sentinel() -> Header {
        Header {
            color: Color::Black,
            size: 0,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }
}

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    header: Header,
    // must match the handle's generation for the handle to be live
    generation: u32,
}

/// A red-black tree holding keys of type `K`. Equal keys are allowed.
///
///```
/// use redblack::RedBlackTree;
///
/// let mut tree: RedBlackTree<i32> = (1..20).collect();
/// tree.delete(&7).unwrap();
///
/// assert_eq!(tree.len(), 18);
/// assert!(tree.search(&7).is_err());
/// assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), (1..20).filter(|&x| x != 7).collect::<Vec<_>>());
/// # tree.assert_correctness();
///```
#[derive(Clone)]
pub struct RedBlackTree<K> {
    nodes: Slab<Node<K>>,
    root: NodeId,
    sentinel: Header,
    // bumped on every allocation, and never reset, not even by `clear`
    generation: u32,
}

impl<K> RedBlackTree<K> {
    /// Creates an empty [`RedBlackTree`].
    pub fn new() -> Self {
        RedBlackTree {
            nodes: Slab::new(),
            root: NIL,
            sentinel: Header::sentinel(),
            generation: 0,
        }
    }

    /// Creates an empty [`RedBlackTree`] whose arena can hold `capacity` nodes
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackTree {
            nodes: Slab::with_capacity(capacity),
            root: NIL,
            sentinel: Header::sentinel(),
            generation: 0,
        }
    }

    /// The number of nodes the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases unused arena memory. Slots freed by deletions in the middle
    /// of the arena are kept, since live handles point past them.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.size(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Removes every key. All handles become stale, and stay stale after
    /// new keys are inserted.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
        self.sentinel = Header::sentinel();
    }

    /// The root's handle, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.live(self.root)
    }

    /// The root's color. An empty tree reports the sentinel's color, which is black.
    pub fn root_color(&self) -> Color {
        self.color_of(self.root)
    }

    /// The key stored at a live handle.
    pub fn key(&self, node: NodeId) -> Option<&K> {
        self.live(node)?;
        Some(&self.nodes[node.0].key)
    }

    /// The color of a live handle.
    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.live(node)?;
        Some(self.nodes[node.0].header.color)
    }

    /// The number of nodes on the longest root-to-leaf path. `0` for an empty tree.
    pub fn height(&self) -> usize {
        self.height_from(self.root)
    }

    fn height_from(&self, x: NodeId) -> usize {
        if x.is_nil() {
            0
        } else {
            1 + std::cmp::max(self.height_from(self.left(x)), self.height_from(self.right(x)))
        }
    }

    /// The number of black nodes on any path from the root (exclusive) down to the
    /// sentinel (inclusive). Follows the leftmost path, so it is only meaningful
    /// when the invariants hold.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut x = self.root;
        while !x.is_nil() {
            x = self.left(x);
            if self.color_of(x).is_black() {
                count += 1;
            }
        }
        count
    }

    /// The leftmost node, or `None` if the tree is empty.
    pub fn min_node(&self) -> Option<NodeId> {
        self.live(self.root).map(|root| self.subtree_min(root))
    }

    /// The rightmost node, or `None` if the tree is empty.
    pub fn max_node(&self) -> Option<NodeId> {
        self.live(self.root).map(|root| self.subtree_max(root))
    }

    /// The smallest key.
    ///```
    /// use redblack::{RedBlackTree, TreeError};
    ///
    /// let mut tree: RedBlackTree<i32> = RedBlackTree::new();
    /// assert_eq!(tree.minimum(), Err(TreeError::EmptyTree));
    /// tree.extend(vec![5, 3, 8]);
    /// assert_eq!(tree.minimum(), Ok(&3));
    /// assert_eq!(tree.maximum(), Ok(&8));
    ///```
    pub fn minimum(&self) -> Result<&K, TreeError> {
        let node = self.min_node().ok_or(TreeError::EmptyTree)?;
        Ok(&self.nodes[node.0].key)
    }

    /// The largest key.
    pub fn maximum(&self) -> Result<&K, TreeError> {
        let node = self.max_node().ok_or(TreeError::EmptyTree)?;
        Ok(&self.nodes[node.0].key)
    }

    /// The node following `node` in key order. `None` for the last node, the sentinel,
    /// or a stale handle.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?;
        self.live(self.next_node(node))
    }

    /// The node preceding `node` in key order. `None` for the first node, the sentinel,
    /// or a stale handle.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?;
        self.live(self.prev_node(node))
    }

    /// Returns the `index`-th smallest key, counting from `0`.
    ///```
    /// use redblack::{RedBlackTree, TreeError};
    ///
    /// let tree: RedBlackTree<i32> = (10..20).rev().collect();
    /// assert_eq!(tree.select(0), Ok(&10));
    /// assert_eq!(tree.select(9), Ok(&19));
    /// assert_eq!(tree.select(10), Err(TreeError::IndexOutOfBounds { index: 10, len: 10 }));
    ///```
    pub fn select(&self, index: usize) -> Result<&K, TreeError> {
        let node = self.select_node(index).ok_or(TreeError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        Ok(&self.nodes[node.0].key)
    }

    /// Returns the handle of the `index`-th smallest node.
    pub fn select_node(&self, mut index: usize) -> Option<NodeId> {
        if index >= self.len() {
            return None;
        }
        let mut x = self.root;
        loop {
            let left_size = self.size(self.left(x));
            if index < left_size {
                x = self.left(x);
            } else if index == left_size {
                return Some(x);
            } else {
                index -= left_size + 1;
                x = self.right(x);
            }
        }
    }

    /// The in-order index of a live node.
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.live(node)?;
        let mut index = self.size(self.left(node));
        let mut x = node;
        while x != self.root {
            let p = self.parent(x);
            if self.right(p) == x {
                index += self.size(self.left(p)) + 1;
            }
            x = p;
        }
        Some(index)
    }

    /// Removes the node at a live handle and returns its key, or `None` for a
    /// stale handle or the sentinel. A handle stays stale even after its slot
    /// is reused by a later insertion.
    ///
    /// If the node has two children, the key of its successor is moved into it,
    /// and the successor's slot is the one that gets freed. Afterwards `node`
    /// names the successor's key, and the successor's old handle is stale.
    pub fn remove_node(&mut self, node: NodeId) -> Option<K> {
        self.live(node)?;
        Some(self.delete_node(node))
    }

    /// Removes and returns the smallest key.
    pub fn pop_min(&mut self) -> Result<K, TreeError> {
        let node = self.min_node().ok_or(TreeError::EmptyTree)?;
        Ok(self.delete_node(node))
    }

    /// Removes and returns the largest key.
    pub fn pop_max(&mut self) -> Result<K, TreeError> {
        let node = self.max_node().ok_or(TreeError::EmptyTree)?;
        Ok(self.delete_node(node))
    }

    //////////////// sentinel-aware accessors ////////////////
    // Every structural read and write goes through these, so that
    // the sentinel can be used as if it were an ordinary black node.

    fn header(&self, x: NodeId) -> &Header {
        if x.is_nil() {
            &self.sentinel
        } else {
            &self.nodes[x.0].header
        }
    }

    fn header_mut(&mut self, x: NodeId) -> &mut Header {
        if x.is_nil() {
            &mut self.sentinel
        } else {
            &mut self.nodes[x.0].header
        }
    }

    fn live(&self, x: NodeId) -> Option<NodeId> {
        match self.nodes.get(x.0) {
            Some(node) if node.generation == x.1 => Some(x),
            _ => None,
        }
    }

    /// Stores a new node in the arena under a fresh generation.
    fn allocate(&mut self, key: K, header: Header) -> NodeId {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let index = self.nodes.insert(Node {
            key,
            header,
            generation,
        });
        NodeId(index, generation)
    }

    fn parent(&self, x: NodeId) -> NodeId {
        self.header(x).parent
    }

    fn left(&self, x: NodeId) -> NodeId {
        self.header(x).left
    }

    fn right(&self, x: NodeId) -> NodeId {
        self.header(x).right
    }

    fn child(&self, x: NodeId, side: Side) -> NodeId {
        match side {
            Side::Left => self.left(x),
            Side::Right => self.right(x),
        }
    }

    fn set_parent(&mut self, x: NodeId, parent: NodeId) {
        self.header_mut(x).parent = parent;
    }

    fn set_child(&mut self, x: NodeId, side: Side, child: NodeId) {
        let header = self.header_mut(x);
        match side {
            Side::Left => header.left = child,
            Side::Right => header.right = child,
        }
    }

    /// Which child of its parent `x` is. The caller guarantees `x` is not the root.
    fn side_of(&self, x: NodeId) -> Side {
        if self.left(self.parent(x)) == x {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn color_of(&self, x: NodeId) -> Color {
        self.header(x).color
    }

    fn set_color(&mut self, x: NodeId, color: Color) {
        debug_assert!(!(x.is_nil() && color.is_red()), "the sentinel must stay black");
        if !x.is_nil() {
            self.nodes[x.0].header.color = color;
        }
    }

    fn size(&self, x: NodeId) -> usize {
        self.header(x).size
    }

    fn recompute_size(&mut self, x: NodeId) {
        if !x.is_nil() {
            let size = self.size(self.left(x)) + self.size(self.right(x)) + 1;
            self.nodes[x.0].header.size = size;
        }
    }

    fn subtree_min(&self, mut x: NodeId) -> NodeId {
        while !self.left(x).is_nil() {
            x = self.left(x);
        }
        x
    }

    fn subtree_max(&self, mut x: NodeId) -> NodeId {
        while !self.right(x).is_nil() {
            x = self.right(x);
        }
        x
    }

    /// In-order successor of a live node, or the sentinel.
    fn next_node(&self, mut x: NodeId) -> NodeId {
        if !self.right(x).is_nil() {
            return self.subtree_min(self.right(x));
        }
        let mut y = self.parent(x);
        while !y.is_nil() && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// In-order predecessor of a live node, or the sentinel.
    fn prev_node(&self, mut x: NodeId) -> NodeId {
        if !self.left(x).is_nil() {
            return self.subtree_max(self.left(x));
        }
        let mut y = self.parent(x);
        while !y.is_nil() && x == self.left(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    /// Splices out a live node and rebalances. See [`RedBlackTree::remove_node`].
    fn delete_node(&mut self, z: NodeId) -> K {
        // `y` is the node whose slot is freed. It has at most one child.
        let y = if self.left(z).is_nil() || self.right(z).is_nil() {
            z
        } else {
            let y = self.subtree_min(self.right(z));
            if let Some((z_node, y_node)) = self.nodes.get2_mut(z.0, y.0) {
                std::mem::swap(&mut z_node.key, &mut y_node.key);
            }
            y
        };
        let x = if self.left(y).is_nil() {
            self.right(y)
        } else {
            self.left(y)
        };
        let removed_color = self.color_of(y);

        let mut ancestor = self.parent(y);
        while !ancestor.is_nil() {
            self.nodes[ancestor.0].header.size -= 1;
            ancestor = self.parent(ancestor);
        }

        trace!("delete: splicing out {:?}, replaced by {:?}", y, x);
        self.transplant(y, x);
        let removed = self.nodes.remove(y.0);

        if removed_color.is_black() {
            self.delete_fixup(x);
        }
        if self.root.is_nil() {
            self.sentinel = Header::sentinel();
        }
        removed.key
    }
}

impl<K: Ord> RedBlackTree<K> {
    /// Finds the node holding the key, or the sentinel.
    fn find(&self, key: &K) -> NodeId {
        let mut x = self.root;
        while !x.is_nil() {
            let node = &self.nodes[x.0];
            x = match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => return x,
                std::cmp::Ordering::Less => node.header.left,
                std::cmp::Ordering::Greater => node.header.right,
            };
        }
        NIL
    }

    /// Returns the handle of a node holding `key`. If several nodes hold equal keys,
    /// which one is returned is unspecified.
    ///```
    /// use redblack::{RedBlackTree, TreeError};
    ///
    /// let tree: RedBlackTree<i32> = vec![10, 5, 15].into_iter().collect();
    /// let node = tree.search(&5).unwrap();
    /// assert_eq!(tree.key(node), Some(&5));
    /// assert_eq!(tree.search(&6), Err(TreeError::KeyNotFound));
    ///```
    pub fn search(&self, key: &K) -> Result<NodeId, TreeError> {
        let x = self.find(key);
        if x.is_nil() {
            Err(TreeError::KeyNotFound)
        } else {
            Ok(x)
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        !self.find(key).is_nil()
    }

    /// The number of keys strictly smaller than `key`.
    ///```
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = vec![1, 3, 3, 7].into_iter().collect();
    /// assert_eq!(tree.rank(&0), 0);
    /// assert_eq!(tree.rank(&3), 1);
    /// assert_eq!(tree.rank(&4), 3);
    /// assert_eq!(tree.rank(&100), 4);
    ///```
    pub fn rank(&self, key: &K) -> usize {
        let mut count = 0;
        let mut x = self.root;
        while !x.is_nil() {
            if self.nodes[x.0].key < *key {
                count += self.size(self.left(x)) + 1;
                x = self.right(x);
            } else {
                x = self.left(x);
            }
        }
        count
    }

    /// Inserts a key. Keys equal to existing ones are placed after them in the
    /// in-order sequence.
    ///```
    /// use redblack::{RedBlackTree, Color};
    ///
    /// let mut tree = RedBlackTree::new();
    /// for x in 1..20 {
    ///     tree.insert(x);
    /// }
    /// assert_eq!(tree.root_color(), Color::Black);
    /// assert!(tree.height() <= 8);
    /// # tree.assert_correctness();
    ///```
    pub fn insert(&mut self, key: K) {
        let mut y = NIL;
        let mut x = self.root;
        let mut side = Side::Left;
        // every node on the search path gains one descendant
        while !x.is_nil() {
            y = x;
            let node = &mut self.nodes[x.0];
            node.header.size += 1;
            if key < node.key {
                side = Side::Left;
                x = node.header.left;
            } else {
                side = Side::Right;
                x = node.header.right;
            }
        }

        let z = self.allocate(
            key,
            Header {
                color: Color::Red,
                size: 1,
                parent: y,
                left: NIL,
                right: NIL,
            },
        );
        if y.is_nil() {
            self.root = z;
        } else {
            self.set_child(y, side, z);
        }
        trace!("insert: placed {:?} as {:?} child of {:?}", z, side, y);

        self.insert_fixup(z);
    }

    /// Converts `raw` into a key and inserts it. Keys that fail the conversion are
    /// rejected with [`TreeError::InvalidKey`] and the tree is left untouched.
    pub fn try_insert<T>(&mut self, raw: T) -> Result<(), TreeError>
    where
        K: TryFrom<T, Error = TreeError>,
    {
        match K::try_from(raw) {
            Ok(key) => {
                self.insert(key);
                Ok(())
            }
            Err(err) => {
                debug!("try_insert: rejected key: {}", err);
                Err(err)
            }
        }
    }

    /// Removes one node holding `key` and returns the stored key.
    ///
    /// Fails with [`TreeError::EmptyTree`] if the tree is empty, and with
    /// [`TreeError::KeyNotFound`] if no node holds the key. In both cases
    /// the tree is unchanged.
    ///```
    /// use redblack::{RedBlackTree, TreeError, Color};
    ///
    /// let mut tree: RedBlackTree<i32> = vec![10, 5, 15].into_iter().collect();
    /// assert_eq!(tree.delete(&5), Ok(5));
    /// assert_eq!(tree.delete(&5), Err(TreeError::KeyNotFound));
    /// assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), vec![10, 15]);
    /// assert_eq!(tree.root_color(), Color::Black);
    /// # tree.assert_correctness();
    ///```
    pub fn delete(&mut self, key: &K) -> Result<K, TreeError> {
        if self.is_empty() {
            debug!("delete: tree is empty");
            return Err(TreeError::EmptyTree);
        }
        let z = self.find(key);
        if z.is_nil() {
            debug!("delete: key not found");
            return Err(TreeError::KeyNotFound);
        }
        Ok(self.delete_node(z))
    }
}
