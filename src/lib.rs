//! An arena-backed red-black tree.
//!
//! [`RedBlackTree`] is an ordered collection of keys with `O(log n)` worst-case
//! search, insertion and deletion, in-order traversal, predecessor and successor
//! queries, and order statistics (`select` and `rank`).
//!
//!```
//! use redblack::{RedBlackTree, TreeError};
//!
//! let mut tree = RedBlackTree::new();
//! for x in vec![10, 5, 15] {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.delete(&5), Ok(5));
//! assert_eq!(tree.delete(&5), Err(TreeError::KeyNotFound));
//!
//! let ten = tree.search(&10).unwrap();
//! let fifteen = tree.successor(ten).unwrap();
//! assert_eq!(tree.key(fifteen), Some(&15));
//! # tree.assert_correctness();
//!```

pub mod data;
pub mod error;
pub mod trees;

pub use error::TreeError;
pub use trees::red_black::{self, InvariantViolation, RedBlackTree};
pub use trees::{Color, NodeId};
