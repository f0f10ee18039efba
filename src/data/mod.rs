//! Key types that need validation before they can be stored in a tree.
//!
//! The tree itself only requires `K: Ord`. Some natural key types, like `f64`,
//! are only totally ordered once a few values are excluded. The wrappers here
//! perform that exclusion at construction time, and work with
//! [`crate::RedBlackTree::try_insert`].

use crate::TreeError;
use std::cmp::Ordering;
use std::convert::TryFrom;

/// An `f64` that is never NaN. Ordered by [`f64::total_cmp`], so `-0.0 < 0.0`.
///
///```
/// use redblack::{RedBlackTree, TreeError, data::NotNan};
///
/// let mut tree: RedBlackTree<NotNan> = RedBlackTree::new();
/// tree.try_insert(2.5).unwrap();
/// tree.try_insert(-1.0).unwrap();
/// assert!(matches!(tree.try_insert(f64::NAN), Err(TreeError::InvalidKey(_))));
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.minimum().unwrap().get(), -1.0);
/// # tree.assert_correctness();
///```
#[derive(Clone, Copy, Debug)]
pub struct NotNan(f64);

impl NotNan {
    pub fn new(value: f64) -> Result<NotNan, TreeError> {
        if value.is_nan() {
            Err(TreeError::InvalidKey("NaN is not totally ordered".to_string()))
        } else {
            Ok(NotNan(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for NotNan {
    type Error = TreeError;
    fn try_from(value: f64) -> Result<NotNan, TreeError> {
        NotNan::new(value)
    }
}

impl PartialEq for NotNan {
    fn eq(&self, other: &NotNan) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NotNan {}

impl PartialOrd for NotNan {
    fn partial_cmp(&self, other: &NotNan) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NotNan {
    fn cmp(&self, other: &NotNan) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
