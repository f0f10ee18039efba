use thiserror::Error;

/// Errors returned by the public operations of [`crate::RedBlackTree`].
///
/// Every error is reported before the tree is modified, so the tree is
/// still valid and unchanged after an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("the tree is empty")]
    EmptyTree,
    #[error("key not found")]
    KeyNotFound,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("index {index} out of bounds for a tree of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
