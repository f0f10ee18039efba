// this module contains the red-black tree and the small vocabulary types it is built from.

pub mod red_black;

/// Which child of a node. Used to express every left/right mirror case once.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl std::ops::Not for Side {
    type Output = Side;
    fn not(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The color of a node. The sentinel is always [`Color::Black`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// A handle to a node inside a specific tree.
///
/// A handle is an arena index together with the generation the slot had when
/// the node was allocated. It stays valid while the node is alive, and becomes
/// stale once the node is removed. A freed slot is reused by later insertions,
/// but under a new generation, so a stale handle keeps returning `None`
/// instead of naming the new node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize, pub(crate) u32);

/// The sentinel's id. Every absent parent or child points here.
pub(crate) const NIL: NodeId = NodeId(usize::MAX, 0);

impl NodeId {
    /// Returns `true` for the sentinel.
    pub fn is_nil(self) -> bool {
        self.0 == NIL.0
    }
}
