/// An enum representing the color of a node in a red-black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// An index into the node arena of a red-black tree.
///
/// Index 0 is permanently reserved for the shared sentinel, so an absent child
/// or an absent parent is always expressed as `SENTINEL` and never as a
/// separate option type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeId(pub usize);

/// The id of the shared sentinel node.
pub const SENTINEL: NodeId = NodeId(0);

impl NodeId {
    pub fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

/// A struct representing an internal node of a red-black tree.
///
/// `element` is `None` only on the sentinel and is never mutated after the
/// node is created; deletion relinks nodes instead of overwriting elements.
/// `count` is the multiplicity of the element and is at least 1 on real nodes.
pub struct Node<T> {
    pub element: Option<T>,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
    pub color: Color,
    pub count: usize,
}

impl<T> Node<T> {
    /// Returns a new unlinked red node with multiplicity 1.
    pub fn new(element: T) -> Self {
        Node {
            element: Some(element),
            left: SENTINEL,
            right: SENTINEL,
            parent: SENTINEL,
            color: Color::Red,
            count: 1,
        }
    }

    /// Returns the shared sentinel node. It is black, carries no element, and
    /// must only ever occupy index 0 of the arena.
    pub fn sentinel() -> Self {
        Node {
            element: None,
            left: SENTINEL,
            right: SENTINEL,
            parent: SENTINEL,
            color: Color::Black,
            count: 0,
        }
    }
}
