//! Red-black tree node model

use core::fmt;

/// Handle to a node stored in the tree's arena.
///
/// Handles stay valid while the node is live. A removal may move items
/// between nodes (two-child reduction), so a handle taken before a remove
/// should be resolved again through `find`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        let index = u32::try_from(index).unwrap_or_else(|_| panic!("node arena exceeds u32 slots"));
        Self(index)
    }

    /// Arena slot index backing this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Red-Black tree node color
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    Red = 1,
}

impl Color {
    /// Check if color is red
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    /// Check if color is black
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Which child slot of a parent a node occupies
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The mirror side
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Red-Black tree node
///
/// The item is owned by the caller in the sense that the tree never drops
/// it: a node leaving the tree is always handed to
/// [`TreeHooks::free_node`](crate::TreeHooks::free_node). The context slot
/// is caller scratch space the balancing code never reads.
#[derive(Debug, Clone)]
pub struct Node<T, C = ()> {
    pub(crate) item: T,
    pub(crate) context: C,
    pub(crate) color: Color,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T, C: Default> Node<T, C> {
    /// Create a detached node with a default context
    pub fn new(item: T) -> Self {
        Self::with_context(item, C::default())
    }
}

impl<T, C> Node<T, C> {
    /// Create a detached node carrying `context`
    pub fn with_context(item: T, context: C) -> Self {
        Self {
            item,
            context,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Child on `side`
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Both children present
    pub fn is_internal(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// No children present
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Give back the item and context
    pub fn into_parts(self) -> (T, C) {
        (self.item, self.context)
    }

    pub fn into_item(self) -> T {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        assert!(Color::Red.is_red());
        assert!(!Color::Red.is_black());
        assert!(Color::Black.is_black());
        assert_eq!(Color::Black as u8, 0);
        assert_eq!(Color::Red as u8, 1);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.to_string(), "left");
    }

    #[test]
    fn test_new_node_is_detached_red() {
        let node: Node<u32> = Node::new(7);
        assert_eq!(*node.item(), 7);
        assert!(node.color().is_red());
        assert!(node.parent().is_none());
        assert!(node.is_leaf());
        assert!(!node.is_internal());
    }

    #[test]
    fn test_child_by_side() {
        let mut node: Node<u32, usize> = Node::with_context(1, 40);
        node.set_child(Side::Right, Some(NodeId::from_index(3)));
        assert_eq!(node.child(Side::Right), Some(NodeId::from_index(3)));
        assert_eq!(node.child(Side::Left), None);
        *node.context_mut() += 2;
        assert_eq!(node.into_parts(), (1, 42));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::from_index(12).to_string(), "#12");
        assert_eq!(NodeId::from_index(12).index(), 12);
    }
}
