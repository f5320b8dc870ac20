//! Relationship queries and rotations
//!
//! Every query accepts an absent node and treats it as a black leaf, so the
//! fix-up code can ask about uncles and nephews without checking first.

use crate::error::{violation, InvariantViolation};
use crate::hooks::TreeHooks;
use crate::node::{Color, NodeId, Side};

use super::RbTree;

impl<T, C, H: TreeHooks<T, C>> RbTree<T, C, H> {
    /// Color of `id`; absent nodes are black
    pub fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.arena.get(id).color)
    }

    pub fn parent_of(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.and_then(|id| self.arena.get(id).parent)
    }

    pub fn grandparent_of(&self, id: Option<NodeId>) -> Option<NodeId> {
        self.parent_of(self.parent_of(id))
    }

    /// The other child of `id`'s parent
    pub fn sibling_of(&self, id: Option<NodeId>) -> Option<NodeId> {
        let id = id?;
        let parent = self.arena.get(self.arena.get(id).parent?);
        if parent.left == Some(id) {
            parent.right
        } else {
            parent.left
        }
    }

    /// The sibling of `id`'s parent
    pub fn uncle_of(&self, id: Option<NodeId>) -> Option<NodeId> {
        self.sibling_of(self.parent_of(id))
    }

    pub(super) fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena.get_mut(id).color = color;
    }

    /// Which child slot of its parent `id` occupies, `None` for the root
    pub(super) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.arena.get(self.arena.get(id).parent?);
        if parent.left == Some(id) {
            Some(Side::Left)
        } else if parent.right == Some(id) {
            Some(Side::Right)
        } else {
            violation(InvariantViolation::BrokenLink { node: id })
        }
    }

    /// Put `replacement` where `old` hangs, updating the root when `old` has
    /// no parent. `replacement`'s own parent link is left to the caller.
    pub(super) fn replace_in_parent(
        &mut self,
        old: NodeId,
        parent: Option<NodeId>,
        replacement: Option<NodeId>,
    ) {
        match parent {
            None => self.root = replacement,
            Some(parent_id) => {
                let parent = self.arena.get_mut(parent_id);
                if parent.left == Some(old) {
                    parent.left = replacement;
                } else if parent.right == Some(old) {
                    parent.right = replacement;
                } else {
                    violation(InvariantViolation::BrokenLink { node: old });
                }
            }
        }
    }

    /// Walk to the last node in direction `side` starting at `id`
    pub(super) fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self.arena.get(id).child(side) {
            id = next;
        }
        id
    }

    /// In-order successor of a node with a right subtree
    pub(super) fn successor_below(&self, id: NodeId) -> Option<NodeId> {
        self.arena
            .get(id)
            .right
            .map(|right| self.extreme(right, Side::Left))
    }

    /// Rotate `n` down to the `side` side of its opposite child.
    ///
    /// ```text
    ///  rotate(n, Left):
    ///       n                r
    ///     /   \            /   \
    ///    l     r          n    T4
    ///   / \   / \        / \
    ///  T1 T2 T3 T4      l  T3
    ///                  / \
    ///                 T1 T2
    /// ```
    ///
    /// Returns the promoted node. Panics if the promoted child is missing.
    pub(super) fn rotate(&mut self, n: NodeId, side: Side) -> NodeId {
        let up_side = side.opposite();
        let Some(pivot) = self.arena.get(n).child(up_side) else {
            violation(InvariantViolation::MissingRotationChild { node: n, side: up_side });
        };
        let parent = self.arena.get(n).parent;
        let inner = self.arena.get(pivot).child(side);

        self.arena.get_mut(n).set_child(up_side, inner);
        if let Some(inner) = inner {
            self.arena.get_mut(inner).parent = Some(n);
        }

        self.replace_in_parent(n, parent, Some(pivot));
        {
            let pivot_node = self.arena.get_mut(pivot);
            pivot_node.parent = parent;
            pivot_node.set_child(side, Some(n));
        }
        self.arena.get_mut(n).parent = Some(pivot);

        pivot
    }

    /// Promote `n.right` into `n`'s position
    pub(super) fn rotate_left(&mut self, n: NodeId) -> NodeId {
        self.rotate(n, Side::Left)
    }

    /// Promote `n.left` into `n`'s position
    pub(super) fn rotate_right(&mut self, n: NodeId) -> NodeId {
        self.rotate(n, Side::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::OrdHooks;
    use crate::node::Node;

    /// Snapshot of (item, parent item, left item, right item) for each node.
    fn links(tree: &RbTree<char>) -> Vec<(char, Option<char>, Option<char>, Option<char>)> {
        let item = |id: Option<NodeId>| id.map(|id| *tree.arena.get(id).item());
        let mut out = Vec::new();
        tree.in_order(|node: &Node<char>| {
            out.push((*node.item(), item(node.parent()), item(node.left()), item(node.right())));
        });
        out
    }

    fn id(tree: &RbTree<char>, c: char) -> NodeId {
        tree.find_id(&c).unwrap()
    }

    //        D
    //     /     \
    //    B       F
    //   / \     / \
    //  A   C   E   G
    fn seven() -> RbTree<char> {
        let mut tree = RbTree::new(OrdHooks::new());
        for c in ['D', 'B', 'F', 'A', 'C', 'E', 'G'] {
            tree.insert(c);
        }
        tree
    }

    #[test]
    fn test_relationship_queries() {
        let tree = seven();
        let (a, b, c, d, f) = (id(&tree, 'A'), id(&tree, 'B'), id(&tree, 'C'), id(&tree, 'D'), id(&tree, 'F'));

        assert_eq!(tree.parent_of(Some(a)), Some(b));
        assert_eq!(tree.parent_of(Some(d)), None);
        assert_eq!(tree.parent_of(None), None);

        assert_eq!(tree.grandparent_of(Some(a)), Some(d));
        assert_eq!(tree.grandparent_of(Some(b)), None);

        assert_eq!(tree.sibling_of(Some(a)), Some(c));
        assert_eq!(tree.sibling_of(Some(c)), Some(a));
        assert_eq!(tree.sibling_of(Some(b)), Some(f));
        assert_eq!(tree.sibling_of(Some(d)), None);

        assert_eq!(tree.uncle_of(Some(a)), Some(f));
        assert_eq!(tree.uncle_of(Some(b)), None);
        assert_eq!(tree.uncle_of(Some(d)), None);
    }

    #[test]
    fn test_absent_nodes_are_black() {
        let tree = seven();
        assert_eq!(tree.color_of(None), Color::Black);
        assert_eq!(tree.color_of(tree.root()), Color::Black);
        let a = id(&tree, 'A');
        assert_eq!(tree.color_of(tree.arena.get(a).left()), Color::Black);
    }

    #[test]
    fn test_rotate_left_at_root() {
        let mut tree = seven();
        let d = id(&tree, 'D');
        let f = id(&tree, 'F');

        assert_eq!(tree.rotate_left(d), f);
        assert_eq!(tree.root(), Some(f));
        assert_eq!(
            links(&tree),
            vec![
                ('A', Some('B'), None, None),
                ('B', Some('D'), Some('A'), Some('C')),
                ('C', Some('B'), None, None),
                ('D', Some('F'), Some('B'), Some('E')),
                ('E', Some('D'), None, None),
                ('F', None, Some('D'), Some('G')),
                ('G', Some('F'), None, None),
            ]
        );
    }

    #[test]
    fn test_rotate_round_trip_restores_links() {
        let mut tree = seven();
        let before = links(&tree);
        let d = id(&tree, 'D');

        let f = tree.rotate_left(d);
        assert_eq!(tree.rotate_right(f), d);
        assert_eq!(links(&tree), before);
        assert_eq!(tree.root(), Some(d));

        let b = id(&tree, 'B');
        let a = tree.rotate_right(b);
        assert_eq!(tree.parent_of(Some(a)), Some(d));
        assert_eq!(tree.rotate_left(a), b);
        assert_eq!(links(&tree), before);
    }

    #[test]
    fn test_rotate_inner_subtree() {
        let mut tree = seven();
        let b = id(&tree, 'B');
        let c = id(&tree, 'C');

        assert_eq!(tree.rotate_left(b), c);
        let node = tree.arena.get(c);
        assert_eq!(node.left(), Some(b));
        assert_eq!(tree.parent_of(Some(c)), tree.root());
        assert_eq!(tree.arena.get(tree.root().unwrap()).left(), Some(c));
    }

    #[test]
    #[should_panic(expected = "no right child")]
    fn test_rotate_without_child_panics() {
        let mut tree = seven();
        let g = id(&tree, 'G');
        tree.rotate_left(g);
    }

    #[test]
    fn test_successor_and_extremes() {
        let tree = seven();
        let d = id(&tree, 'D');
        assert_eq!(tree.successor_below(d), Some(id(&tree, 'E')));
        assert_eq!(tree.successor_below(id(&tree, 'A')), None);
        assert_eq!(tree.extreme(d, Side::Left), id(&tree, 'A'));
        assert_eq!(tree.extreme(d, Side::Right), id(&tree, 'G'));
        assert_eq!(tree.side_of(id(&tree, 'F')), Some(Side::Right));
        assert_eq!(tree.side_of(d), None);
    }
}
