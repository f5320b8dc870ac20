//! Depth-first and level-order traversals
//!
//! Recursion depth equals the tree height, which the balancing rules keep
//! below `2 * log2(n + 1)`.

use std::collections::VecDeque;

use tracing::warn;

use crate::error::TraversalError;
use crate::hooks::{QueueEntry, TreeHooks};
use crate::node::{Color, Node, NodeId, Side};

use super::arena::Arena;
use super::RbTree;

/// Where a depth-first walk visits the node relative to its subtrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}

/// Visitor access to a node: the item and color are readable, only the
/// context may be written. Links are never exposed for writing.
pub struct NodeMut<'a, T, C> {
    arena: &'a mut Arena<T, C>,
    id: NodeId,
}

impl<'a, T, C> NodeMut<'a, T, C> {
    pub(super) fn new(arena: &'a mut Arena<T, C>, id: NodeId) -> Self {
        Self { arena, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn item(&self) -> &T {
        &self.arena.get(self.id).item
    }

    pub fn color(&self) -> Color {
        self.arena.get(self.id).color
    }

    pub fn context(&self) -> &C {
        &self.arena.get(self.id).context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.arena.get_mut(self.id).context
    }

    /// Context of the child on `side`, if that child exists
    pub fn child_context(&self, side: Side) -> Option<&C> {
        let child = self.arena.get(self.id).child(side)?;
        Some(&self.arena.get(child).context)
    }
}

impl<T, C, H: TreeHooks<T, C>> RbTree<T, C, H> {
    /// Visit node, then left subtree, then right subtree
    pub fn pre_order<F: FnMut(&Node<T, C>)>(&self, mut visit: F) {
        self.pre_order_below(self.root, &mut visit);
    }

    fn pre_order_below<F: FnMut(&Node<T, C>)>(&self, id: Option<NodeId>, visit: &mut F) {
        let Some(id) = id else {
            return;
        };
        let node = self.arena.get(id);
        visit(node);
        self.pre_order_below(node.left, visit);
        self.pre_order_below(node.right, visit);
    }

    /// Visit nodes in ascending item order
    pub fn in_order<F: FnMut(&Node<T, C>)>(&self, mut visit: F) {
        self.in_order_below(self.root, &mut visit);
    }

    fn in_order_below<F: FnMut(&Node<T, C>)>(&self, id: Option<NodeId>, visit: &mut F) {
        let Some(id) = id else {
            return;
        };
        let node = self.arena.get(id);
        self.in_order_below(node.left, visit);
        visit(node);
        self.in_order_below(node.right, visit);
    }

    /// Visit left subtree, then right subtree, then node
    pub fn post_order<F: FnMut(&Node<T, C>)>(&self, mut visit: F) {
        self.post_order_below(self.root, &mut visit);
    }

    fn post_order_below<F: FnMut(&Node<T, C>)>(&self, id: Option<NodeId>, visit: &mut F) {
        let Some(id) = id else {
            return;
        };
        let node = self.arena.get(id);
        self.post_order_below(node.left, visit);
        self.post_order_below(node.right, visit);
        visit(node);
    }

    /// Pre-order visit with write access to each node's context.
    ///
    /// Parents are visited before their children, so a visitor can push
    /// state down the tree.
    pub fn pre_order_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(NodeMut<'_, T, C>),
    {
        let root = self.root;
        Self::depth_first_mut(&mut self.arena, root, Order::Pre, &mut visit);
    }

    /// In-order visit with write access to each node's context
    pub fn in_order_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(NodeMut<'_, T, C>),
    {
        let root = self.root;
        Self::depth_first_mut(&mut self.arena, root, Order::In, &mut visit);
    }

    /// Post-order visit with write access to each node's context.
    ///
    /// Children are finished before their parent, so a visitor can fold
    /// child contexts into the parent's.
    pub fn post_order_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(NodeMut<'_, T, C>),
    {
        let root = self.root;
        Self::depth_first_mut(&mut self.arena, root, Order::Post, &mut visit);
    }

    fn depth_first_mut<F>(arena: &mut Arena<T, C>, id: Option<NodeId>, order: Order, visit: &mut F)
    where
        F: FnMut(NodeMut<'_, T, C>),
    {
        let Some(id) = id else {
            return;
        };
        let (left, right) = {
            let node = arena.get(id);
            (node.left, node.right)
        };
        if order == Order::Pre {
            visit(NodeMut::new(arena, id));
        }
        Self::depth_first_mut(arena, left, order, visit);
        if order == Order::In {
            visit(NodeMut::new(arena, id));
        }
        Self::depth_first_mut(arena, right, order, visit);
        if order == Order::Post {
            visit(NodeMut::new(arena, id));
        }
    }

    /// Visit nodes level by level, left to right, passing the depth.
    ///
    /// Every queue entry is built through the hooks before the first visit.
    /// If one cannot be allocated, all entries built so far are released and
    /// the traversal ends without visiting anything.
    pub fn level_order<F>(&mut self, mut visit: F) -> Result<(), TraversalError>
    where
        F: FnMut(&Node<T, C>, usize),
    {
        let height = self.height();
        if height == 0 {
            return Ok(());
        }

        let mut levels: Vec<VecDeque<QueueEntry>> = Vec::with_capacity(height);
        levels.resize_with(height, VecDeque::new);

        if let Err(err) = self.enqueue_levels(self.root, 0, &mut levels) {
            warn!(%err, "level-order traversal aborted");
            for entry in levels.into_iter().flatten() {
                self.hooks.free_entry(entry);
            }
            return Err(err);
        }

        for (level, queue) in levels.into_iter().enumerate() {
            for entry in queue {
                visit(self.arena.get(entry.node()), level);
                self.hooks.free_entry(entry);
            }
        }
        Ok(())
    }

    fn enqueue_levels(
        &mut self,
        id: Option<NodeId>,
        level: usize,
        levels: &mut [VecDeque<QueueEntry>],
    ) -> Result<(), TraversalError> {
        let Some(id) = id else {
            return Ok(());
        };
        let entry = self
            .hooks
            .allocate_entry(id)
            .ok_or(TraversalError::EntryAllocation { node: id, level })?;
        levels[level].push_back(entry);

        let (left, right) = {
            let node = self.arena.get(id);
            (node.left, node.right)
        };
        self.enqueue_levels(left, level + 1, levels)?;
        self.enqueue_levels(right, level + 1, levels)
    }

    /// Borrowing in-order iterator
    pub fn iter(&self) -> Iter<'_, T, C, H> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.extreme(root, Side::Left)),
            remaining: self.len,
        }
    }

    /// In-order next node, following parent links when there is no right
    /// subtree
    fn next_in_order(&self, id: NodeId) -> Option<NodeId> {
        if let Some(successor) = self.successor_below(id) {
            return Some(successor);
        }
        let mut child = id;
        let mut parent = self.arena.get(id).parent;
        while let Some(up) = parent {
            if self.arena.get(up).left == Some(child) {
                return Some(up);
            }
            child = up;
            parent = self.arena.get(up).parent;
        }
        None
    }
}

/// In-order iterator over a tree's nodes
pub struct Iter<'a, T, C, H: TreeHooks<T, C>> {
    tree: &'a RbTree<T, C, H>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T, C, H: TreeHooks<T, C>> Iterator for Iter<'a, T, C, H> {
    type Item = &'a Node<T, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.next_in_order(id);
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.tree.arena.get(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C, H: TreeHooks<T, C>> IntoIterator for &'a RbTree<T, C, H> {
    type Item = &'a Node<T, C>;
    type IntoIter = Iter<'a, T, C, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
