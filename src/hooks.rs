//! Caller-supplied capabilities
//!
//! The tree never allocates, frees, or compares items on its own. Every
//! such decision goes through a [`TreeHooks`] implementation chosen when the
//! tree is built.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use crate::node::{Node, NodeId};

/// One pending visit in a level-order queue
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    node: NodeId,
}

impl QueueEntry {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Allocation, comparison, and queue-entry hooks a tree is bound to.
pub trait TreeHooks<T, C = ()> {
    /// Three-way comparison of two items
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Build a node for `item`. Returning `Err(item)` aborts the insert
    /// with the tree unchanged.
    fn allocate_node(&mut self, item: T) -> Result<Node<T, C>, T>;

    /// Take back a node that left the tree
    fn free_node(&mut self, node: Node<T, C>);

    /// Build a level-order queue entry. `None` aborts the traversal.
    fn allocate_entry(&mut self, node: NodeId) -> Option<QueueEntry>;

    /// Release a level-order queue entry
    fn free_entry(&mut self, entry: QueueEntry);
}

/// Hooks ordering items by their [`Ord`] implementation.
pub struct OrdHooks<T, C = ()> {
    _marker: PhantomData<fn(T, C)>,
}

impl<T, C> OrdHooks<T, C> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T, C> Default for OrdHooks<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for OrdHooks<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrdHooks")
    }
}

impl<T: Ord, C: Default> TreeHooks<T, C> for OrdHooks<T, C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }

    fn allocate_node(&mut self, item: T) -> Result<Node<T, C>, T> {
        Ok(Node::new(item))
    }

    fn free_node(&mut self, node: Node<T, C>) {
        drop(node);
    }

    fn allocate_entry(&mut self, node: NodeId) -> Option<QueueEntry> {
        Some(QueueEntry::new(node))
    }

    fn free_entry(&mut self, _entry: QueueEntry) {}
}

/// Hooks ordering items with a comparison closure.
pub struct CompareWith<F, C = ()> {
    compare: F,
    _marker: PhantomData<fn(C)>,
}

impl<F, C> CompareWith<F, C> {
    pub fn new(compare: F) -> Self {
        Self {
            compare,
            _marker: PhantomData,
        }
    }
}

impl<F, C> fmt::Debug for CompareWith<F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompareWith")
    }
}

impl<T, C, F> TreeHooks<T, C> for CompareWith<F, C>
where
    C: Default,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    fn allocate_node(&mut self, item: T) -> Result<Node<T, C>, T> {
        Ok(Node::new(item))
    }

    fn free_node(&mut self, node: Node<T, C>) {
        drop(node);
    }

    fn allocate_entry(&mut self, node: NodeId) -> Option<QueueEntry> {
        Some(QueueEntry::new(node))
    }

    fn free_entry(&mut self, _entry: QueueEntry) {}
}

/// Wraps other hooks, tracking live allocations and optionally capping them.
///
/// A capped allocation fails the same way a real allocator running out of
/// memory would, which makes it the tool for exercising failure paths.
#[derive(Debug, Default)]
pub struct CountingHooks<H> {
    inner: H,
    node_limit: Option<usize>,
    entry_limit: Option<usize>,
    live_nodes: usize,
    live_entries: usize,
    nodes_allocated: usize,
    nodes_freed: usize,
}

impl<H> CountingHooks<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            node_limit: None,
            entry_limit: None,
            live_nodes: 0,
            live_entries: 0,
            nodes_allocated: 0,
            nodes_freed: 0,
        }
    }

    /// Fail node allocation once `limit` nodes are live
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Fail entry allocation once `limit` entries are live
    pub fn with_entry_limit(mut self, limit: usize) -> Self {
        self.entry_limit = Some(limit);
        self
    }

    pub fn set_node_limit(&mut self, limit: Option<usize>) {
        self.node_limit = limit;
    }

    pub fn set_entry_limit(&mut self, limit: Option<usize>) {
        self.entry_limit = limit;
    }

    pub fn live_nodes(&self) -> usize {
        self.live_nodes
    }

    pub fn live_entries(&self) -> usize {
        self.live_entries
    }

    pub fn nodes_allocated(&self) -> usize {
        self.nodes_allocated
    }

    pub fn nodes_freed(&self) -> usize {
        self.nodes_freed
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<T, C, H: TreeHooks<T, C>> TreeHooks<T, C> for CountingHooks<H> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.inner.compare(a, b)
    }

    fn allocate_node(&mut self, item: T) -> Result<Node<T, C>, T> {
        if self.node_limit.is_some_and(|limit| self.live_nodes >= limit) {
            return Err(item);
        }
        let node = self.inner.allocate_node(item)?;
        self.live_nodes += 1;
        self.nodes_allocated += 1;
        Ok(node)
    }

    fn free_node(&mut self, node: Node<T, C>) {
        self.live_nodes -= 1;
        self.nodes_freed += 1;
        self.inner.free_node(node);
    }

    fn allocate_entry(&mut self, node: NodeId) -> Option<QueueEntry> {
        if self.entry_limit.is_some_and(|limit| self.live_entries >= limit) {
            return None;
        }
        let entry = self.inner.allocate_entry(node)?;
        self.live_entries += 1;
        Some(entry)
    }

    fn free_entry(&mut self, entry: QueueEntry) {
        self.live_entries -= 1;
        self.inner.free_entry(entry);
    }
}
