//! The red-black tree and its public contract

mod arena;
mod insert;
mod nav;
mod remove;
mod traverse;
mod verify;

use core::cmp::Ordering;
use core::fmt;

use tracing::debug;

use crate::config::TreeConfig;
use crate::error::violation;
use crate::hooks::{OrdHooks, TreeHooks};
use crate::node::{Node, NodeId, Side};

use arena::Arena;

pub use traverse::{Iter, NodeMut};

/// Intrusive red-black tree bound to a set of [`TreeHooks`].
///
/// Not synchronized: callers sharing a tree across threads must serialize
/// access themselves.
pub struct RbTree<T, C = (), H = OrdHooks<T, C>>
where
    H: TreeHooks<T, C>,
{
    arena: Arena<T, C>,
    root: Option<NodeId>,
    len: usize,
    hooks: H,
    config: TreeConfig,
}

impl<T, C, H: TreeHooks<T, C>> RbTree<T, C, H> {
    /// Create an empty tree bound to `hooks`
    pub fn new(hooks: H) -> Self {
        Self::with_config(hooks, TreeConfig::default())
    }

    /// Create an empty tree with explicit configuration
    pub fn with_config(hooks: H, config: TreeConfig) -> Self {
        Self {
            arena: Arena::with_capacity(config.initial_capacity),
            root: None,
            len: 0,
            hooks,
            config,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolve a handle, `None` if it is not live
    pub fn get(&self, id: NodeId) -> Option<&Node<T, C>> {
        self.arena.try_get(id)
    }

    /// Number of live nodes, maintained incrementally
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Exact-match lookup
    pub fn find(&self, item: &T) -> Option<&Node<T, C>> {
        self.find_id(item).map(|id| self.arena.get(id))
    }

    /// Exact-match lookup returning a handle
    pub fn find_id(&self, item: &T) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.arena.get(id);
            cursor = match self.hooks.compare(item, &node.item) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Exact-match lookup with write access to the node's context
    pub fn find_mut(&mut self, item: &T) -> Option<NodeMut<'_, T, C>> {
        let id = self.find_id(item)?;
        Some(NodeMut::new(&mut self.arena, id))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.find_id(item).is_some()
    }

    /// Smallest item
    pub fn first(&self) -> Option<&Node<T, C>> {
        self.root
            .map(|root| self.arena.get(self.extreme(root, Side::Left)))
    }

    /// Largest item
    pub fn last(&self) -> Option<&Node<T, C>> {
        self.root
            .map(|root| self.arena.get(self.extreme(root, Side::Right)))
    }

    /// Count nodes by walking the tree
    pub fn num_items(&self) -> usize {
        self.count_below(self.root)
    }

    fn count_below(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                let node = self.arena.get(id);
                1 + self.count_below(node.left) + self.count_below(node.right)
            }
        }
    }

    /// Nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        self.height_below(self.root)
    }

    fn height_below(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                let node = self.arena.get(id);
                1 + self.height_below(node.left).max(self.height_below(node.right))
            }
        }
    }

    /// Free every node through the hooks and leave the tree empty.
    ///
    /// Nodes go back in post-order. The tree stays usable afterwards.
    pub fn destroy(&mut self) {
        if self.root.is_none() {
            return;
        }
        debug!(len = self.len, "destroying red-black tree");
        self.destroy_below(self.root);
        self.root = None;
        self.len = 0;
        self.arena.clear();
    }

    fn destroy_below(&mut self, id: Option<NodeId>) {
        let Some(id) = id else {
            return;
        };
        let (left, right) = {
            let node = self.arena.get(id);
            (node.left, node.right)
        };
        self.destroy_below(left);
        self.destroy_below(right);
        let node = self.arena.release(id);
        self.hooks.free_node(node);
    }

    /// Run full validation when configured to, failing loudly
    fn check_after_mutation(&self) {
        if self.config.verify_on_mutation {
            if let Err(err) = self.validate() {
                violation(err);
            }
        }
    }
}

impl<T, C, H> Default for RbTree<T, C, H>
where
    H: TreeHooks<T, C> + Default,
{
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<T, C, H: TreeHooks<T, C>> Drop for RbTree<T, C, H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<T, C, H: TreeHooks<T, C>> fmt::Debug for RbTree<T, C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbTree")
            .field("root", &self.root)
            .field("len", &self.len)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::CountingHooks;

    fn tree_of(keys: &[i32]) -> RbTree<i32> {
        let mut tree = RbTree::default();
        for &key in keys {
            assert!(tree.insert(key));
        }
        tree
    }

    #[test]
    fn test_empty_tree() {
        let tree: RbTree<i32> = RbTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.num_items(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.find(&3).is_none());
        assert!(tree.first().is_none());
        assert!(tree.last().is_none());
    }

    #[test]
    fn test_find_and_contains() {
        let tree = tree_of(&[5, 3, 8, 1, 4]);
        assert_eq!(tree.find(&4).map(|n| *n.item()), Some(4));
        assert!(tree.contains(&8));
        assert!(!tree.contains(&7));
        assert_eq!(tree.first().map(|n| *n.item()), Some(1));
        assert_eq!(tree.last().map(|n| *n.item()), Some(8));
    }

    #[test]
    fn test_height_and_count() {
        let tree = tree_of(&[1]);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.num_items(), 1);

        let tree = tree_of(&[1, 2, 0]);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.num_items(), 3);
    }

    #[test]
    fn test_find_mut_writes_context() {
        let mut tree: RbTree<i32, u32> = RbTree::default();
        tree.insert(10);
        tree.insert(20);

        *tree.find_mut(&20).unwrap().context_mut() = 99;
        assert_eq!(*tree.find(&20).unwrap().context(), 99);
        assert_eq!(*tree.find(&10).unwrap().context(), 0);
        assert!(tree.find_mut(&30).is_none());
    }

    #[test]
    fn test_destroy_frees_every_node() {
        let mut tree: RbTree<i32, (), _> = RbTree::new(CountingHooks::new(OrdHooks::new()));
        for key in 0..50 {
            tree.insert(key);
        }
        assert_eq!(tree.hooks().live_nodes(), 50);

        tree.destroy();
        assert_eq!(tree.hooks().live_nodes(), 0);
        assert_eq!(tree.hooks().nodes_freed(), 50);
        assert!(tree.is_empty());
        assert_eq!(tree.num_items(), 0);
        assert_eq!(tree.height(), 0);

        // destroy on an empty tree is a no-op
        tree.destroy();

        // and the tree is reusable
        assert!(tree.insert(7));
        assert_eq!(tree.num_items(), 1);
    }

    #[test]
    fn test_destroyed_tree_is_empty_to_every_query() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4]);
        tree.destroy();

        for key in [1, 3, 4, 5, 8] {
            assert!(tree.find(&key).is_none());
        }
        let mut visits = 0;
        tree.pre_order(|_| visits += 1);
        tree.in_order(|_| visits += 1);
        tree.post_order(|_| visits += 1);
        tree.level_order(|_, _| visits += 1).unwrap();
        assert_eq!(visits, 0);
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.black_height(), Ok(0));
    }

    #[test]
    fn test_destroy_frees_in_post_order() {
        use crate::hooks::QueueEntry;

        #[derive(Default)]
        struct Record {
            freed: Vec<i32>,
        }

        impl TreeHooks<i32> for Record {
            fn compare(&self, a: &i32, b: &i32) -> Ordering {
                a.cmp(b)
            }
            fn allocate_node(&mut self, item: i32) -> Result<Node<i32>, i32> {
                Ok(Node::new(item))
            }
            fn free_node(&mut self, node: Node<i32>) {
                self.freed.push(node.into_item());
            }
            fn allocate_entry(&mut self, node: NodeId) -> Option<QueueEntry> {
                Some(QueueEntry::new(node))
            }
            fn free_entry(&mut self, _entry: QueueEntry) {}
        }

        let mut tree: RbTree<i32, (), Record> = RbTree::default();
        for key in [1, 2, 0] {
            tree.insert(key);
        }
        tree.destroy();
        assert_eq!(tree.hooks().freed, vec![0, 2, 1]);

        // a second destroy frees nothing more
        tree.destroy();
        assert_eq!(tree.hooks().freed.len(), 3);
    }

    #[test]
    fn test_with_config_reserves_capacity() {
        let config = TreeConfig {
            initial_capacity: 64,
            ..TreeConfig::default()
        };
        let tree: RbTree<u8> = RbTree::with_config(OrdHooks::new(), config);
        assert!(tree.arena.capacity() >= 64);
        assert_eq!(tree.config().initial_capacity, 64);
    }
}
