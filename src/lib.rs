//! Redblack - intrusive red-black tree
//!
//! A self-balancing ordered set whose node storage, comparison, and
//! level-order queue entries are all supplied by the caller through
//! [`TreeHooks`]. Nodes live in an arena and are addressed by [`NodeId`]
//! handles, so rotations only rewrite links.
//!
//! ```
//! use redblack::RbTree;
//!
//! let mut tree: RbTree<u32> = RbTree::default();
//! for key in [5, 1, 9] {
//!     tree.insert(key);
//! }
//! assert!(tree.contains(&9));
//! let keys: Vec<u32> = tree.iter().map(|node| *node.item()).collect();
//! assert_eq!(keys, vec![1, 5, 9]);
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod node;
mod tree;

pub use config::TreeConfig;
pub use error::{InsertError, InvariantViolation, TraversalError};
pub use hooks::{CompareWith, CountingHooks, OrdHooks, QueueEntry, TreeHooks};
pub use node::{Color, Node, NodeId, Side};
pub use tree::{Iter, NodeMut, RbTree};
