//! Error types for tree operations

use crate::node::{NodeId, Side};

/// Why an insert was rejected. The item is handed back untouched.
#[derive(Debug, thiserror::Error)]
pub enum InsertError<T> {
    #[error("an equal item is already present")]
    Duplicate(T),

    #[error("node allocation failed")]
    AllocFailed(T),
}

impl<T> InsertError<T> {
    /// Recover the rejected item
    pub fn into_item(self) -> T {
        match self {
            InsertError::Duplicate(item) | InsertError::AllocFailed(item) => item,
        }
    }
}

/// Errors that abort a traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraversalError {
    #[error("queue entry allocation failed for node {node} at level {level}")]
    EntryAllocation { node: NodeId, level: usize },
}

/// A broken red-black or linkage invariant.
///
/// Raised by [`RbTree::validate`](crate::RbTree::validate). Inside the
/// engine these are contract breaches and end in a panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("cannot rotate at {node}: no {side} child")]
    MissingRotationChild { node: NodeId, side: Side },

    #[error("handle {node} does not refer to a live node")]
    StaleHandle { node: NodeId },

    #[error("root {root} is red")]
    RedRoot { root: NodeId },

    #[error("root {root} has a parent link")]
    RootHasParent { root: NodeId },

    #[error("red node {node} has red parent {parent}")]
    RedParent { node: NodeId, parent: NodeId },

    #[error("black height differs below {node}: left {left}, right {right}")]
    BlackHeight {
        node: NodeId,
        left: usize,
        right: usize,
    },

    #[error("parent link of {node} does not point back to it")]
    BrokenLink { node: NodeId },

    #[error("in-order sequence is not strictly increasing at {node}")]
    OutOfOrder { node: NodeId },

    #[error("red node {node} has no grandparent")]
    MissingGrandparent { node: NodeId },

    #[error("double-black node {node} has no sibling")]
    MissingSibling { node: NodeId },

    #[error("cached length {cached} disagrees with {counted} reachable nodes")]
    LengthMismatch { cached: usize, counted: usize },
}

/// Log and panic on a contract breach.
#[cold]
#[track_caller]
pub(crate) fn violation(violation: InvariantViolation) -> ! {
    tracing::error!(%violation, "red-black tree invariant violated");
    panic!("red-black tree invariant violated: {violation}");
}
