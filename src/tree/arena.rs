//! Slot storage for tree nodes
//!
//! Links between nodes are `NodeId` handles into this arena, so rotations
//! only reassign handles and never fight the borrow checker.

use crate::error::{violation, InvariantViolation};
use crate::node::{Node, NodeId};

#[derive(Debug)]
enum Slot<T, C> {
    Occupied(Node<T, C>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Debug)]
pub(crate) struct Arena<T, C> {
    slots: Vec<Slot<T, C>>,
    free_head: Option<NodeId>,
}

impl<T, C> Arena<T, C> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    /// Store `node`, reusing a vacant slot when one exists
    pub(crate) fn claim(&mut self, node: Node<T, C>) -> NodeId {
        match self.free_head {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                let Slot::Vacant { next_free } = *slot else {
                    violation(InvariantViolation::StaleHandle { node: id });
                };
                self.free_head = next_free;
                *slot = Slot::Occupied(node);
                id
            }
            None => {
                let id = NodeId::from_index(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Take the node out of its slot
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T, C> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match self.slots.get_mut(id.index()).map(|slot| core::mem::replace(slot, vacant)) {
            Some(Slot::Occupied(node)) => {
                self.free_head = Some(id);
                node
            }
            Some(previous) => {
                self.slots[id.index()] = previous;
                violation(InvariantViolation::StaleHandle { node: id })
            }
            None => violation(InvariantViolation::StaleHandle { node: id }),
        }
    }

    pub(crate) fn try_get(&self, id: NodeId) -> Option<&Node<T, C>> {
        match self.slots.get(id.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    #[track_caller]
    pub(crate) fn get(&self, id: NodeId) -> &Node<T, C> {
        match self.try_get(id) {
            Some(node) => node,
            None => violation(InvariantViolation::StaleHandle { node: id }),
        }
    }

    #[track_caller]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<T, C> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Occupied(node)) => node,
            _ => violation(InvariantViolation::StaleHandle { node: id }),
        }
    }

    /// Borrow two distinct nodes mutably at once
    #[track_caller]
    pub(crate) fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Node<T, C>, &mut Node<T, C>) {
        assert_ne!(a, b, "pair_mut needs two distinct nodes");
        let (low, high, swapped) = if a.index() < b.index() {
            (a, b, false)
        } else {
            (b, a, true)
        };
        if high.index() >= self.slots.len() {
            violation(InvariantViolation::StaleHandle { node: high });
        }
        let (head, tail) = self.slots.split_at_mut(high.index());
        let first = match &mut head[low.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => violation(InvariantViolation::StaleHandle { node: low }),
        };
        let second = match &mut tail[0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => violation(InvariantViolation::StaleHandle { node: high }),
        };
        if swapped {
            (second, first)
        } else {
            (first, second)
        }
    }

    /// Forget every slot. Nodes still stored are dropped.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_reuses_released_slots() {
        let mut arena: Arena<u32, ()> = Arena::with_capacity(4);
        let a = arena.claim(Node::new(1));
        let b = arena.claim(Node::new(2));
        assert_ne!(a, b);

        assert_eq!(arena.release(a).into_item(), 1);
        let c = arena.claim(Node::new(3));
        assert_eq!(c, a);
        assert_eq!(*arena.get(c).item(), 3);
        assert_eq!(*arena.get(b).item(), 2);
    }

    #[test]
    fn test_try_get_vacant() {
        let mut arena: Arena<u32, ()> = Arena::with_capacity(0);
        let a = arena.claim(Node::new(1));
        arena.release(a);
        assert!(arena.try_get(a).is_none());
    }

    #[test]
    fn test_pair_mut_order() {
        let mut arena: Arena<u32, ()> = Arena::with_capacity(2);
        let a = arena.claim(Node::new(1));
        let b = arena.claim(Node::new(2));

        let (x, y) = arena.pair_mut(b, a);
        assert_eq!((*x.item(), *y.item()), (2, 1));
        core::mem::swap(&mut x.item, &mut y.item);
        assert_eq!(*arena.get(a).item(), 2);
    }

    #[test]
    #[should_panic(expected = "does not refer to a live node")]
    fn test_release_twice_panics() {
        let mut arena: Arena<u32, ()> = Arena::with_capacity(1);
        let a = arena.claim(Node::new(1));
        arena.release(a);
        arena.release(a);
    }
}
