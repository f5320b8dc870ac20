//! Insertion and the insert fix-up

use core::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::error::{violation, InsertError, InvariantViolation};
use crate::hooks::TreeHooks;
use crate::node::{Color, NodeId, Side};

use super::RbTree;

impl<T, C, H: TreeHooks<T, C>> RbTree<T, C, H> {
    /// Insert `item`, returning `false` on a duplicate or failed allocation
    pub fn insert(&mut self, item: T) -> bool {
        self.try_insert(item).is_ok()
    }

    /// Insert `item`, handing it back on rejection.
    ///
    /// The tree is untouched when an equal item exists or the node hook
    /// refuses to allocate.
    pub fn try_insert(&mut self, item: T) -> Result<NodeId, InsertError<T>> {
        let mut parent = None;
        let mut cursor = self.root;

        while let Some(id) = cursor {
            let node = self.arena.get(id);
            let side = match self.hooks.compare(&item, &node.item) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    debug!(existing = %id, "insert rejected: duplicate item");
                    return Err(InsertError::Duplicate(item));
                }
            };
            parent = Some((id, side));
            cursor = node.child(side);
        }

        let mut node = match self.hooks.allocate_node(item) {
            Ok(node) => node,
            Err(item) => {
                warn!(len = self.len, "insert aborted: node allocation failed");
                return Err(InsertError::AllocFailed(item));
            }
        };
        node.color = Color::Red;
        node.parent = parent.map(|(id, _)| id);
        node.left = None;
        node.right = None;

        let id = self.arena.claim(node);
        match parent {
            None => self.root = Some(id),
            Some((parent_id, side)) => self.arena.get_mut(parent_id).set_child(side, Some(id)),
        }
        self.len += 1;

        self.insert_fixup(id);
        self.check_after_mutation();
        Ok(id)
    }

    /// Restore the red and root rules after attaching red node `n`
    fn insert_fixup(&mut self, mut n: NodeId) {
        loop {
            let Some(parent) = self.arena.get(n).parent else {
                trace!(node = %n, "insert fix-up case 1: recolor root");
                self.set_color(n, Color::Black);
                return;
            };

            if self.color_of(Some(parent)).is_black() {
                trace!(node = %n, "insert fix-up case 2: parent is black");
                return;
            }

            // a red parent is never the root
            let Some(grandparent) = self.arena.get(parent).parent else {
                violation(InvariantViolation::MissingGrandparent { node: n });
            };

            let uncle = self.uncle_of(Some(n));
            if let Some(uncle) = uncle.filter(|&u| self.color_of(Some(u)).is_red()) {
                trace!(node = %n, "insert fix-up case 3: red uncle, push up");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                n = grandparent;
                continue;
            }

            self.insert_rotate(n, parent, grandparent);
            return;
        }
    }

    /// Case 4: red parent, black uncle
    fn insert_rotate(&mut self, mut n: NodeId, mut parent: NodeId, grandparent: NodeId) {
        let parent_side = self.side_of(parent);
        let n_side = self.side_of(n);

        // inner grandchild: straighten into the outer shape first
        if parent_side == Some(Side::Left) && n_side == Some(Side::Right) {
            trace!(node = %n, "insert fix-up case 4.1: rotate left at parent");
            self.rotate_left(parent);
            n = parent;
        } else if parent_side == Some(Side::Right) && n_side == Some(Side::Left) {
            trace!(node = %n, "insert fix-up case 4.1: rotate right at parent");
            self.rotate_right(parent);
            n = parent;
        }
        parent = match self.arena.get(n).parent {
            Some(parent) => parent,
            None => violation(InvariantViolation::MissingGrandparent { node: n }),
        };

        trace!(node = %n, "insert fix-up case 4.2: rotate at grandparent");
        match self.side_of(n) {
            Some(Side::Left) => self.rotate_right(grandparent),
            _ => self.rotate_left(grandparent),
        };
        self.set_color(parent, Color::Black);
        self.set_color(grandparent, Color::Red);
    }
}
