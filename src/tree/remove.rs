//! Removal and the delete fix-up

use tracing::{debug, trace};

use crate::error::{violation, InvariantViolation};
use crate::hooks::TreeHooks;
use crate::node::{Color, NodeId, Side};

use super::RbTree;

impl<T, C, H: TreeHooks<T, C>> RbTree<T, C, H> {
    /// Remove the item equal to `item`. Returns `false` if none was found.
    ///
    /// The node that leaves the tree goes back through
    /// [`TreeHooks::free_node`] carrying the removed item.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(mut target) = self.find_id(item) else {
            debug!("remove: item not found");
            return false;
        };

        // two children: trade payloads with the successor and unlink that
        if self.arena.get(target).is_internal() {
            if let Some(successor) = self.successor_below(target) {
                let (node, next) = self.arena.pair_mut(target, successor);
                core::mem::swap(&mut node.item, &mut next.item);
                core::mem::swap(&mut node.context, &mut next.context);
                target = successor;
            }
        }

        let (left, right, color) = {
            let node = self.arena.get(target);
            (node.left, node.right, node.color)
        };
        let child = left.or(right);

        if color.is_black() {
            match child {
                Some(child) if self.color_of(Some(child)).is_red() => {
                    trace!(node = %target, "remove: red child takes black");
                    self.set_color(child, Color::Black);
                }
                _ => self.remove_fixup(target),
            }
        }

        let parent = self.arena.get(target).parent;
        self.replace_in_parent(target, parent, child);
        if let Some(child) = child {
            self.arena.get_mut(child).parent = parent;
        }

        let node = self.arena.release(target);
        self.hooks.free_node(node);
        self.len -= 1;

        self.check_after_mutation();
        true
    }

    /// Rebalance around black node `n` before it is spliced out.
    ///
    /// The path through `n` is about to lose a black node; each pass either
    /// repays it locally or moves the deficit to the parent.
    fn remove_fixup(&mut self, mut n: NodeId) {
        loop {
            let Some(parent) = self.arena.get(n).parent else {
                trace!(node = %n, "delete fix-up case 1: reached root");
                return;
            };
            let side = match self.side_of(n) {
                Some(side) => side,
                None => violation(InvariantViolation::BrokenLink { node: n }),
            };
            let away = side.opposite();

            if self.color_of(self.sibling_of(Some(n))).is_red() {
                trace!(node = %n, "delete fix-up case 2: red sibling");
                if let Some(sibling) = self.sibling_of(Some(n)) {
                    self.set_color(parent, Color::Red);
                    self.set_color(sibling, Color::Black);
                    self.rotate(parent, side);
                }
            }

            let Some(sibling) = self.sibling_of(Some(n)) else {
                violation(InvariantViolation::MissingSibling { node: n });
            };
            let near = self.arena.get(sibling).child(side);
            let far = self.arena.get(sibling).child(away);
            let nephews_black =
                self.color_of(near).is_black() && self.color_of(far).is_black();
            let sibling_black = self.color_of(Some(sibling)).is_black();

            if self.color_of(Some(parent)).is_black() && sibling_black && nephews_black {
                trace!(node = %n, "delete fix-up case 3: push deficit to parent");
                self.set_color(sibling, Color::Red);
                n = parent;
                continue;
            }

            if self.color_of(Some(parent)).is_red() && sibling_black && nephews_black {
                trace!(node = %n, "delete fix-up case 4: recolor parent");
                self.set_color(sibling, Color::Red);
                self.set_color(parent, Color::Black);
                return;
            }

            self.remove_rotate(n, parent, sibling, side);
            return;
        }
    }

    /// Cases 5 and 6: black sibling with at least one red nephew
    fn remove_rotate(&mut self, n: NodeId, parent: NodeId, mut sibling: NodeId, side: Side) {
        let away = side.opposite();
        let near = self.arena.get(sibling).child(side);
        let far = self.arena.get(sibling).child(away);

        if self.color_of(far).is_black() {
            if let Some(near) = near.filter(|&id| self.color_of(Some(id)).is_red()) {
                trace!(node = %n, "delete fix-up case 5: rotate red near nephew out");
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                sibling = self.rotate(sibling, away);
            }
        }

        trace!(node = %n, "delete fix-up case 6: rotate at parent");
        let parent_color = self.color_of(Some(parent));
        self.set_color(sibling, parent_color);
        self.set_color(parent, Color::Black);
        if let Some(far) = self.arena.get(sibling).child(away) {
            self.set_color(far, Color::Black);
        }
        self.rotate(parent, side);
    }
}
