//! Whole-tree invariant checks
//!
//! Red Rule: a red node never has a red parent.
//! Black Rule: every root-to-leaf path crosses the same number of black nodes.
//! External Rule: absent children count as black.

use core::cmp::Ordering;

use crate::error::InvariantViolation;
use crate::hooks::TreeHooks;
use crate::node::NodeId;

use super::RbTree;

impl<T, C, H: TreeHooks<T, C>> RbTree<T, C, H> {
    /// Check ordering, coloring, and linkage of the whole tree
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return match self.len {
                0 => Ok(()),
                cached => Err(InvariantViolation::LengthMismatch { cached, counted: 0 }),
            };
        };

        let root_node = self.arena.get(root);
        if root_node.parent.is_some() {
            return Err(InvariantViolation::RootHasParent { root });
        }
        if root_node.color.is_red() {
            return Err(InvariantViolation::RedRoot { root });
        }

        self.black_height_below(Some(root))?;
        self.check_order()?;

        let counted = self.num_items();
        if counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                cached: self.len,
                counted,
            });
        }
        Ok(())
    }

    /// Black nodes below the root on any path, counting the black leaf.
    /// Zero for an empty tree. Fails if the paths disagree or links are
    /// broken.
    pub fn black_height(&self) -> Result<usize, InvariantViolation> {
        match self.root {
            None => Ok(0),
            Some(root) => {
                let below = self.black_height_below(Some(root))?;
                // the root itself is excluded
                Ok(below - usize::from(self.arena.get(root).color.is_black()))
            }
        }
    }

    /// Black height including `id`, checking red rule, black rule, and
    /// parent back-links along the way
    fn black_height_below(&self, id: Option<NodeId>) -> Result<usize, InvariantViolation> {
        let Some(id) = id else {
            return Ok(1);
        };
        let node = self.arena.get(id);

        for child in [node.left, node.right].into_iter().flatten() {
            let child_node = self.arena.get(child);
            if child_node.parent != Some(id) {
                return Err(InvariantViolation::BrokenLink { node: child });
            }
            if node.color.is_red() && child_node.color.is_red() {
                return Err(InvariantViolation::RedParent {
                    node: child,
                    parent: id,
                });
            }
        }

        let left = self.black_height_below(node.left)?;
        let right = self.black_height_below(node.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeight {
                node: id,
                left,
                right,
            });
        }
        Ok(left + usize::from(node.color.is_black()))
    }

    fn check_order(&self) -> Result<(), InvariantViolation> {
        let mut previous: Option<NodeId> = None;
        let mut result = Ok(());
        let mut check = |id: NodeId| {
            if result.is_err() {
                return;
            }
            if let Some(prev) = previous {
                let ordering = self
                    .hooks
                    .compare(&self.arena.get(prev).item, &self.arena.get(id).item);
                if ordering != Ordering::Less {
                    result = Err(InvariantViolation::OutOfOrder { node: id });
                }
            }
            previous = Some(id);
        };
        self.in_order_ids(self.root, &mut check);
        result
    }

    fn in_order_ids<F: FnMut(NodeId)>(&self, id: Option<NodeId>, visit: &mut F) {
        let Some(id) = id else {
            return;
        };
        let node = self.arena.get(id);
        self.in_order_ids(node.left, visit);
        visit(id);
        self.in_order_ids(node.right, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Color, Side};

    fn tree_of(keys: &[i32]) -> RbTree<i32> {
        let mut tree = RbTree::default();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_valid_trees_pass() {
        assert!(tree_of(&[]).validate().is_ok());
        assert!(tree_of(&[1]).validate().is_ok());
        assert!(tree_of(&(0..100).collect::<Vec<_>>()).validate().is_ok());
    }

    #[test]
    fn test_black_height() {
        assert_eq!(tree_of(&[]).black_height(), Ok(0));
        assert_eq!(tree_of(&[1]).black_height(), Ok(1));
        assert_eq!(tree_of(&[1, 2, 0]).black_height(), Ok(1));
        assert_eq!(tree_of(&[2, 1, 3, 0]).black_height(), Ok(2));
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = tree_of(&[1, 2, 0]);
        let root = tree.root().unwrap();
        tree.set_color(root, Color::Red);
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot { root }));
    }

    #[test]
    fn test_detects_red_parent() {
        let mut tree = tree_of(&[2, 1, 3, 0]);
        let one = tree.find_id(&1).unwrap();
        let zero = tree.find_id(&0).unwrap();
        tree.set_color(one, Color::Red);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedParent {
                node: zero,
                parent: one
            })
        );
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree = tree_of(&[1, 2, 0]);
        let zero = tree.find_id(&0).unwrap();
        tree.set_color(zero, Color::Black);
        assert!(matches!(
            tree.validate(),
            Err(InvariantViolation::BlackHeight { left: 2, right: 1, .. })
        ));
    }

    #[test]
    fn test_black_height_reports_uneven_paths() {
        let mut tree = tree_of(&[1, 2, 0]);
        let zero = tree.find_id(&0).unwrap();
        tree.set_color(zero, Color::Black);
        assert!(matches!(
            tree.black_height(),
            Err(InvariantViolation::BlackHeight { left: 2, right: 1, .. })
        ));
    }

    #[test]
    fn test_detects_out_of_order_items() {
        let mut tree = tree_of(&[1, 2, 0]);
        let zero = tree.find_id(&0).unwrap();
        tree.arena.get_mut(zero).item = 5;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::OutOfOrder {
                node: tree.root().unwrap()
            })
        );
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = tree_of(&[1, 2, 0]);
        let two = tree.find_id(&2).unwrap();
        tree.arena.get_mut(two).parent = None;
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BrokenLink { node: two })
        );
        // restore so teardown walks a sane tree
        tree.arena.get_mut(two).parent = tree.root();
        assert_eq!(tree.side_of(two), Some(Side::Right));
    }
}
