//! Text rendering of a tree, one line per level.
//!
//! A post-order pass stores each node's column width in its context, then a
//! level-order pass prints the nodes. Each node appears as
//! `<item><r|b>[<handle>]` with the item right-aligned to its width.

use std::fmt;

use redblack::{NodeId, RbTree, Side, TraversalError, TreeHooks};

/// Columns every node occupies before its children's share is added.
pub const BASE_WIDTH: usize = 12;

/// Per-node layout written into the context slot by [`render`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub handle: Option<NodeId>,
}

/// Render `tree` as text. Overwrites every node's context.
///
/// Fails only if the hooks refuse a level-order queue entry.
pub fn render<T, H>(tree: &mut RbTree<T, Layout, H>) -> Result<String, TraversalError>
where
    T: fmt::Display,
    H: TreeHooks<T, Layout>,
{
    tree.post_order_mut(|mut node| {
        let below = node.child_context(Side::Left).map_or(0, |c| c.width)
            + node.child_context(Side::Right).map_or(0, |c| c.width);
        let handle = Some(node.id());
        *node.context_mut() = Layout {
            width: BASE_WIDTH + below / 2,
            handle,
        };
    });

    let mut out = String::new();
    let mut last_level = 0;
    tree.level_order(|node, level| {
        if level != last_level {
            out.push('\n');
            last_level = level;
        }
        let layout = node.context();
        let color = if node.color().is_red() { 'r' } else { 'b' };
        let handle = layout.handle.map(|id| id.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{:>width$}{color}[{handle}]",
            node.item(),
            width = layout.width
        ));
    })?;
    Ok(out)
}
