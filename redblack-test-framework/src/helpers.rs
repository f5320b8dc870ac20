//! Fixtures shared by behaviour tests.

use redblack::{Color, CountingHooks, OrdHooks, RbTree, TraversalError, TreeConfig};

/// Tree under test: validated on every mutation, allocations counted.
pub type TestTree = RbTree<i64, (), CountingHooks<OrdHooks<i64>>>;

/// Empty tree that validates itself after each insert and remove.
pub fn checked_tree(node_limit: Option<usize>) -> TestTree {
    let mut hooks = CountingHooks::new(OrdHooks::new());
    hooks.set_node_limit(node_limit);
    RbTree::with_config(hooks, TreeConfig::checked())
}

/// Parse `"3, 1, 2"` (quotes optional) into keys.
///
/// Panics on anything that is not an integer, which is what a step
/// definition wants for a malformed scenario.
pub fn parse_keys(text: &str) -> Vec<i64> {
    text.trim()
        .trim_matches('"')
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .unwrap_or_else(|_| panic!("not an integer key: {part:?}"))
        })
        .collect()
}

pub fn in_order_keys(tree: &TestTree) -> Vec<i64> {
    tree.iter().map(|node| *node.item()).collect()
}

pub fn colored_pre_order(tree: &TestTree) -> Vec<(i64, Color)> {
    let mut out = Vec::new();
    tree.pre_order(|node| out.push((*node.item(), node.color())));
    out
}

/// Keys grouped by depth, root level first
pub fn levels(tree: &mut TestTree) -> Result<Vec<Vec<i64>>, TraversalError> {
    let mut out: Vec<Vec<i64>> = Vec::new();
    tree.level_order(|node, level| {
        if out.len() <= level {
            out.resize_with(level + 1, Vec::new);
        }
        out[level].push(*node.item());
    })?;
    Ok(out)
}
