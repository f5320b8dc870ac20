//! Test framework for the redblack tree
//!
//! Shared fixtures for behaviour scenarios: tree construction with leak
//! accounting, key-list parsing, and snapshots of tree shape.

pub mod helpers;

pub use helpers::{checked_tree, colored_pre_order, in_order_keys, levels, parse_keys, TestTree};
