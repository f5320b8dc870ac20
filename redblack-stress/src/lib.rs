//! Stress tooling for the redblack tree
//!
//! Drives a tree through seeded random insert/remove sequences, validating
//! every step, and renders trees as text for debugging.

pub mod bootstrap;
pub mod config;
pub mod harness;
pub mod permutation;
pub mod visualize;

pub use config::StressConfig;
pub use harness::{run, Phase, StressError, StressReport, StressTree};
pub use permutation::Permutation;
pub use visualize::{render, Layout};
