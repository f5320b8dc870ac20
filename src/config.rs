//! Tree configuration.
//!
//! Deserializable so that embedding applications can carry it inside their
//! own YAML or environment-driven config.

use serde::Deserialize;

/// Default number of arena slots reserved up front.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Construction-time tree settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Arena slots reserved when the tree is created.
    pub initial_capacity: usize,
    /// Run a full validation after every insert and remove, panicking on
    /// the first violation. Quadratic; meant for tests and stress runs.
    pub verify_on_mutation: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            verify_on_mutation: false,
        }
    }
}

impl TreeConfig {
    /// Config for tests: every mutation is validated.
    pub fn checked() -> Self {
        Self {
            verify_on_mutation: true,
            ..Self::default()
        }
    }
}
