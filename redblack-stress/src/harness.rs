//! Randomized insert/remove stress runs.
//!
//! For each repetition and each size `1..max_items`, a tree is filled from a
//! random permutation and drained in a second random order. The tree is
//! validated and counted after every single operation.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use redblack::{CountingHooks, InvariantViolation, OrdHooks, RbTree, TraversalError};
use tracing::{debug, info};

use crate::config::StressConfig;
use crate::permutation::Permutation;
use crate::visualize::{render, Layout};

/// Tree type driven by the harness.
pub type StressTree = RbTree<u32, Layout, CountingHooks<OrdHooks<u32, Layout>>>;

/// Which half of a round an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Insert,
    Remove,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Insert => write!(f, "insert"),
            Phase::Remove => write!(f, "remove"),
        }
    }
}

/// Errors that end a stress run.
#[derive(Debug, thiserror::Error)]
pub enum StressError {
    #[error("{phase} of {item} (size {size}) left an invalid tree: {source}")]
    Invariant {
        phase: Phase,
        item: u32,
        size: u32,
        source: InvariantViolation,
    },

    #[error("{phase} of {item} (size {size}) was refused")]
    Refused { phase: Phase, item: u32, size: u32 },

    #[error("after {phase} of {item} expected {expected} items, counted {counted}")]
    CountMismatch {
        phase: Phase,
        item: u32,
        expected: usize,
        counted: usize,
    },

    #[error("{live} nodes still allocated after the run")]
    Leak { live: usize },

    #[error("visualization failed: {0}")]
    Visualize(#[from] TraversalError),
}

/// Totals from a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StressReport {
    /// Trees filled and drained
    pub trees: usize,
    /// Inserts plus removes performed
    pub operations: usize,
    /// Tallest tree seen right after a fill
    pub max_height: usize,
}

/// Run the stress loop described by `config`.
pub fn run(config: &StressConfig) -> Result<StressReport, StressError> {
    info!(
        seed = config.seed,
        repetitions = config.repetitions,
        max_items = config.max_items,
        "stress run starting"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut tree: StressTree =
        RbTree::with_config(CountingHooks::new(OrdHooks::new()), config.tree.clone());
    let mut report = StressReport::default();

    for repetition in 0..config.repetitions {
        for size in 1..config.max_items {
            let mut permutation = Permutation::new(size, StdRng::from_rng(&mut rng));

            for (step, item) in permutation.by_ref().enumerate() {
                if !tree.insert(item) {
                    return Err(StressError::Refused {
                        phase: Phase::Insert,
                        item,
                        size,
                    });
                }
                check(&tree, Phase::Insert, item, size, step + 1)?;
                report.operations += 1;
            }

            report.max_height = report.max_height.max(tree.height());
            if config.visualize {
                let picture = render(&mut tree)?;
                info!(size, "\n{picture}");
            }

            permutation.reset();
            for (step, item) in permutation.by_ref().enumerate() {
                if !tree.remove(&item) {
                    return Err(StressError::Refused {
                        phase: Phase::Remove,
                        item,
                        size,
                    });
                }
                check(&tree, Phase::Remove, item, size, size as usize - step - 1)?;
                report.operations += 1;
            }

            report.trees += 1;
        }

        if repetition % 100 == 0 {
            debug!(repetition, trees = report.trees, "stress progress");
        }
    }

    let live = tree.hooks().live_nodes();
    if live != 0 {
        return Err(StressError::Leak { live });
    }

    info!(
        trees = report.trees,
        operations = report.operations,
        max_height = report.max_height,
        "stress run finished"
    );
    Ok(report)
}

fn check(
    tree: &StressTree,
    phase: Phase,
    item: u32,
    size: u32,
    expected: usize,
) -> Result<(), StressError> {
    tree.validate().map_err(|source| StressError::Invariant {
        phase,
        item,
        size,
        source,
    })?;

    let counted = tree.num_items();
    if counted != expected {
        return Err(StressError::CountMismatch {
            phase,
            item,
            expected,
            counted,
        });
    }
    Ok(())
}
