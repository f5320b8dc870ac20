//! redblack-stress: randomized red-black tree stress run
//!
//! Fills and drains trees of every size up to `max_items` in random order,
//! validating the tree after each operation.
//!
//! ## Configuration
//! - first argument: path to a YAML config file (optional)
//! - REDBLACK_CONFIG: path to a YAML config file (optional)
//! - REDBLACK__SEED, REDBLACK__REPETITIONS, REDBLACK__MAX_ITEMS,
//!   REDBLACK__VISUALIZE: per-field overrides
//! - REDBLACK_LOG: tracing filter (default: info)

use tracing::info;

use redblack_stress::bootstrap::init_tracing;
use redblack_stress::{run, StressConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let path = std::env::args().nth(1);
    let config = StressConfig::load(path.as_deref())?;

    let report = run(&config)?;
    info!(
        trees = report.trees,
        operations = report.operations,
        "all trees passed validation"
    );
    Ok(())
}
