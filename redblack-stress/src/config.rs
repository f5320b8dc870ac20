//! Stress run configuration.
//!
//! Supports YAML file and environment variable overrides.

use redblack::TreeConfig;
use serde::Deserialize;

/// Config file looked up in the working directory (any YAML extension).
pub const DEFAULT_CONFIG_FILE: &str = "redblack";
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "REDBLACK_CONFIG";
/// Prefix for per-field overrides, e.g. `REDBLACK__MAX_ITEMS=32`.
pub const CONFIG_ENV_PREFIX: &str = "REDBLACK";

/// Parameters of a stress run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Seed for every random permutation in the run.
    pub seed: u64,
    /// Full passes over all tree sizes.
    pub repetitions: u32,
    /// Trees of sizes `1..max_items` are built each repetition.
    pub max_items: u32,
    /// Log a rendering of each tree once it is fully built.
    pub visualize: bool,
    /// Settings for the tree under test.
    pub tree: TreeConfig,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            repetitions: 10_000,
            max_items: 128,
            visualize: false,
            tree: TreeConfig::default(),
        }
    }
}

impl StressConfig {
    /// Load configuration from file and environment.
    ///
    /// Sources, later ones overriding earlier:
    /// 1. `redblack.yaml` in the working directory, if present
    /// 2. `path`, if given
    /// 3. the file named by `REDBLACK_CONFIG`, if set
    /// 4. `REDBLACK__*` environment variables
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        use ::config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Small, fast configuration for tests.
    pub fn for_test() -> Self {
        Self {
            repetitions: 2,
            max_items: 24,
            tree: TreeConfig::checked(),
            ..Self::default()
        }
    }
}
