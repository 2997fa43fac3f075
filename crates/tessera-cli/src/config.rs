//! YAML configuration file.
//!
//! ```yaml
//! iterations: 18
//! solver:
//!   grid_steps: 360
//!   residual_tolerance: 1.0e-6
//! oracle:
//!   name: custom
//!   width: 6
//!   equal_groups: [[0, 3]]
//!   parity: { positions: [0, 1], sign: plus }
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tessera_core::SolverConfig;
use tessera_oracle::OracleSpec;
use tracing::debug;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Numerical settings for the solver.
    pub solver: SolverConfig,
    /// Default round count.
    pub iterations: Option<usize>,
    /// Predicate used when no `--preset` or `--ratio` is given.
    pub oracle: Option<OracleSpec>,
}

impl CliConfig {
    /// Parse and validate YAML source.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: CliConfig =
            serde_yaml_ng::from_str(source).context("Invalid configuration file")?;
        config.solver.validate()?;
        if let Some(spec) = &config.oracle {
            spec.validate()
                .with_context(|| format!("Invalid predicate '{}'", spec.name))?;
        }
        Ok(config)
    }
}

/// Load the configuration file, or the defaults when no path is given.
pub fn load(path: Option<&str>) -> Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    if !Path::new(path).exists() {
        anyhow::bail!("Config file not found: {path}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read config: {path}"))?;
    let config = CliConfig::from_yaml(&source).with_context(|| format!("In {path}"))?;
    debug!(path, "loaded configuration");
    Ok(config)
}
