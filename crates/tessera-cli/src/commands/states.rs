//! States command implementation.

use anyhow::Result;
use console::style;
use tessera_core::suggested_iterations;
use tessera_oracle::{good_ratio, good_states, to_measured, to_physical};

use super::common::{InstanceArgs, Target};
use crate::config::CliConfig;

/// Listing is truncated beyond this many states.
const MAX_LISTED: usize = 64;

/// Execute the states command.
pub fn execute(instance: &InstanceArgs, config: &CliConfig) -> Result<()> {
    let spec = Target::resolve_predicate(instance, config)?;
    let states = good_states(&spec)?;
    let ratio = good_ratio(&spec)?;

    println!("{} {}", style("→").cyan().bold(), style(&spec).green());
    println!(
        "  {} of {} states good (a = {:.6e}), canonical estimate k = {}",
        style(states.len()).yellow().bold(),
        spec.num_states(),
        ratio,
        suggested_iterations(ratio)
    );
    println!();
    println!(
        "  {:>6}  {:<width$}  {:<width$}",
        "index",
        "physical",
        "measured",
        width = spec.width as usize
    );
    for &x in states.iter().take(MAX_LISTED) {
        println!(
            "  {:>6}  {}  {}",
            x,
            to_physical(x, spec.width),
            style(to_measured(x, spec.width)).cyan()
        );
    }
    if states.len() > MAX_LISTED {
        println!("  ... and {} more", states.len() - MAX_LISTED);
    }
    Ok(())
}
