//! Solve command implementation.

use anyhow::Result;
use console::style;
use tessera_core::solve;

use super::common::{InstanceArgs, SolverArgs, Target, print_solution, problem, resolve_iterations};
use crate::config::CliConfig;

/// Execute the solve command.
pub fn execute(
    instance: &InstanceArgs,
    iterations: Option<usize>,
    solver: &SolverArgs,
    json: bool,
    config: &CliConfig,
) -> Result<()> {
    let target = Target::resolve(instance, config)?;
    let ratio = target.ratio()?;
    let k = resolve_iterations(iterations, config, ratio);
    let solver_config = solver.resolve(&config.solver)?;

    let result = solve(&problem(ratio, k)?, &solver_config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} Solving last-step phases for {} (a = {:.6e}, k = {})",
        style("→").cyan().bold(),
        style(target.label()).green(),
        ratio,
        k
    );
    print_solution(&result);
    println!(
        "  search:      seed ({:.6}, {:.6}), {} evaluations, final step {:.1e}",
        result.seed.oracle,
        result.seed.diffusion,
        result.stats.evaluations(),
        result.final_step
    );
    Ok(())
}
