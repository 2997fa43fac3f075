//! Verify command implementation.
//!
//! Solves the last step, then replays the schedule over the full state
//! space and checks that the exact success probability matches the
//! two-dimensional prediction.

use anyhow::Result;
use console::style;
use tessera_core::{PhaseSchedule, canonical_success_probability, solve};
use tessera_oracle::{StateVectorSimulator, good_ratio};
use tracing::debug;

use super::common::{InstanceArgs, SolverArgs, Target, print_solution, problem, resolve_iterations};
use crate::config::CliConfig;

/// Largest disagreement tolerated between the two models.
const AGREEMENT_TOLERANCE: f64 = 1e-9;

/// Execute the verify command.
pub fn execute(
    instance: &InstanceArgs,
    iterations: Option<usize>,
    solver: &SolverArgs,
    config: &CliConfig,
) -> Result<()> {
    let spec = Target::resolve_predicate(instance, config)?;
    let ratio = good_ratio(&spec)?;
    let k = resolve_iterations(iterations, config, ratio);
    let solver_config = solver.resolve(&config.solver)?;

    println!(
        "{} Verifying {} with k = {}",
        style("→").cyan().bold(),
        style(&spec).green(),
        k
    );

    let result = solve(&problem(ratio, k)?, &solver_config)?;
    print_solution(&result);

    let mut sim = StateVectorSimulator::new(&spec)?;
    let tuned = sim.run(&result.schedule()?);
    let canonical = sim.run(&PhaseSchedule::canonical(k)?);
    debug!(tuned = tuned.p_good, canonical = canonical.p_good, "full-space runs");

    let tuned_gap = (tuned.p_good - result.p_good_theory).abs();
    let canonical_gap = (canonical.p_good - canonical_success_probability(ratio, k)).abs();

    println!();
    println!(
        "  Full space ({} states):",
        style(spec.num_states()).yellow()
    );
    println!(
        "    tuned:     P(good) = {:.12}  |Δ| = {:.1e}",
        tuned.p_good, tuned_gap
    );
    println!(
        "    canonical: P(good) = {:.12}  |Δ| = {:.1e}",
        canonical.p_good, canonical_gap
    );

    if tuned_gap > AGREEMENT_TOLERANCE || canonical_gap > AGREEMENT_TOLERANCE {
        anyhow::bail!(
            "Full-space simulation disagrees with the reduced model (tuned {tuned_gap:.1e}, canonical {canonical_gap:.1e})"
        );
    }
    println!(
        "\n{} Reduced model confirmed",
        style("✓").green().bold()
    );
    Ok(())
}
