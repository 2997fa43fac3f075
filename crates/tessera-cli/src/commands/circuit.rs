//! Circuit command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use tessera_circuit::{GroverCircuitBuilder, emit_qasm3};
use tessera_core::solve;
use tessera_oracle::good_ratio;

use super::common::{InstanceArgs, SolverArgs, Target, problem, resolve_iterations};
use crate::config::CliConfig;

/// Execute the circuit command.
pub fn execute(
    instance: &InstanceArgs,
    iterations: Option<usize>,
    output: Option<&str>,
    barriers: bool,
    solver: &SolverArgs,
    config: &CliConfig,
) -> Result<()> {
    let spec = Target::resolve_predicate(instance, config)?;
    let ratio = good_ratio(&spec)?;
    let k = resolve_iterations(iterations, config, ratio);
    let solver_config = solver.resolve(&config.solver)?;

    let result = solve(&problem(ratio, k)?, &solver_config)?;
    let circuit = GroverCircuitBuilder::new(spec, result.schedule()?)
        .with_barriers(barriers)
        .build()?;
    let qasm = emit_qasm3(&circuit);

    // Summary goes to stderr so stdout stays valid QASM.
    eprintln!(
        "{} {}: {} qubits, {} instructions, depth {}",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.instructions().len(),
        circuit.depth()
    );
    let counts: Vec<String> = circuit
        .gate_counts()
        .iter()
        .map(|(name, n)| format!("{name}={n}"))
        .collect();
    eprintln!("  gates: {}", counts.join(", "));

    match output {
        Some(path) => {
            fs::write(path, &qasm).with_context(|| format!("Failed to write: {path}"))?;
            eprintln!("{} Wrote {}", style("✓").green().bold(), style(path).cyan());
        }
        None => print!("{qasm}"),
    }
    Ok(())
}
