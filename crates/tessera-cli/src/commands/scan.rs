//! Scan command implementation.
//!
//! Solves every round count in a range in parallel and reports where the
//! tuned last step first reaches the residual tolerance.

use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use tessera_core::{
    CoreResult, ProblemInstance, SolverConfig, canonical_success_probability, solve,
};
use tracing::info;

use super::common::{InstanceArgs, SolverArgs, Target, create_progress_bar, problem};
use crate::config::CliConfig;

/// One row of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRow {
    /// Round count.
    pub iterations: usize,
    /// Success probability with `(π, π)` throughout.
    pub p_canonical: f64,
    /// Success probability with the tuned last step.
    pub p_tuned: f64,
    /// Remaining bad amplitude.
    pub residual: f64,
    /// Whether the residual met the tolerance.
    pub exact: bool,
}

/// Smallest round count whose tuned residual met the tolerance.
pub fn boundary(rows: &[ScanRow]) -> Option<usize> {
    rows.iter().find(|r| r.exact).map(|r| r.iterations)
}

/// Solve every `k` in `problems` independently.
pub fn scan_rows(
    problems: &[ProblemInstance],
    config: &SolverConfig,
    on_done: impl Fn() + Sync,
) -> CoreResult<Vec<ScanRow>> {
    problems
        .par_iter()
        .map(|p| {
            let result = solve(p, config)?;
            on_done();
            Ok(ScanRow {
                iterations: p.iterations(),
                p_canonical: canonical_success_probability(p.ratio(), p.iterations()),
                p_tuned: result.p_good_theory,
                residual: result.residual_bad_theory,
                exact: result.within_tolerance(),
            })
        })
        .collect()
}

/// Progress bar for a scan. JSON output keeps stderr quiet.
fn scan_progress(len: u64, json: bool) -> Result<ProgressBar> {
    if json {
        Ok(ProgressBar::hidden())
    } else {
        create_progress_bar(len, "solving")
    }
}

/// Execute the scan command.
pub fn execute(
    instance: &InstanceArgs,
    from: usize,
    to: usize,
    solver: &SolverArgs,
    json: bool,
    config: &CliConfig,
) -> Result<()> {
    if from == 0 || to < from {
        anyhow::bail!("Invalid range {from}..={to}: need 1 <= from <= to");
    }
    let target = Target::resolve(instance, config)?;
    let ratio = target.ratio()?;
    let solver_config = solver.resolve(&config.solver)?;
    let problems = (from..=to)
        .map(|k| problem(ratio, k))
        .collect::<Result<Vec<_>>>()?;

    let pb = scan_progress(problems.len() as u64, json)?;
    let rows = scan_rows(&problems, &solver_config, || pb.inc(1))?;
    pb.finish_and_clear();

    let first_exact = boundary(&rows);
    info!(?first_exact, from, to, "scan finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} Scanning k = {}..={} for {} (a = {:.6e})",
        style("→").cyan().bold(),
        from,
        to,
        style(target.label()).green(),
        ratio
    );
    println!(
        "  {:>4}  {:>14}  {:>14}  {:>10}",
        "k", "P(canonical)", "P(tuned)", "residual"
    );
    for row in &rows {
        let mark = if row.exact {
            style("✓").green()
        } else {
            style("·").dim()
        };
        println!(
            "  {:>4}  {:>14.10}  {:>14.10}  {:>10.3e} {}",
            row.iterations, row.p_canonical, row.p_tuned, row.residual, mark
        );
    }
    match first_exact {
        Some(k) => println!(
            "\n  Smallest k reaching tolerance: {}",
            style(k).yellow().bold()
        ),
        None => println!(
            "\n  {} No k in range reached tolerance",
            style("⚠").yellow().bold()
        ),
    }
    Ok(())
}
