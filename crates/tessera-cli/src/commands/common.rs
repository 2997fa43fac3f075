//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tessera_core::{ProblemInstance, SolverConfig, SolverResult, suggested_iterations};
use tessera_oracle::{OracleSpec, Preset, good_ratio};
use tracing::info;

use crate::config::CliConfig;

/// Which instance to work on.
#[derive(Debug, Clone, Args)]
pub struct InstanceArgs {
    /// Built-in predicate (axis1, axes2, axes3, axes4-plus, axes4-minus)
    #[arg(short, long, conflicts_with = "ratio")]
    pub preset: Option<Preset>,

    /// Good-state ratio a = M/N, strictly between 0 and 1
    #[arg(short, long)]
    pub ratio: Option<f64>,
}

/// Overrides for the solver section of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SolverArgs {
    /// Grid points per phase axis
    #[arg(long)]
    pub grid_steps: Option<usize>,

    /// Pattern-search round budget
    #[arg(long)]
    pub max_rounds: Option<usize>,

    /// Residual above which a result is flagged inexact
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl SolverArgs {
    /// Apply the flags on top of `base`, then validate.
    pub fn resolve(&self, base: &SolverConfig) -> Result<SolverConfig> {
        let mut config = base.clone();
        if let Some(grid_steps) = self.grid_steps {
            config = config.with_grid_steps(grid_steps);
        }
        if let Some(max_rounds) = self.max_rounds {
            config = config.with_max_rounds(max_rounds);
        }
        if let Some(tolerance) = self.tolerance {
            config = config.with_residual_tolerance(tolerance);
        }
        config.validate()?;
        Ok(config)
    }
}

/// A resolved instance: either a predicate or a bare ratio.
#[derive(Debug, Clone)]
pub enum Target {
    /// A predicate whose ratio is enumerated.
    Predicate(OracleSpec),
    /// A ratio given directly.
    Ratio(f64),
}

impl Target {
    /// Resolve from flags, falling back to the config file.
    pub fn resolve(args: &InstanceArgs, config: &CliConfig) -> Result<Self> {
        match (args.preset, args.ratio, &config.oracle) {
            (Some(preset), _, _) => Ok(Target::Predicate(preset.spec())),
            (None, Some(ratio), _) => Ok(Target::Ratio(ratio)),
            (None, None, Some(spec)) => Ok(Target::Predicate(spec.clone())),
            (None, None, None) => anyhow::bail!(
                "No instance given. Pass --preset or --ratio, or set `oracle` in the config file"
            ),
        }
    }

    /// Resolve a target that must carry a predicate.
    pub fn resolve_predicate(args: &InstanceArgs, config: &CliConfig) -> Result<OracleSpec> {
        match Self::resolve(args, config)? {
            Target::Predicate(spec) => Ok(spec),
            Target::Ratio(_) => {
                anyhow::bail!("This command needs a predicate: pass --preset or configure `oracle`")
            }
        }
    }

    /// Good-state ratio.
    pub fn ratio(&self) -> Result<f64> {
        match self {
            Target::Predicate(spec) => good_ratio(spec)
                .with_context(|| format!("Cannot derive a ratio from '{}'", spec.name)),
            Target::Ratio(ratio) => Ok(*ratio),
        }
    }

    /// Short description for headers.
    pub fn label(&self) -> String {
        match self {
            Target::Predicate(spec) => spec.name.clone(),
            Target::Ratio(ratio) => format!("a = {ratio}"),
        }
    }
}

/// Round count from the flag, the config file, or the closed-form estimate.
pub fn resolve_iterations(flag: Option<usize>, config: &CliConfig, ratio: f64) -> usize {
    flag.or(config.iterations).unwrap_or_else(|| {
        let k = suggested_iterations(ratio).max(1);
        info!(iterations = k, "no round count given, using the canonical estimate");
        k
    })
}

/// Validated problem instance.
pub fn problem(ratio: f64, iterations: usize) -> Result<ProblemInstance> {
    ProblemInstance::new(ratio, iterations).context("Invalid problem instance")
}

/// Progress bar for long-running scans.
pub fn create_progress_bar(len: u64, message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Green check or yellow warning sign for a residual.
pub fn exactness_mark(result: &SolverResult) -> String {
    if result.within_tolerance() {
        style("✓").green().bold().to_string()
    } else {
        style("⚠").yellow().bold().to_string()
    }
}

/// Print the phases and theoretical outcome of a solve.
pub fn print_solution(result: &SolverResult) {
    let (oracle_deg, diffusion_deg) = result.phases().to_degrees();
    println!(
        "  φ_oracle:    {:.12} rad ({:.6}°)",
        style(result.phi_oracle).yellow(),
        oracle_deg
    );
    println!(
        "  φ_diffusion: {:.12} rad ({:.6}°)",
        style(result.phi_diffusion).yellow(),
        diffusion_deg
    );
    println!(
        "  P(good):     {:.12}",
        style(result.p_good_theory).green()
    );
    println!(
        "  residual:    {:.3e} {}",
        result.residual_bad_theory,
        exactness_mark(result)
    );
}
