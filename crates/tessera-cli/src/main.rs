//! Tessera Command-Line Interface
//!
//! Solves, scans, verifies and lowers fixed-length amplitude amplification
//! with an exactly tuned last step.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::{InstanceArgs, SolverArgs};
use commands::{circuit, scan, solve, states, verify, version};

/// Tessera - exact last-step phases for amplitude amplification
#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "TESSERA_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the last-step phases for one instance
    Solve {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Total number of rounds
        #[arg(short = 'k', long)]
        iterations: Option<usize>,

        #[command(flatten)]
        solver: SolverArgs,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Solve a range of round counts in parallel
    Scan {
        #[command(flatten)]
        instance: InstanceArgs,

        /// First round count
        #[arg(long, default_value = "1")]
        from: usize,

        /// Last round count
        #[arg(long, default_value = "24")]
        to: usize,

        #[command(flatten)]
        solver: SolverArgs,

        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the good states of a predicate
    States {
        #[command(flatten)]
        instance: InstanceArgs,
    },

    /// Check the solution against a full state-vector simulation
    Verify {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Total number of rounds
        #[arg(short = 'k', long)]
        iterations: Option<usize>,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Emit the tuned circuit as OpenQASM 3
    Circuit {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Total number of rounds
        #[arg(short = 'k', long)]
        iterations: Option<usize>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Separate rounds with barriers
        #[arg(long)]
        barriers: bool,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = config::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Solve {
            instance,
            iterations,
            solver,
            json,
        } => solve::execute(&instance, iterations, &solver, json, &config),

        Commands::Scan {
            instance,
            from,
            to,
            solver,
            json,
        } => scan::execute(&instance, from, to, &solver, json, &config),

        Commands::States { instance } => states::execute(&instance, &config),

        Commands::Verify {
            instance,
            iterations,
            solver,
        } => verify::execute(&instance, iterations, &solver, &config),

        Commands::Circuit {
            instance,
            iterations,
            output,
            barriers,
            solver,
        } => circuit::execute(
            &instance,
            iterations,
            output.as_deref(),
            barriers,
            &solver,
            &config,
        ),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
