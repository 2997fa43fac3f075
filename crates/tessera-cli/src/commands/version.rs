//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - exact last-step phases for fixed-length amplitude amplification",
        style("Tessera").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  tessera-core     Two-dimensional model and last-step solver");
    println!("  tessera-oracle   Coherence predicates and full-space simulation");
    println!("  tessera-circuit  Gate-level lowering and OpenQASM 3 emission");
    println!("  tessera-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
