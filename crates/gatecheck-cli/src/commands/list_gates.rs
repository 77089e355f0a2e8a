//! List gates command implementation.

use anyhow::{Context, Result};
use std::process::ExitCode;

/// Runs the list-gates command.
pub fn run() -> Result<ExitCode> {
    let catalogs = gatecheck_rules::all_catalogs().context("built-in catalog is malformed")?;

    println!("Built-in gates:\n");
    println!("{:<16} {:<8} {:<6} Description", "Name", "Policy", "Rules");
    println!("{}", "-".repeat(80));

    for catalog in &catalogs {
        println!(
            "{:<16} {:<8} {:<6} {}",
            catalog.name(),
            catalog.policy().to_string(),
            catalog.rules().len(),
            catalog.description()
        );
    }

    println!("\nRun a gate with:");
    println!("  gatecheck check sql-injection --root ./scripts --out reports/sql.json");
    println!("\nOr load a custom catalog:");
    println!("  gatecheck check my-gate --catalog gatecheck.toml --out reports/my.json");

    Ok(ExitCode::SUCCESS)
}
