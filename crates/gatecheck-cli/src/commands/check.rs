//! Check command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gatecheck_core::{catalog as catalog_loader, report, Catalog};

use crate::OutputFormat;

/// Runs the check command: resolve the catalog, run the gate, write the
/// report, print the output, and map the result to the gate's exit code.
pub fn run(
    gate_name: &str,
    out: &Path,
    roots: Vec<PathBuf>,
    catalog_path: Option<&Path>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let catalog = resolve_catalog(gate_name, catalog_path)?;

    let roots = if roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        roots
    };

    let gate = catalog.gate(roots);
    tracing::info!(
        "running gate `{}` with {} rule(s)",
        gate.name(),
        gate.rule_count()
    );

    let result = gate.run();

    // The report is written before any output or status decision so a failed
    // gate is always inspectable without re-running.
    report::write_report(&result, out)
        .with_context(|| format!("failed to write report to {}", out.display()))?;

    super::output::print(&result, format)?;

    Ok(ExitCode::from(
        u8::try_from(result.exit_code()).unwrap_or(1),
    ))
}

fn resolve_catalog(gate_name: &str, catalog_path: Option<&Path>) -> Result<Catalog> {
    if let Some(path) = catalog_path {
        let catalog = catalog_loader::from_file(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?;
        return Ok(catalog);
    }

    match gatecheck_rules::catalog(gate_name).context("built-in catalog is malformed")? {
        Some(catalog) => Ok(catalog),
        None => bail!(
            "unknown gate `{gate_name}`. Run `gatecheck list-gates` to see built-in gates, \
             or pass --catalog <file>."
        ),
    }
}
