//! Shared output formatting for gate results.
//!
//! Every format prints exactly one summary line, last — that line is the
//! contract CI greps.

use anyhow::Result;
use gatecheck_core::{report, GateResult, Severity};

use crate::OutputFormat;

/// Print a gate result in the specified format.
pub fn print(result: &GateResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Summary => {}
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => println!("{}", report::to_json(result)?),
    }
    println!("{}", report::summary_line(result));
    Ok(())
}

fn print_text(result: &GateResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Hard => "\x1b[31mhard\x1b[0m",
            Severity::Warn => "\x1b[33mwarn\x1b[0m",
        };

        println!(
            "{}:{}: {} [{}] {}",
            violation.file.display(),
            violation.line,
            severity_indicator,
            violation.rule,
            violation.text,
        );
    }

    if !result.violations.is_empty() {
        println!();
    }
}
