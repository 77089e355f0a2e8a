//! gatecheck CLI tool.
//!
//! Usage:
//! ```bash
//! gatecheck check <GATE> --out report.json [--root DIR]...
//! gatecheck list-gates
//! gatecheck init
//! ```
//!
//! Exit codes: 0 = gate passed (soft scans always pass), 1 = hard gate
//! failed, 2 = configuration or internal error.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

/// Deterministic rule-driven source gates for CI pipelines
#[derive(Parser)]
#[command(name = "gatecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one gate and write its report
    Check {
        /// Built-in gate name (see `list-gates`), or any name when --catalog
        /// supplies a custom catalog file
        gate: String,

        /// Path the JSON report is written to
        #[arg(long)]
        out: PathBuf,

        /// Root directory to scan (repeatable; default: current directory)
        #[arg(short, long)]
        root: Vec<PathBuf>,

        /// Load the gate from a TOML catalog file instead of the built-ins
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "summary")]
        format: OutputFormat,
    },

    /// List built-in gate catalogs
    ListGates,

    /// Write a starter catalog file
    Init {
        /// Overwrite an existing catalog file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for scan results.
///
/// Every format ends with exactly one machine-parseable summary line.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Summary line only.
    #[default]
    Summary,
    /// One line per violation, then the summary line.
    Text,
    /// The report document, then the summary line.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Check {
            gate,
            out,
            root,
            catalog,
            format,
        } => commands::check::run(&gate, &out, root, catalog.as_deref(), format),
        Commands::ListGates => commands::list_gates::run(),
        Commands::Init { force } => commands::init::run(force),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            // Tool breakage is distinct from gate failure: exit 2, stderr.
            eprintln!("gatecheck: {e:#}");
            ExitCode::from(2)
        }
    }
}
