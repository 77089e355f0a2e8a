//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_CATALOG: &str = r#"# gatecheck catalog
# A catalog is one gate: a named rule set plus a gate policy.

name = "my-gate"
# "hard" gates exit 1 on any hard violation; "soft" scans always exit 0.
policy = "hard"
description = "Project-specific source gate"

# Directory names pruned wherever they appear as a path segment.
skip_dirs = [".git", "build", "logs"]

# Extension allow-list, without dots. Empty allows all files.
extensions = ["cs"]

# One violation per line matching `pattern`.
[[rules]]
name = "absolute-path-literal"
severity = "hard"
strategy = "line-pattern"
pattern = '"[A-Za-z]:\\'
# A line containing the exemption token is never matched.
# exempt = "ALLOW_ABSOLUTE"

# Flag matches that are missing nearby protective code.
[[rules]]
name = "json-parse-guard"
strategy = "line-pattern-with-context"
pattern = 'JSON\.Parse\s*\('

[[rules.require]]
suffix = "size-guard"
guard = '\.Length\s*>'
window = 12

[[rules.require]]
suffix = "depth-limit"
guard = 'MaxDepth'
scope = "file"

# Flag signatures whose extracted body never references the parameter.
[[rules]]
name = "event-source-verified"
strategy = "signature-plus-body"
signature = '(?:public|private|protected)\s+\w+\s+(?P<method>\w+)\s*\([^)]*\bsource\b[^)]*\)'
param = "source"
max_lookahead = 400
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<ExitCode> {
    let catalog_path = Path::new("gatecheck.toml");

    if catalog_path.exists() && !force {
        bail!(
            "catalog file already exists at {}. Use --force to overwrite.",
            catalog_path.display()
        );
    }

    // The template must stay loadable; fail init rather than write a
    // catalog the check command will reject.
    gatecheck_core::catalog::from_str(DEFAULT_CATALOG)
        .context("starter catalog failed validation")?;

    std::fs::write(catalog_path, DEFAULT_CATALOG)
        .with_context(|| format!("failed to write {}", catalog_path.display()))?;

    println!("Created gatecheck.toml");
    println!("\nNext steps:");
    println!("  1. Edit gatecheck.toml to fit your rules");
    println!("  2. Run: gatecheck check my-gate --catalog gatecheck.toml --out report.json");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_catalog_is_loadable() {
        let catalog = gatecheck_core::catalog::from_str(DEFAULT_CATALOG).unwrap();
        assert_eq!(catalog.name(), "my-gate");
        assert_eq!(catalog.rules().len(), 3);
    }
}
