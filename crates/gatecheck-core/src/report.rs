//! Report serialization and the one-line summary contract.
//!
//! The JSON report is written exactly once, after the scan completes, to a
//! caller-specified path (parent directories created as needed). The summary
//! line is the contract consumed by CI orchestration: its format must remain
//! stable across rule changes.

use std::path::{Path, PathBuf};

use crate::types::{GatePolicy, GateResult};

/// Errors while writing the report artifact.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report document could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The report file or its parent directories could not be written.
    #[error("failed to write report to {path}: {source}")]
    Io {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Serializes the result to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(result: &GateResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Writes the JSON report to `out`, creating parent directories as needed.
///
/// The report is written even when the gate fails, so failures are
/// inspectable without re-running.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub fn write_report(result: &GateResult, out: &Path) -> Result<(), ReportError> {
    let json = to_json(result)?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::Io {
                path: out.to_path_buf(),
                source: e,
            })?;
        }
    }
    std::fs::write(out, json).map_err(|e| ReportError::Io {
        path: out.to_path_buf(),
        source: e,
    })
}

/// Formats the single-line machine-parseable summary:
/// `<GATE_NAME> status=<ok|fail> violations=<count>`, with `findings=` in
/// place of `violations=` for soft scans.
///
/// The gate name is upcased with `-` → `_` so the CI grep target is
/// shell-safe.
#[must_use]
pub fn summary_line(result: &GateResult) -> String {
    let name = result.gate.to_ascii_uppercase().replace('-', "_");
    let status = if result.ok { "ok" } else { "fail" };
    let noun = match result.policy {
        GatePolicy::Hard => "violations",
        GatePolicy::Soft => "findings",
    };
    format!("{name} status={status} {noun}={}", result.counts.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Severity, Violation};

    fn result_with(policy: GatePolicy, violations: Vec<Violation>) -> GateResult {
        GateResult::finalize("sql-injection", policy, violations, 4)
    }

    #[test]
    fn summary_line_hard_gate() {
        let v = Violation::new("r", Severity::Hard, "a.cs", 1, "x");
        let line = summary_line(&result_with(GatePolicy::Hard, vec![v]));
        insta::assert_snapshot!(line, @"SQL_INJECTION status=fail violations=1");
    }

    #[test]
    fn summary_line_soft_scan_uses_findings() {
        let v = Violation::new("r", Severity::Warn, "a.cs", 1, "x");
        let line = summary_line(&result_with(GatePolicy::Soft, vec![v]));
        insta::assert_snapshot!(line, @"SQL_INJECTION status=ok findings=1");
    }

    #[test]
    fn summary_line_passing_gate() {
        let line = summary_line(&result_with(GatePolicy::Hard, vec![]));
        assert_eq!(line, "SQL_INJECTION status=ok violations=0");
    }

    #[test]
    fn write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports/deep/gate.json");
        let result = result_with(GatePolicy::Hard, vec![]);

        write_report(&result, &out).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains(r#""ok": true"#));
        assert!(content.contains(r#""gate": "sql-injection""#));
    }

    #[test]
    fn report_round_trips() {
        let v = Violation::new("r", Severity::Hard, "a.cs", 3, "text").with_extra("param", "p");
        let result = result_with(GatePolicy::Hard, vec![v]);
        let json = to_json(&result).unwrap();
        let back: GateResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counts, result.counts);
        assert_eq!(back.violations, result.violations);
    }
}
