//! Core types for gate violations and results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Severity class for gate violations.
///
/// `Hard` violations fail the gate; `Warn` violations are reported only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported finding, never affects gate status.
    Warn,
    /// Must be fixed; any hard violation fails the gate.
    Hard,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warn => write!(f, "warn"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Gate policy: whether findings can fail the invoking pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatePolicy {
    /// Gate fails (exit 1) when any hard violation exists.
    Hard,
    /// Scan always passes; findings are reported only.
    Soft,
}

impl std::fmt::Display for GatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hard => write!(f, "hard"),
            Self::Soft => write!(f, "soft"),
        }
    }
}

/// A single rule finding at a specific line of a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule name, including the requirement suffix for guard-style rules
    /// (e.g. `json-parse-guard.size-guard`).
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// File path relative to its scan root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// The offending line, trimmed.
    pub text: String,
    /// Strategy-specific fields (captured identifier, matched method name).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        file: impl Into<PathBuf>,
        line: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            file: file.into(),
            line,
            text: text.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds a strategy-specific field to this violation.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.file.display(),
            self.line,
            self.severity,
            self.rule,
            self.text
        )
    }
}

/// Violation counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// All violations.
    pub total: usize,
    /// Hard-severity violations.
    pub hard: usize,
    /// Warn-severity violations.
    pub warn: usize,
}

/// Result of running one gate over a source tree.
///
/// `ok` is `true` iff no hard-severity violations exist. Violations are
/// ordered by file path, then line number, then rule name; the order is
/// byte-stable across repeated runs on unchanged input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    /// Gate name (kebab-case catalog name).
    pub gate: String,
    /// Gate policy the result was produced under.
    pub policy: GatePolicy,
    /// Overall pass/fail status.
    pub ok: bool,
    /// All violations, in file-then-line order.
    pub violations: Vec<Violation>,
    /// Counts by severity.
    pub counts: Counts,
    /// Number of files whose text was read and evaluated.
    pub files_scanned: usize,
}

impl GateResult {
    /// Finalizes a result from collected violations: sorts them into the
    /// stable file-then-line order and computes `ok` and the counts.
    #[must_use]
    pub fn finalize(
        gate: impl Into<String>,
        policy: GatePolicy,
        mut violations: Vec<Violation>,
        files_scanned: usize,
    ) -> Self {
        violations.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(a.rule.cmp(&b.rule))
        });

        let hard = violations
            .iter()
            .filter(|v| v.severity == Severity::Hard)
            .count();
        let warn = violations.len() - hard;
        let counts = Counts {
            total: violations.len(),
            hard,
            warn,
        };

        Self {
            gate: gate.into(),
            policy,
            ok: hard == 0,
            violations,
            counts,
            files_scanned,
        }
    }

    /// Returns true if there are any hard violations.
    #[must_use]
    pub fn has_hard(&self) -> bool {
        self.counts.hard > 0
    }

    /// The process exit code mandated by the gate policy:
    /// 0 for a passing gate or any soft scan, 1 for a failed hard gate.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.policy {
            GatePolicy::Hard if !self.ok => 1,
            _ => 0,
        }
    }
}
