//! Gate aggregation: run a rule set over selected files.
//!
//! The aggregator reads each candidate file once, evaluates every applicable
//! rule against that single read, and folds the violations into a
//! [`GateResult`]. It performs no mutation of scanned files and is
//! re-run-safe; repeated runs on unchanged input produce byte-identical
//! results.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::matcher;
use crate::rule::Rule;
use crate::selector::Selector;
use crate::types::{GatePolicy, GateResult};

/// Builder for configuring a [`Gate`].
#[derive(Debug, Default)]
pub struct GateBuilder {
    name: String,
    policy: Option<GatePolicy>,
    rules: Vec<Rule>,
    roots: Vec<PathBuf>,
    skip_dirs: Vec<String>,
    extensions: Vec<String>,
}

impl GateBuilder {
    /// Creates a new builder for a gate with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the gate policy (default: hard).
    #[must_use]
    pub fn policy(mut self, policy: GatePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Adds a root directory to scan.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Adds multiple root directories.
    #[must_use]
    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Sets directory names pruned from the walk.
    #[must_use]
    pub fn skip_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the extension allow-list (without dots).
    #[must_use]
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the gate. Roots default to the current directory.
    #[must_use]
    pub fn build(self) -> Gate {
        let roots = if self.roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.roots
        };
        let selector = Selector::new(roots)
            .skip_dirs(self.skip_dirs)
            .extensions(self.extensions);

        Gate {
            name: self.name,
            policy: self.policy.unwrap_or(GatePolicy::Hard),
            rules: self.rules,
            selector,
        }
    }
}

/// A configured gate: a named rule set plus the file selection it runs over.
#[derive(Debug)]
pub struct Gate {
    name: String,
    policy: GatePolicy,
    rules: Vec<Rule>,
    selector: Selector,
}

impl Gate {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> GateBuilder {
        GateBuilder::new(name)
    }

    /// Returns the gate name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the gate policy.
    #[must_use]
    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs the gate: one synchronous pass over the selected files.
    ///
    /// Files whose path matches no rule glob are not read. Read failures and
    /// decode problems are scan concerns, not process-crashing conditions:
    /// unreadable files are skipped with a log line, non-UTF-8 content is
    /// decoded lossily.
    #[must_use]
    pub fn run(&self) -> GateResult {
        info!(gate = %self.name, "starting scan over {} root(s)", self.selector.roots().len());

        let candidates = self.selector.select();
        debug!(gate = %self.name, "selected {} candidate file(s)", candidates.len());

        let mut violations = Vec::new();
        let mut files_scanned = 0usize;

        for candidate in &candidates {
            let applicable: Vec<&Rule> = self
                .rules
                .iter()
                .filter(|r| r.applies_to(&candidate.rel))
                .collect();
            if applicable.is_empty() {
                continue;
            }

            let bytes = match std::fs::read(&candidate.path) {
                Ok(b) => b,
                Err(e) => {
                    warn!("skipping unreadable file {}: {e}", candidate.path.display());
                    continue;
                }
            };
            let text = match String::from_utf8(bytes) {
                Ok(t) => t,
                Err(e) => {
                    warn!(
                        "lossy-decoding non-UTF-8 file {}",
                        candidate.path.display()
                    );
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };

            let lines: Vec<&str> = text.lines().collect();
            for rule in applicable {
                violations.extend(matcher::evaluate(rule, &candidate.rel, &lines));
            }
            files_scanned += 1;
        }

        let result =
            GateResult::finalize(self.name.as_str(), self.policy, violations, files_scanned);
        info!(
            gate = %self.name,
            ok = result.ok,
            "scan complete: {} violation(s) in {} file(s)",
            result.counts.total,
            result.files_scanned
        );
        result
    }
}
