//! Generic rule evaluation.
//!
//! One evaluation algorithm per [`Strategy`] tag. Matching is line-oriented
//! and never spans lines; the exemption predicate runs before the primary
//! pattern. Rule evaluation failures are recovered per rule per file: the
//! rule is skipped for that file and the scan continues.

use std::path::Path;

use tracing::{debug, warn};

use crate::rule::{ContextRequirement, GuardScope, Rule, Strategy};
use crate::scope::{balanced_block, preceding_window};
use crate::types::Violation;

/// Evaluates a rule against one file's lines, producing violations.
///
/// `file` is the path relative to the scan root, recorded verbatim in each
/// violation. `lines` is the file's text split once by the caller.
#[must_use]
pub fn evaluate(rule: &Rule, file: &Path, lines: &[&str]) -> Vec<Violation> {
    match rule.strategy() {
        Strategy::LinePattern { pattern } => {
            let mut violations = Vec::new();
            for (i, line) in lines.iter().enumerate() {
                if rule.is_exempt(line) || !pattern.is_match(line) {
                    continue;
                }
                violations.push(Violation::new(
                    rule.name().as_str(),
                    rule.severity(),
                    file,
                    i + 1,
                    line.trim(),
                ));
            }
            violations
        }
        Strategy::LinePatternWithContext {
            pattern,
            requirements,
        } => evaluate_with_context(rule, file, lines, pattern, requirements),
        Strategy::SignatureBody {
            signature,
            param,
            max_lookahead,
        } => evaluate_signature_body(rule, file, lines, signature, param, *max_lookahead),
    }
}

/// Evaluates the `line-pattern-with-context` strategy.
///
/// Every primary match is checked against each requirement; an unmet
/// requirement emits its own violation named `<rule>.<suffix>`, so a single
/// call site can surface multiple simultaneous gaps.
fn evaluate_with_context(
    rule: &Rule,
    file: &Path,
    lines: &[&str],
    pattern: &crate::rule::Pattern,
    requirements: &[ContextRequirement],
) -> Vec<Violation> {
    // File-scoped guards do not depend on the match position; resolve each
    // once per file instead of once per match.
    let file_scope_met: Vec<bool> = requirements
        .iter()
        .map(|req| match req.scope() {
            GuardScope::File => lines.iter().any(|l| req.guard().is_match(l)),
            GuardScope::Window { .. } => false,
        })
        .collect();

    let mut violations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if rule.is_exempt(line) || !pattern.is_match(line) {
            continue;
        }

        let ident = pattern
            .captures(line)
            .and_then(|c| c.name("ident").map(|m| m.as_str().to_string()));

        for (req, &met_in_file) in requirements.iter().zip(&file_scope_met) {
            let met = match req.scope() {
                GuardScope::Window { lines: window } => preceding_window(lines, i, *window)
                    .iter()
                    .any(|l| req.guard().is_match(l)),
                GuardScope::File => met_in_file,
            };
            if met {
                continue;
            }

            let mut v = Violation::new(
                format!("{}.{}", rule.name(), req.suffix()),
                rule.severity(),
                file,
                i + 1,
                line.trim(),
            )
            .with_extra("guard", req.guard().as_str());
            if let Some(ident) = &ident {
                v = v.with_extra("ident", ident);
            }
            violations.push(v);
        }
    }
    violations
}

/// Evaluates the `signature-plus-body` strategy.
///
/// Signatures whose body cannot be bounded within `max_lookahead` lines are
/// skipped silently: on malformed or generated source "body not found" must
/// not become a false positive.
fn evaluate_signature_body(
    rule: &Rule,
    file: &Path,
    lines: &[&str],
    signature: &crate::rule::Pattern,
    param: &str,
    max_lookahead: usize,
) -> Vec<Violation> {
    let word = format!(r"\b{}\b", regex::escape(param));
    let Ok(param_ref) = regex::Regex::new(&word) else {
        // Recovered per rule per file; the rest of the scan continues.
        warn!(
            rule = %rule.name(),
            param,
            "cannot build parameter reference pattern; skipping rule for {}",
            file.display()
        );
        return Vec::new();
    };

    let mut violations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if rule.is_exempt(line) || !signature.is_match(line) {
            continue;
        }

        let Some((start, end)) = balanced_block(lines, i, max_lookahead) else {
            debug!(
                rule = %rule.name(),
                line = i + 1,
                "body not found within lookahead; skipping signature in {}",
                file.display()
            );
            continue;
        };

        // The signature line itself always names the parameter; only the
        // body proper counts as a reference.
        let referenced = lines[start + 1..=end].iter().any(|l| param_ref.is_match(l));
        if referenced {
            continue;
        }

        let mut v = Violation::new(
            rule.name().as_str(),
            rule.severity(),
            file,
            i + 1,
            line.trim(),
        )
        .with_extra("param", param);
        if let Some(m) = signature.captures(line).and_then(|c| c.name("method")) {
            v = v.with_extra("method", m.as_str());
        }
        violations.push(v);
    }
    violations
}
