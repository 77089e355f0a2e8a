//! Gate catalog: event handlers must verify their source.
//!
//! A handler that declares a `source` parameter and never looks at it is
//! trusting whatever raised the event. The body is bounded by balanced-brace
//! scanning; handlers whose body cannot be bounded within the lookahead are
//! skipped rather than guessed at.

use gatecheck_core::{
    default_skip_dirs, Catalog, GatePolicy, GlobPattern, ModelError, Pattern, Rule, RuleName,
    Severity, Strategy, DEFAULT_MAX_LOOKAHEAD,
};

/// Catalog name for the event-source-verification gate.
pub const NAME: &str = "event-source";

/// Builds the event-source gate catalog.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation.
pub fn catalog() -> Result<Catalog, ModelError> {
    let signature = Pattern::new(
        r"(?:public|private|protected|internal)\s+(?:static\s+)?[\w<>\[\]]+\s+(?P<method>\w+)\s*\([^)]*\bsource\b[^)]*\)",
    )?;

    let verified = Rule::new(
        RuleName::new("event-source-verified")?,
        Severity::Hard,
        vec![GlobPattern::new("**/*.cs")?],
        Strategy::SignatureBody {
            signature,
            param: "source".to_string(),
            max_lookahead: DEFAULT_MAX_LOOKAHEAD,
        },
    )?;

    Ok(Catalog::new(
        NAME,
        GatePolicy::Hard,
        "Handlers declaring a `source` parameter must reference it in their body",
        default_skip_dirs(),
        vec!["cs".to_string()],
        vec![verified],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatecheck_core::evaluate;
    use std::path::Path;

    fn rule() -> Rule {
        catalog().unwrap().rules()[0].clone()
    }

    #[test]
    fn unreferenced_source_violates() {
        let lines = [
            "private void HandleDamage(Node source, int amount)",
            "{",
            "    health -= amount;",
            "}",
        ];
        let violations = evaluate(&rule(), Path::new("combat/damage.cs"), &lines);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].extra.get("method").map(String::as_str),
            Some("HandleDamage")
        );
    }

    #[test]
    fn referenced_source_passes() {
        let lines = [
            "private void HandleDamage(Node source, int amount)",
            "{",
            "    if (!IsTrusted(source)) return;",
            "    health -= amount;",
            "}",
        ];
        assert!(evaluate(&rule(), Path::new("combat/damage.cs"), &lines).is_empty());
    }

    #[test]
    fn methods_without_source_param_are_ignored() {
        let lines = [
            "private void Heal(int amount)",
            "{",
            "    health += amount;",
            "}",
        ];
        assert!(evaluate(&rule(), Path::new("combat/heal.cs"), &lines).is_empty());
    }

    #[test]
    fn oversized_body_is_skipped_not_flagged() {
        let mut lines = vec!["private void HandleSpawn(Node source)".to_string(), "{".to_string()];
        for _ in 0..DEFAULT_MAX_LOOKAHEAD {
            lines.push("    Work();".to_string());
        }
        lines.push("}".to_string());

        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        assert!(evaluate(&rule(), Path::new("combat/spawn.cs"), &refs).is_empty());
    }
}
