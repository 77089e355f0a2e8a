//! Gate catalog: audit log writes carry the required schema.
//!
//! Every audit emission must set the actor and action fields near the call
//! and the file must pin the schema version it writes. Missing fields are
//! independent gaps, reported separately per call site.

use gatecheck_core::{
    default_skip_dirs, Catalog, ContextRequirement, GatePolicy, GlobPattern, GuardScope,
    ModelError, Pattern, Rule, RuleName, Severity, Strategy,
};

/// Catalog name for the audit-logging-schema gate.
pub const NAME: &str = "audit-schema";

/// Field guards look close to the call; the emission struct is built in the
/// lines directly above it.
const FIELD_WINDOW: usize = 8;

/// Builds the audit-schema gate catalog.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation.
pub fn catalog() -> Result<Catalog, ModelError> {
    let emission = Pattern::new(r"Audit(?:Log|Logger)?\.(?:Write|Record|Emit)\s*\(")?;

    let requirements = vec![
        ContextRequirement::new(
            "actor-field",
            Pattern::new(r#"(?:"actor"|Actor\s*=)"#)?,
            GuardScope::Window {
                lines: FIELD_WINDOW,
            },
        )?,
        ContextRequirement::new(
            "action-field",
            Pattern::new(r#"(?:"action"|Action\s*=)"#)?,
            GuardScope::Window {
                lines: FIELD_WINDOW,
            },
        )?,
        ContextRequirement::new(
            "schema-version",
            Pattern::new(r"(?:AUDIT_SCHEMA_VERSION|SchemaVersion)")?,
            GuardScope::File,
        )?,
    ];

    let schema = Rule::new(
        RuleName::new("audit-log-schema")?,
        Severity::Hard,
        vec![GlobPattern::new("**/*.cs")?],
        Strategy::LinePatternWithContext {
            pattern: emission,
            requirements,
        },
    )?;

    Ok(Catalog::new(
        NAME,
        GatePolicy::Hard,
        "Audit writes must set actor/action fields and pin the schema version",
        default_skip_dirs(),
        vec!["cs".to_string()],
        vec![schema],
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
    fn bare_emission_surfaces_all_three_gaps() {
        let lines = ["AuditLog.Write(entry);"];
        let violations = evaluate(&rule(), Path::new("audit/writer.cs"), &lines);
        assert_eq!(violations.len(), 3);
        let names: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
        assert!(names.contains(&"audit-log-schema.actor-field"));
        assert!(names.contains(&"audit-log-schema.action-field"));
        assert!(names.contains(&"audit-log-schema.schema-version"));
    }

    #[test]
    fn complete_emission_is_clean() {
        let lines = [
            "const int AUDIT_SCHEMA_VERSION = 3;",
            "var entry = new AuditEntry {",
            "    Actor = playerId,",
            "    Action = \"task.complete\",",
            "};",
            "AuditLog.Write(entry);",
        ];
        assert!(evaluate(&rule(), Path::new("audit/writer.cs"), &lines).is_empty());
    }

    #[test]
    fn missing_actor_only_reports_actor_gap() {
        let lines = [
            "const int AUDIT_SCHEMA_VERSION = 3;",
            "var entry = new AuditEntry {",
            "    Action = \"task.complete\",",
            "};",
            "AuditLog.Write(entry);",
        ];
        let violations = evaluate(&rule(), Path::new("audit/writer.cs"), &lines);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "audit-log-schema.actor-field");
    }
}
