//! Gate catalog: no dynamic SQL reaches a query-execution call.
//!
//! # Rationale
//!
//! Interpolated or concatenated strings passed straight into a
//! query-execution call are the canonical injection shape; parameterized
//! statements never need them. `PRAGMA` statements carry no user data and
//! are exempt — the one allow-listed prefix the scanned codebase uses.

use gatecheck_core::{
    default_skip_dirs, Catalog, GatePolicy, GlobPattern, ModelError, Pattern, Rule, RuleName,
    Severity, Strategy,
};

/// Catalog name for the SQL-injection gate.
pub const NAME: &str = "sql-injection";

/// Query-execution call surface: anything that sends a statement string to
/// the database driver.
const EXEC_CALLS: &str = r"\.(?:Query|QuerySingle|Execute|ExecuteNonQuery|ExecuteScalar)";

/// Builds the SQL-injection gate catalog.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation.
pub fn catalog() -> Result<Catalog, ModelError> {
    let files = || -> Result<Vec<GlobPattern>, ModelError> { Ok(vec![GlobPattern::new("**/*.cs")?]) };

    let interpolated = Rule::new(
        RuleName::new("no-interpolated-sql-statement")?,
        Severity::Hard,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(&format!(r#"{EXEC_CALLS}\s*\(\s*\$""#))?,
        },
    )?
    .exempt("PRAGMA");

    let concatenated = Rule::new(
        RuleName::new("no-concatenated-sql-statement")?,
        Severity::Hard,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(&format!(r#"{EXEC_CALLS}\s*\(\s*"[^"]*"\s*\+"#))?,
        },
    )?
    .exempt("PRAGMA");

    Ok(Catalog::new(
        NAME,
        GatePolicy::Hard,
        "No interpolated or concatenated SQL reaches a query-execution call",
        default_skip_dirs(),
        vec!["cs".to_string()],
        vec![interpolated, concatenated],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatecheck_core::evaluate;
    use std::path::Path;

    fn rules() -> Vec<Rule> {
        catalog().unwrap().rules().to_vec()
    }

    #[test]
    fn catalog_builds() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.name(), NAME);
        assert_eq!(catalog.policy(), GatePolicy::Hard);
        assert_eq!(catalog.rules().len(), 2);
    }

    #[test]
    fn flags_interpolated_query() {
        let lines = [r#"var rows = conn.Query($"SELECT * FROM tasks WHERE id={id}");"#];
        let violations = evaluate(&rules()[0], Path::new("db/store.cs"), &lines);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn flags_concatenated_execute() {
        let lines = [r#"conn.ExecuteNonQuery("DELETE FROM tasks WHERE id = " + id);"#];
        let violations = evaluate(&rules()[1], Path::new("db/store.cs"), &lines);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn pragma_lines_are_exempt() {
        let lines = [r#"conn.Execute($"PRAGMA user_version = {version}");"#];
        for rule in rules() {
            assert!(evaluate(&rule, Path::new("db/store.cs"), &lines).is_empty());
        }
    }

    #[test]
    fn parameterized_query_is_clean() {
        let lines = [r#"var rows = conn.Query("SELECT * FROM tasks WHERE id = @id", args);"#];
        for rule in rules() {
            assert!(evaluate(&rule, Path::new("db/store.cs"), &lines).is_empty());
        }
    }
}
