//! Gate catalog: no absolute or traversing filesystem paths.
//!
//! Save data and mod content must stay inside the engine-managed sandbox
//! (`user://`, `res://`). A drive-letter literal or a `../` hop in a
//! path-handling line escapes it.

use gatecheck_core::{
    default_skip_dirs, Catalog, GatePolicy, GlobPattern, ModelError, Pattern, Rule, RuleName,
    Severity, Strategy,
};

/// Catalog name for the path-safety gate.
pub const NAME: &str = "path-safety";

/// Builds the path-safety gate catalog.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation.
pub fn catalog() -> Result<Catalog, ModelError> {
    let files = || -> Result<Vec<GlobPattern>, ModelError> { Ok(vec![GlobPattern::new("**/*.cs")?]) };

    let absolute = Rule::new(
        RuleName::new("absolute-path-literal")?,
        Severity::Hard,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(r#""[A-Za-z]:\\"#)?,
        },
    )?;

    // Traversal tokens only count on lines that touch path APIs; `..` in
    // arithmetic or ranges must not trip the gate.
    let traversal = Rule::new(
        RuleName::new("path-traversal-token")?,
        Severity::Hard,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(r"(?i)(?:path|file|directory|load|open)[^;]*\.\.[/\\]")?,
        },
    )?;

    Ok(Catalog::new(
        NAME,
        GatePolicy::Hard,
        "No absolute drive-letter literals or traversal tokens in path handling",
        default_skip_dirs(),
        vec!["cs".to_string()],
        vec![absolute, traversal],
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
    fn flags_drive_letter_literal() {
        let lines = [r#"var path = "C:\\Users\\x\\secret.txt";"#];
        let violations = evaluate(&rules()[0], Path::new("io/save.cs"), &lines);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "absolute-path-literal");
        assert_eq!(violations[0].severity, Severity::Hard);
    }

    #[test]
    fn sandbox_paths_are_clean() {
        let lines = [r#"var path = "user://saves/slot1.dat";"#];
        assert!(evaluate(&rules()[0], Path::new("io/save.cs"), &lines).is_empty());
    }

    #[test]
    fn flags_traversal_in_path_line() {
        let lines = [r#"var file = FileAccess.Open(basePath + "../../overlay.json");"#];
        let violations = evaluate(&rules()[1], Path::new("io/load.cs"), &lines);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "path-traversal-token");
    }

    #[test]
    fn range_dots_do_not_trip_traversal() {
        let lines = ["for (var i = 0; i < n; i++) { sum += data[i]; }"];
        assert!(evaluate(&rules()[1], Path::new("math/sum.cs"), &lines).is_empty());
    }
}
