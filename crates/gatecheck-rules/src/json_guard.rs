//! Gate catalog: JSON parsing must be guarded.
//!
//! Every parse call on untrusted text needs a size check close by and a
//! depth limit configured somewhere in the file. The two guards are
//! independent: a call site missing both surfaces both gaps at once.

use gatecheck_core::{
    default_skip_dirs, Catalog, ContextRequirement, GatePolicy, GlobPattern, GuardScope,
    ModelError, Pattern, Rule, RuleName, Severity, Strategy, DEFAULT_WINDOW,
};

/// Catalog name for the JSON-parsing-guard gate.
pub const NAME: &str = "json-guard";

/// Builds the JSON-guard gate catalog.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation.
pub fn catalog() -> Result<Catalog, ModelError> {
    let parse_call = Pattern::new(
        r"(?:JSON\.Parse|Json\.Deserialize|JsonConvert\.DeserializeObject)\s*[<(]\s*[^(]*\(?\s*(?P<ident>[A-Za-z_]\w*)",
    )?;

    let requirements = vec![
        ContextRequirement::new(
            "size-guard",
            Pattern::new(r"\.Length\s*>\s*\d")?,
            GuardScope::Window {
                lines: DEFAULT_WINDOW,
            },
        )?,
        ContextRequirement::new(
            "depth-limit",
            Pattern::new(r"(?:MaxDepth|maxDepth|MAX_PARSE_DEPTH)")?,
            GuardScope::File,
        )?,
    ];

    let guard = Rule::new(
        RuleName::new("json-parse-guard")?,
        Severity::Hard,
        vec![GlobPattern::new("**/*.cs")?],
        Strategy::LinePatternWithContext {
            pattern: parse_call,
            requirements,
        },
    )?;

    Ok(Catalog::new(
        NAME,
        GatePolicy::Hard,
        "JSON parse calls require a nearby size guard and a file-level depth limit",
        default_skip_dirs(),
        vec!["cs".to_string()],
        vec![guard],
    ))
}
