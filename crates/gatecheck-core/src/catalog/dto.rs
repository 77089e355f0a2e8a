//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to domain model types via the loader.

use serde::Deserialize;

/// Raw TOML representation of a gate catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDto {
    /// Catalog name (e.g., "sql-injection").
    pub name: String,
    /// Gate policy (default: "hard").
    #[serde(default = "default_policy_str")]
    pub policy: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Directory names pruned from the walk.
    #[serde(default)]
    pub skip_dirs: Vec<String>,
    /// Extension allow-list, without dots. Empty allows all files.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Rule tables.
    #[serde(default)]
    pub rules: Vec<RuleDto>,
}

/// TOML representation of a single rule.
///
/// The `strategy` tag selects which optional fields are required; the loader
/// reports a missing-field error with the rule's context when they are
/// absent.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDto {
    /// Rule name (e.g., "absolute-path-literal").
    pub name: String,
    /// Severity (default: "hard").
    #[serde(default = "default_severity_str")]
    pub severity: String,
    /// File globs this rule applies to (default: all files).
    #[serde(default = "default_files")]
    pub files: Vec<String>,
    /// Strategy tag: "line-pattern", "line-pattern-with-context",
    /// or "signature-plus-body".
    pub strategy: String,
    /// Exemption token: a line containing it is never matched.
    #[serde(default)]
    pub exempt: Option<String>,
    /// Primary line pattern (line-pattern strategies).
    #[serde(default)]
    pub pattern: Option<String>,
    /// Context requirements (line-pattern-with-context).
    #[serde(default)]
    pub require: Vec<RequireDto>,
    /// Signature pattern (signature-plus-body).
    #[serde(default)]
    pub signature: Option<String>,
    /// Parameter identifier that must be referenced (signature-plus-body).
    #[serde(default)]
    pub param: Option<String>,
    /// Maximum body-scan lookahead in lines (signature-plus-body).
    #[serde(default)]
    pub max_lookahead: Option<usize>,
}

/// TOML representation of a context requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct RequireDto {
    /// Rule-name suffix identifying this requirement.
    pub suffix: String,
    /// Guard pattern that must be present.
    pub guard: String,
    /// Guard scope: "window" (default) or "file".
    #[serde(default = "default_scope_str")]
    pub scope: String,
    /// Backward window size in lines (window scope only).
    #[serde(default)]
    pub window: Option<usize>,
}

fn default_policy_str() -> String {
    "hard".to_string()
}

fn default_severity_str() -> String {
    "hard".to_string()
}

fn default_scope_str() -> String {
    "window".to_string()
}

fn default_files() -> Vec<String> {
    vec!["**/*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_rule() {
        let dto: CatalogDto = toml::from_str(
            r#"
name = "custom-gate"

[[rules]]
name = "no-bad-call"
strategy = "line-pattern"
pattern = 'bad\('
"#,
        )
        .unwrap();
        assert_eq!(dto.name, "custom-gate");
        assert_eq!(dto.policy, "hard");
        assert_eq!(dto.rules.len(), 1);
        assert_eq!(dto.rules[0].severity, "hard");
        assert_eq!(dto.rules[0].files, vec!["**/*".to_string()]);
    }

    #[test]
    fn deserialize_full_catalog() {
        let dto: CatalogDto = toml::from_str(
            r#"
name = "json-guard"
policy = "hard"
description = "JSON parsing must be guarded"
skip_dirs = [".git", "build"]
extensions = ["cs"]

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

[[rules]]
name = "event-source-verified"
strategy = "signature-plus-body"
signature = 'void\s+\w+\([^)]*source[^)]*\)'
param = "source"
max_lookahead = 400
"#,
        )
        .unwrap();

        assert_eq!(dto.extensions, vec!["cs".to_string()]);
        assert_eq!(dto.rules.len(), 2);
        assert_eq!(dto.rules[0].require.len(), 2);
        assert_eq!(dto.rules[0].require[0].scope, "window");
        assert_eq!(dto.rules[0].require[1].scope, "file");
        assert_eq!(dto.rules[1].param.as_deref(), Some("source"));
    }
}
