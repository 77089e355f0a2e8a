//! Declarative rule model.
//!
//! Rules are configuration data, not behavior: each rule carries a
//! [`Strategy`] tag and strategy-specific parameters, and is evaluated by one
//! generic algorithm per tag (see [`crate::matcher`]). The strategy set is
//! closed on purpose — new strategies are rare and each must be auditable.
//!
//! All invariants are enforced at construction time via validated newtypes.

use std::fmt;
use std::path::Path;

use crate::types::Severity;

/// Default backward window for context requirements, in lines.
pub const DEFAULT_WINDOW: usize = 12;

/// Default maximum lookahead for the balanced-body scan, in lines.
pub const DEFAULT_MAX_LOOKAHEAD: usize = 400;

// ────────────────────────────────────────────
// Newtypes with validation
// ────────────────────────────────────────────

/// A validated rule name (non-empty, `[a-z0-9-.]` only).
///
/// The `.` separator is reserved for requirement suffixes appended by the
/// matcher (`json-parse-guard.size-guard`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new rule name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains invalid characters.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::EmptyRuleName);
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        {
            return Err(ModelError::InvalidRuleName {
                name: name.to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated line pattern, compiled once at construction.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    compiled: regex::Regex,
}

impl Pattern {
    /// Creates a new pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or has invalid regex syntax.
    pub fn new(pattern: &str) -> Result<Self, ModelError> {
        if pattern.is_empty() {
            return Err(ModelError::EmptyPattern);
        }
        let compiled = regex::Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests whether a single line matches this pattern.
    ///
    /// Matching is line-oriented by design; patterns never span lines.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.compiled.is_match(line)
    }

    /// Returns the captures of the first match in `line`, if any.
    #[must_use]
    pub fn captures<'a>(&self, line: &'a str) -> Option<regex::Captures<'a>> {
        self.compiled.captures(line)
    }

    /// Returns the pattern source as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Pattern {}

/// A validated glob pattern for file path matching.
///
/// The glob is compiled once at construction and reused for all match calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    raw: String,
    compiled: glob::Pattern,
}

impl GlobPattern {
    /// Creates a new glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or has invalid glob syntax.
    pub fn new(pattern: &str) -> Result<Self, ModelError> {
        if pattern.is_empty() {
            return Err(ModelError::EmptyGlobPattern);
        }
        let compiled = glob::Pattern::new(pattern).map_err(|e| ModelError::InvalidGlobPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests whether a relative file path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        if self.compiled.matches(&path_str) {
            return true;
        }
        // For `dir/**` patterns, also check prefix + boundary to handle edge
        // cases where the glob crate doesn't match as expected.
        if let Some(prefix) = self.raw.strip_suffix("/**") {
            let normalized = prefix.trim_end_matches('/');
            if path_str.starts_with(normalized)
                && path_str
                    .as_bytes()
                    .get(normalized.len())
                    .is_some_and(|&b| b == b'/')
            {
                return true;
            }
        }
        false
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// ────────────────────────────────────────────
// Strategy parameters
// ────────────────────────────────────────────

/// Where a context requirement's guard must be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardScope {
    /// Within a fixed backward window of lines before the match.
    Window {
        /// Number of preceding lines to inspect.
        lines: usize,
    },
    /// Anywhere in the scanned file.
    File,
}

/// A protective-code requirement attached to a match.
///
/// Absence of the guard within its scope is what produces the violation:
/// the strategy flags *missing* protective code, not present dangerous code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRequirement {
    suffix: String,
    guard: Pattern,
    scope: GuardScope,
}

impl ContextRequirement {
    /// Creates a new context requirement.
    ///
    /// # Errors
    ///
    /// Returns an error if the suffix is not a valid rule-name fragment.
    pub fn new(suffix: &str, guard: Pattern, scope: GuardScope) -> Result<Self, ModelError> {
        // Suffixes obey rule-name syntax so `<rule>.<suffix>` stays valid.
        RuleName::new(suffix)?;
        Ok(Self {
            suffix: suffix.to_string(),
            guard,
            scope,
        })
    }

    /// Returns the rule-name suffix identifying this requirement.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the guard pattern.
    #[must_use]
    pub fn guard(&self) -> &Pattern {
        &self.guard
    }

    /// Returns the scope the guard must appear in.
    #[must_use]
    pub fn scope(&self) -> &GuardScope {
        &self.scope
    }
}

/// Matching strategy for a rule — a closed tagged union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// One violation per line matching `pattern`.
    LinePattern {
        /// The primary line pattern.
        pattern: Pattern,
    },
    /// Per line matching `pattern`, every unmet requirement emits its own
    /// violation named `<rule>.<suffix>`.
    LinePatternWithContext {
        /// The primary line pattern.
        pattern: Pattern,
        /// Guards that must be present near or around the match.
        requirements: Vec<ContextRequirement>,
    },
    /// Per line matching `signature`, extract the balanced body and require
    /// a whole-word reference to `param` inside it.
    SignatureBody {
        /// Pattern matching the method/function signature line. A named
        /// capture group `method` is recorded in the violation when present.
        signature: Pattern,
        /// Parameter identifier that must be referenced in the body.
        param: String,
        /// Maximum lines to scan forward for the closing delimiter.
        max_lookahead: usize,
    },
}

impl Strategy {
    /// The tag string used in catalog files for this strategy.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LinePattern { .. } => "line-pattern",
            Self::LinePatternWithContext { .. } => "line-pattern-with-context",
            Self::SignatureBody { .. } => "signature-plus-body",
        }
    }
}

// ────────────────────────────────────────────
// Rule
// ────────────────────────────────────────────

/// An immutable declarative rule: name, severity, applicable file globs,
/// an optional exemption token, and a matching strategy.
#[derive(Debug, Clone)]
pub struct Rule {
    name: RuleName,
    severity: Severity,
    files: Vec<GlobPattern>,
    exempt: Option<String>,
    strategy: Strategy,
}

impl Rule {
    /// Creates a new rule applying to files matched by `files`.
    ///
    /// # Errors
    ///
    /// Returns an error if `files` is empty — a rule that applies nowhere is
    /// a catalog mistake, not a no-op.
    pub fn new(
        name: RuleName,
        severity: Severity,
        files: Vec<GlobPattern>,
        strategy: Strategy,
    ) -> Result<Self, ModelError> {
        if files.is_empty() {
            return Err(ModelError::NoFileGlobs { name });
        }
        Ok(Self {
            name,
            severity,
            files,
            exempt: None,
            strategy,
        })
    }

    /// Sets the exemption token: a line containing it is never matched.
    #[must_use]
    pub fn exempt(mut self, token: impl Into<String>) -> Self {
        self.exempt = Some(token.into());
        self
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the applicable file globs.
    #[must_use]
    pub fn files(&self) -> &[GlobPattern] {
        &self.files
    }

    /// Returns the exemption token, if any.
    #[must_use]
    pub fn exempt_token(&self) -> Option<&str> {
        self.exempt.as_deref()
    }

    /// Returns the matching strategy.
    #[must_use]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Tests whether this rule applies to a file path relative to its root.
    #[must_use]
    pub fn applies_to(&self, rel_path: &Path) -> bool {
        self.files.iter().any(|g| g.matches(rel_path))
    }

    /// Tests whether a line is exempt from this rule.
    #[must_use]
    pub fn is_exempt(&self, line: &str) -> bool {
        self.exempt.as_deref().is_some_and(|t| line.contains(t))
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Errors in rule model construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Rule name is empty.
    #[error("rule name must not be empty")]
    EmptyRuleName,

    /// Rule name contains invalid characters.
    #[error("invalid rule name `{name}`: must be [a-z0-9-.]")]
    InvalidRuleName {
        /// The invalid name.
        name: String,
    },

    /// Line pattern is empty.
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// Line pattern has invalid regex syntax.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Why it's invalid.
        reason: String,
    },

    /// Glob pattern is empty.
    #[error("glob pattern must not be empty")]
    EmptyGlobPattern,

    /// Glob pattern has invalid syntax.
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidGlobPattern {
        /// The invalid pattern.
        pattern: String,
        /// Why it's invalid.
        reason: String,
    },

    /// A rule declared no applicable file globs.
    #[error("rule `{name}` has no file globs")]
    NoFileGlobs {
        /// The rule missing globs.
        name: RuleName,
    },
}

// ────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // -- RuleName --

    #[test]
    fn rule_name_valid() {
        assert!(RuleName::new("absolute-path-literal").is_ok());
        assert!(RuleName::new("guard.size-check2").is_ok());
    }

    #[test]
    fn rule_name_empty_rejected() {
        assert!(matches!(RuleName::new(""), Err(ModelError::EmptyRuleName)));
    }

    #[test]
    fn rule_name_invalid_chars_rejected() {
        assert!(matches!(
            RuleName::new("NoSql"),
            Err(ModelError::InvalidRuleName { .. })
        ));
        assert!(matches!(
            RuleName::new("no_sql"),
            Err(ModelError::InvalidRuleName { .. })
        ));
    }

    // -- Pattern --

    #[test]
    fn pattern_valid() {
        let pat = Pattern::new(r#""[A-Za-z]:\\"#).unwrap();
        assert!(pat.is_match(r#"var path = "C:\\Users\\x\\secret.txt";"#));
        assert!(!pat.is_match(r#"var path = "res://data/save.json";"#));
    }

    #[test]
    fn pattern_empty_rejected() {
        assert!(matches!(Pattern::new(""), Err(ModelError::EmptyPattern)));
    }

    #[test]
    fn pattern_invalid_regex_rejected() {
        assert!(matches!(
            Pattern::new("(unclosed"),
            Err(ModelError::InvalidPattern { .. })
        ));
    }

    // -- GlobPattern --

    #[test]
    fn glob_pattern_matches_file() {
        let pat = GlobPattern::new("scripts/**").unwrap();
        assert!(pat.matches(Path::new("scripts/db/query.cs")));
        assert!(!pat.matches(Path::new("addons/vendor/lib.cs")));
    }

    #[test]
    fn glob_pattern_extension_match() {
        let pat = GlobPattern::new("**/*.cs").unwrap();
        assert!(pat.matches(Path::new("src/deep/nested/file.cs")));
        assert!(!pat.matches(Path::new("src/file.gd")));
    }

    // -- ContextRequirement --

    #[test]
    fn requirement_suffix_must_be_rule_name_fragment() {
        let guard = Pattern::new(r"\.Length\s*>").unwrap();
        assert!(
            ContextRequirement::new("size-guard", guard.clone(), GuardScope::Window { lines: 12 })
                .is_ok()
        );
        assert!(ContextRequirement::new("Size Guard", guard, GuardScope::File).is_err());
    }

    // -- Rule --

    fn line_rule(name: &str, pattern: &str) -> Rule {
        Rule::new(
            RuleName::new(name).unwrap(),
            Severity::Hard,
            vec![GlobPattern::new("**/*.cs").unwrap()],
            Strategy::LinePattern {
                pattern: Pattern::new(pattern).unwrap(),
            },
        )
        .unwrap()
    }

    #[test]
    fn rule_applies_by_glob() {
        let rule = line_rule("absolute-path-literal", r#""[A-Za-z]:\\"#);
        assert!(rule.applies_to(Path::new("scripts/io/save.cs")));
        assert!(!rule.applies_to(Path::new("scripts/io/save.gd")));
    }

    #[test]
    fn rule_rejects_empty_globs() {
        let result = Rule::new(
            RuleName::new("r").unwrap(),
            Severity::Hard,
            vec![],
            Strategy::LinePattern {
                pattern: Pattern::new("x").unwrap(),
            },
        );
        assert!(matches!(result, Err(ModelError::NoFileGlobs { .. })));
    }

    #[test]
    fn exemption_token_is_plain_containment() {
        let rule = line_rule("no-interpolated-sql-statement", r#"\.Query\s*\(\s*\$""#).exempt("PRAGMA");
        assert!(rule.is_exempt(r#"db.Query($"PRAGMA user_version = {v}");"#));
        assert!(!rule.is_exempt(r#"db.Query($"SELECT * FROM t WHERE id={id}");"#));
    }

    #[test]
    fn strategy_tags() {
        assert_eq!(
            Strategy::LinePattern {
                pattern: Pattern::new("x").unwrap()
            }
            .tag(),
            "line-pattern"
        );
    }
}
