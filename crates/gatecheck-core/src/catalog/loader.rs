//! DTO → Domain model conversion with validation.

use std::path::PathBuf;

use crate::rule::{
    ContextRequirement, GlobPattern, GuardScope, ModelError, Pattern, Rule, RuleName, Strategy,
    DEFAULT_MAX_LOOKAHEAD, DEFAULT_WINDOW,
};
use crate::types::{GatePolicy, Severity};

use super::dto::{CatalogDto, RequireDto, RuleDto};
use super::Catalog;

/// Errors during catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error reading a catalog file.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("failed to parse catalog: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "rules[0].pattern").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// Unknown policy string.
    #[error("unknown policy `{value}`, expected: hard, soft")]
    UnknownPolicy {
        /// The invalid value.
        value: String,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: hard, warn")]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown strategy tag.
    #[error(
        "{context}: unknown strategy `{value}`, expected: line-pattern, \
         line-pattern-with-context, signature-plus-body"
    )]
    UnknownStrategy {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown guard scope string.
    #[error("{context}: unknown scope `{value}`, expected: window, file")]
    UnknownScope {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A strategy-required field is absent.
    #[error("{context}: strategy `{strategy}` requires field `{field}`")]
    MissingField {
        /// Where the error occurred.
        context: String,
        /// The strategy tag in effect.
        strategy: String,
        /// The missing field name.
        field: String,
    },
}

/// Converts a [`CatalogDto`] to a validated [`Catalog`].
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: CatalogDto) -> Result<Catalog, CatalogError> {
    let policy = parse_policy(&dto.policy)?;

    let rules = dto
        .rules
        .into_iter()
        .enumerate()
        .map(|(i, r)| convert_rule(r, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::new(
        dto.name,
        policy,
        dto.description,
        dto.skip_dirs,
        dto.extensions,
        rules,
    ))
}

fn convert_rule(dto: RuleDto, index: usize) -> Result<Rule, CatalogError> {
    let ctx = format!("rules[{index}] ('{}')", dto.name);

    let name = RuleName::new(&dto.name).map_err(|e| CatalogError::Validation {
        context: format!("{ctx}.name"),
        source: e,
    })?;

    let severity = parse_severity(&dto.severity, &ctx)?;

    let files = dto
        .files
        .iter()
        .enumerate()
        .map(|(j, p)| {
            GlobPattern::new(p).map_err(|e| CatalogError::Validation {
                context: format!("{ctx}.files[{j}]"),
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let strategy = match dto.strategy.as_str() {
        "line-pattern" => Strategy::LinePattern {
            pattern: required_pattern(dto.pattern.as_deref(), &ctx, &dto.strategy, "pattern")?,
        },
        "line-pattern-with-context" => {
            let pattern =
                required_pattern(dto.pattern.as_deref(), &ctx, &dto.strategy, "pattern")?;
            let requirements = dto
                .require
                .iter()
                .enumerate()
                .map(|(j, r)| convert_requirement(r, &format!("{ctx}.require[{j}]")))
                .collect::<Result<Vec<_>, _>>()?;
            if requirements.is_empty() {
                return Err(CatalogError::MissingField {
                    context: ctx,
                    strategy: dto.strategy.clone(),
                    field: "require".to_string(),
                });
            }
            Strategy::LinePatternWithContext {
                pattern,
                requirements,
            }
        }
        "signature-plus-body" => {
            let signature =
                required_pattern(dto.signature.as_deref(), &ctx, &dto.strategy, "signature")?;
            let param = dto.param.clone().ok_or_else(|| CatalogError::MissingField {
                context: ctx.clone(),
                strategy: dto.strategy.clone(),
                field: "param".to_string(),
            })?;
            Strategy::SignatureBody {
                signature,
                param,
                max_lookahead: dto.max_lookahead.unwrap_or(DEFAULT_MAX_LOOKAHEAD),
            }
        }
        other => {
            return Err(CatalogError::UnknownStrategy {
                context: ctx,
                value: other.to_string(),
            })
        }
    };

    let mut rule =
        Rule::new(name, severity, files, strategy).map_err(|e| CatalogError::Validation {
            context: ctx,
            source: e,
        })?;
    if let Some(token) = dto.exempt {
        rule = rule.exempt(token);
    }
    Ok(rule)
}

fn convert_requirement(dto: &RequireDto, ctx: &str) -> Result<ContextRequirement, CatalogError> {
    let guard = Pattern::new(&dto.guard).map_err(|e| CatalogError::Validation {
        context: format!("{ctx}.guard"),
        source: e,
    })?;

    let scope = match dto.scope.as_str() {
        "window" => GuardScope::Window {
            lines: dto.window.unwrap_or(DEFAULT_WINDOW),
        },
        "file" => GuardScope::File,
        other => {
            return Err(CatalogError::UnknownScope {
                context: ctx.to_string(),
                value: other.to_string(),
            })
        }
    };

    ContextRequirement::new(&dto.suffix, guard, scope).map_err(|e| CatalogError::Validation {
        context: format!("{ctx}.suffix"),
        source: e,
    })
}

fn required_pattern(
    value: Option<&str>,
    ctx: &str,
    strategy: &str,
    field: &str,
) -> Result<Pattern, CatalogError> {
    let raw = value.ok_or_else(|| CatalogError::MissingField {
        context: ctx.to_string(),
        strategy: strategy.to_string(),
        field: field.to_string(),
    })?;
    Pattern::new(raw).map_err(|e| CatalogError::Validation {
        context: format!("{ctx}.{field}"),
        source: e,
    })
}

fn parse_policy(value: &str) -> Result<GatePolicy, CatalogError> {
    match value {
        "hard" => Ok(GatePolicy::Hard),
        "soft" => Ok(GatePolicy::Soft),
        _ => Err(CatalogError::UnknownPolicy {
            value: value.to_string(),
        }),
    }
}

fn parse_severity(value: &str, context: &str) -> Result<Severity, CatalogError> {
    match value {
        "hard" => Ok(Severity::Hard),
        "warn" => Ok(Severity::Warn),
        _ => Err(CatalogError::UnknownSeverity {
            context: context.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_load(toml_str: &str) -> Result<Catalog, CatalogError> {
        super::super::from_str(toml_str)
    }

    // -- Happy path --

    #[test]
    fn load_minimal_catalog() {
        let catalog = parse_and_load(
            r#"
name = "custom"

[[rules]]
name = "no-bad"
strategy = "line-pattern"
pattern = 'bad\('
"#,
        )
        .unwrap();
        assert_eq!(catalog.name(), "custom");
        assert_eq!(catalog.policy(), GatePolicy::Hard);
        assert_eq!(catalog.rules().len(), 1);
    }

    #[test]
    fn load_all_three_strategies() {
        let catalog = parse_and_load(
            r#"
name = "mixed"
policy = "soft"
extensions = ["cs"]

[[rules]]
name = "flag-call"
severity = "warn"
strategy = "line-pattern"
pattern = 'flag\('
exempt = "ALLOWED"

[[rules]]
name = "guarded-parse"
severity = "warn"
strategy = "line-pattern-with-context"
pattern = 'Parse\('

[[rules.require]]
suffix = "size-guard"
guard = '\.Length\s*>'
window = 8

[[rules]]
name = "param-used"
severity = "warn"
strategy = "signature-plus-body"
signature = 'void\s+\w+\([^)]*data[^)]*\)'
param = "data"
"#,
        )
        .unwrap();

        assert_eq!(catalog.policy(), GatePolicy::Soft);
        assert_eq!(catalog.rules().len(), 3);
        assert_eq!(catalog.rules()[0].exempt_token(), Some("ALLOWED"));
        assert_eq!(catalog.rules()[0].strategy().tag(), "line-pattern");
        assert_eq!(
            catalog.rules()[1].strategy().tag(),
            "line-pattern-with-context"
        );
        assert_eq!(catalog.rules()[2].strategy().tag(), "signature-plus-body");
    }

    #[test]
    fn lookahead_defaults_when_absent() {
        let catalog = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "param-used"
strategy = "signature-plus-body"
signature = 'void\s+F\('
param = "data"
"#,
        )
        .unwrap();
        match catalog.rules()[0].strategy() {
            Strategy::SignatureBody { max_lookahead, .. } => {
                assert_eq!(*max_lookahead, DEFAULT_MAX_LOOKAHEAD);
            }
            other => panic!("unexpected strategy {other:?}"),
        }
    }

    // -- Error cases --

    #[test]
    fn rejects_unknown_policy() {
        let result = parse_and_load(
            r#"
name = "g"
policy = "advisory"
"#,
        );
        assert!(matches!(result, Err(CatalogError::UnknownPolicy { .. })));
    }

    #[test]
    fn rejects_unknown_severity() {
        let result = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "r"
severity = "fatal"
strategy = "line-pattern"
pattern = 'x'
"#,
        );
        assert!(matches!(result, Err(CatalogError::UnknownSeverity { .. })));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let result = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "r"
strategy = "multi-line-pattern"
pattern = 'x'
"#,
        );
        assert!(matches!(result, Err(CatalogError::UnknownStrategy { .. })));
    }

    #[test]
    fn rejects_missing_pattern() {
        let result = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "r"
strategy = "line-pattern"
"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::MissingField { field, .. }) if field == "pattern"
        ));
    }

    #[test]
    fn rejects_context_strategy_without_requirements() {
        let result = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "r"
strategy = "line-pattern-with-context"
pattern = 'x'
"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::MissingField { field, .. }) if field == "require"
        ));
    }

    #[test]
    fn rejects_invalid_regex_with_context() {
        let result = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "r"
strategy = "line-pattern"
pattern = '(unclosed'
"#,
        );
        match result {
            Err(CatalogError::Validation { context, .. }) => {
                assert!(context.contains("rules[0]"));
                assert!(context.contains("pattern"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_guard_scope() {
        let result = parse_and_load(
            r#"
name = "g"

[[rules]]
name = "r"
strategy = "line-pattern-with-context"
pattern = 'x'

[[rules.require]]
suffix = "s"
guard = 'y'
scope = "module"
"#,
        );
        assert!(matches!(result, Err(CatalogError::UnknownScope { .. })));
    }
}
