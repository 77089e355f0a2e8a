//! Soft-scan catalog: heuristic security findings.
//!
//! Warn-only by design: these patterns are lossy heuristics, useful as a
//! review queue but not precise enough to block a pipeline. The scan always
//! passes; findings land in the report and the summary line.

use gatecheck_core::{
    default_skip_dirs, Catalog, GatePolicy, GlobPattern, ModelError, Pattern, Rule, RuleName,
    Severity, Strategy,
};

/// Catalog name for the heuristic security scanner.
pub const NAME: &str = "security-scan";

/// Builds the security-scan catalog.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation.
pub fn catalog() -> Result<Catalog, ModelError> {
    let files = || -> Result<Vec<GlobPattern>, ModelError> { Ok(vec![GlobPattern::new("**/*.cs")?]) };

    let credential = Rule::new(
        RuleName::new("hardcoded-credential")?,
        Severity::Warn,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(r#"(?i)(?:password|secret|api_?key|token)\s*=\s*"[^"]{4,}""#)?,
        },
    )?;

    let insecure_tls = Rule::new(
        RuleName::new("certificate-validation-disabled")?,
        Severity::Warn,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(
                r"(?:ValidateCertificate|VerifyPeer|CheckCertificateRevocation)\s*=\s*false|ServerCertificateValidationCallback\s*=",
            )?,
        },
    )?;

    let process_concat = Rule::new(
        RuleName::new("process-argument-concatenation")?,
        Severity::Warn,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(r#"(?:Process\.Start|OS\.Execute)\s*\([^)]*(?:\+|\$")"#)?,
        },
    )?;

    let random_crypto = Rule::new(
        RuleName::new("weak-random-for-secret")?,
        Severity::Warn,
        files()?,
        Strategy::LinePattern {
            pattern: Pattern::new(r"(?i)new\s+Random\s*\([^)]*\)[^;]*(?:token|secret|key|nonce)")?,
        },
    )?;

    Ok(Catalog::new(
        NAME,
        GatePolicy::Soft,
        "Heuristic security findings: credentials, TLS bypasses, shell concatenation",
        default_skip_dirs(),
        vec!["cs".to_string()],
        vec![credential, insecure_tls, process_concat, random_crypto],
    ))
}
