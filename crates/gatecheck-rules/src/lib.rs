//! # gatecheck-rules
//!
//! Built-in gate catalogs for gatecheck.
//!
//! Each module defines one catalog — the declarative rule set of a gate the
//! CI pipeline runs. The six catalogs mirror the hard gates and soft scans
//! of the scanned project: SQL injection, path safety, JSON parsing guards,
//! event-source verification, audit-log schema, and a heuristic security
//! scan.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit_schema;
pub mod event_source;
pub mod json_guard;
pub mod path_safety;
pub mod security_scan;
pub mod sql_injection;

use gatecheck_core::{Catalog, ModelError};

/// Returns all built-in catalogs, in stable name order.
///
/// # Errors
///
/// Returns an error if any embedded pattern fails validation — a malformed
/// built-in catalog is a tool defect surfaced as a configuration error, not
/// a scan result.
pub fn all_catalogs() -> Result<Vec<Catalog>, ModelError> {
    Ok(vec![
        audit_schema::catalog()?,
        event_source::catalog()?,
        json_guard::catalog()?,
        path_safety::catalog()?,
        security_scan::catalog()?,
        sql_injection::catalog()?,
    ])
}

/// Looks up a built-in catalog by name.
///
/// # Errors
///
/// Returns an error if the catalog's embedded patterns fail validation.
pub fn catalog(name: &str) -> Result<Option<Catalog>, ModelError> {
    let found = match name {
        audit_schema::NAME => Some(audit_schema::catalog()?),
        event_source::NAME => Some(event_source::catalog()?),
        json_guard::NAME => Some(json_guard::catalog()?),
        path_safety::NAME => Some(path_safety::catalog()?),
        security_scan::NAME => Some(security_scan::catalog()?),
        sql_injection::NAME => Some(sql_injection::catalog()?),
        _ => None,
    };
    Ok(found)
}
