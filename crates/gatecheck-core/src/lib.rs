//! # gatecheck-core
//!
//! Core engine for deterministic, rule-driven source gates.
//!
//! The engine walks a source tree, evaluates declarative rules against each
//! file's text, and produces a reproducible violation report used by CI as a
//! pass/fail gate. It provides:
//!
//! - [`Selector`] for deterministic file discovery
//! - [`Rule`] / [`Strategy`] — the declarative rule model
//! - [`scope`] — line-window and balanced-block context extraction
//! - [`Gate`] for running a rule set over selected files
//! - [`catalog`] for loading validated rule catalogs from TOML
//! - [`report`] for the JSON artifact and the one-line CI summary
//!
//! ## Example
//!
//! ```ignore
//! use gatecheck_core::{Gate, GatePolicy};
//!
//! let gate = Gate::builder("my-gate")
//!     .root("./src")
//!     .rules(rules)
//!     .build();
//!
//! let result = gate.run();
//! gatecheck_core::report::write_report(&result, out_path)?;
//! println!("{}", gatecheck_core::report::summary_line(&result));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod gate;
mod matcher;
pub mod report;
mod rule;
pub mod scope;
mod selector;
mod types;

pub use catalog::{Catalog, CatalogError};
pub use gate::{Gate, GateBuilder};
pub use matcher::evaluate;
pub use rule::{
    ContextRequirement, GlobPattern, GuardScope, ModelError, Pattern, Rule, RuleName, Strategy,
    DEFAULT_MAX_LOOKAHEAD, DEFAULT_WINDOW,
};
pub use selector::{default_skip_dirs, FileCandidate, Selector};
pub use types::{Counts, GatePolicy, GateResult, Severity, Violation};
