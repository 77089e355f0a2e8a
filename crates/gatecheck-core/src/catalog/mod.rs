//! Gate catalogs: named, validated rule sets.
//!
//! A catalog is the declarative unit a gate instance runs: a name, a gate
//! policy, file-selection defaults, and rules. Catalogs come from the
//! built-in registry (`gatecheck-rules`) or from TOML files converted
//! through a serde DTO layer into the validated domain model.

mod dto;
mod loader;

pub use dto::{CatalogDto, RequireDto, RuleDto};
pub use loader::{load, CatalogError};

use std::path::{Path, PathBuf};

use crate::gate::{Gate, GateBuilder};
use crate::rule::Rule;
use crate::types::GatePolicy;

/// A named gate catalog: policy, file-selection defaults, and rules.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    policy: GatePolicy,
    description: String,
    skip_dirs: Vec<String>,
    extensions: Vec<String>,
    rules: Vec<Rule>,
}

impl Catalog {
    /// Creates a new catalog.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        policy: GatePolicy,
        description: impl Into<String>,
        skip_dirs: Vec<String>,
        extensions: Vec<String>,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            name: name.into(),
            policy,
            description: description.into(),
            skip_dirs,
            extensions,
            rules,
        }
    }

    /// Returns the catalog name (kebab-case, used as the gate name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the gate policy.
    #[must_use]
    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the directory names pruned from the walk.
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Returns the extension allow-list.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns the rules.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Builds a [`Gate`] for this catalog over the given scan roots.
    #[must_use]
    pub fn gate<I, P>(&self, roots: I) -> Gate
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        GateBuilder::new(self.name.as_str())
            .policy(self.policy)
            .rules(self.rules.iter().cloned())
            .roots(roots)
            .skip_dirs(self.skip_dirs.iter().cloned())
            .extensions(self.extensions.iter().cloned())
            .build()
    }
}

/// Loads a catalog from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn from_file(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    from_str(&content)
}

/// Loads a catalog from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn from_str(content: &str) -> Result<Catalog, CatalogError> {
    let dto: CatalogDto = toml::from_str(content).map_err(|e| CatalogError::Parse {
        message: e.to_string(),
    })?;
    load(dto)
}
