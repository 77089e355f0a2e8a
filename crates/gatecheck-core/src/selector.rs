//! Deterministic file discovery.
//!
//! The selector walks one or more root directories, prunes skip-directories
//! by name (matched against any path segment), applies an optional extension
//! allow-list, and returns a duplicate-free candidate list sorted by relative
//! path. Re-running on an unchanged tree yields byte-identical output; the
//! aggregator's determinism contract builds on this.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

/// A file selected for scanning. Immutable; created once per scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Absolute (or root-joined) path, used for reading.
    pub path: PathBuf,
    /// Path relative to the scan root it was found under, used for
    /// rule globs and reporting.
    pub rel: PathBuf,
    /// Lowercased extension without the dot; empty when absent.
    pub ext: String,
}

/// Walks root directories and produces [`FileCandidate`]s.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    roots: Vec<PathBuf>,
    skip_dirs: Vec<String>,
    extensions: Vec<String>,
}

impl Selector {
    /// Creates a selector over the given root directories.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            skip_dirs: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Sets directory names to prune wherever they appear as a path segment.
    #[must_use]
    pub fn skip_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the extension allow-list (without dots). Empty allows all files.
    #[must_use]
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = exts
            .into_iter()
            .map(|e| e.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Returns the configured roots.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Selects candidate files.
    ///
    /// Non-existent roots are silently skipped — callers may pass roots that
    /// are optional subtrees of the project. Symlinks and unreadable entries
    /// are skipped with a log line and no report entry. The result is sorted
    /// by relative path and duplicate-free (first root wins).
    #[must_use]
    pub fn select(&self) -> Vec<FileCandidate> {
        // Keyed by relative path for dedup + lexicographic order in one pass.
        let mut by_rel: BTreeMap<PathBuf, FileCandidate> = BTreeMap::new();

        for root in &self.roots {
            if !root.is_dir() {
                debug!("skipping non-existent root {}", root.display());
                continue;
            }

            let mut builder = ignore::WalkBuilder::new(root);
            // Gates must see generated and git-ignored trees unless a skip
            // dir says otherwise; disable all default filtering.
            builder.standard_filters(false).follow_links(false);

            let skip = self.skip_dirs.clone();
            builder.filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !skip.iter().any(|s| s.as_str() == name)
            });

            for entry in builder.build() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("skipping unreadable entry: {e}");
                        continue;
                    }
                };
                let path = entry.path();

                if entry.path_is_symlink() || !path.is_file() {
                    continue;
                }

                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase)
                    .unwrap_or_default();

                if !self.extensions.is_empty() && !self.extensions.contains(&ext) {
                    continue;
                }

                let rel = path.strip_prefix(root).unwrap_or(path).to_path_buf();
                by_rel.entry(rel.clone()).or_insert_with(|| FileCandidate {
                    path: path.to_path_buf(),
                    rel,
                    ext,
                });
            }
        }

        by_rel.into_values().collect()
    }
}

/// Skip-directory names shared by the built-in gate catalogs: build output,
/// version-control metadata, editor caches, and log/backup trees.
#[must_use]
pub fn default_skip_dirs() -> Vec<String> {
    [".git", ".godot", ".import", "build", "logs", "backups"]
        .iter()
        .map(ToString::to_string)
        .collect()
}
