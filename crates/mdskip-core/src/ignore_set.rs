//! The set of directory names that mark build and dependency artifacts.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use tracing::warn;

/// Directory names ignored unless `--skip-defaults` is given.
pub const DEFAULT_IGNORE_DIRECTORIES: &[&str] = &[
    "node_modules", // Node.js dependencies
    "target",       // Rust, Maven build output
    "build",        // Generic build output
    "dist",         // Distribution/build output
    "venv",         // Python virtual environments
    ".venv",        // Python virtual environments (hidden)
    "vendor",       // Go, PHP, Ruby dependencies
    "__pycache__",  // Python bytecode cache
    ".gradle",      // Gradle build artifacts
    ".next",        // Next.js build output
    "coverage",     // Test coverage reports
    "Pods",         // CocoaPods dependencies
];

/// A deduplicated set of directory basenames.
///
/// Iteration is sorted, which keeps the "Ignoring directories" banner stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    /// Builds the set from the defaults (unless skipped) plus extra names.
    ///
    /// Empty names are dropped. Names containing a path separator can never
    /// equal a basename, so they are dropped with a warning. Fails with
    /// [`Error::NoIgnoreNames`] if nothing is left.
    pub fn build<I, S>(include_defaults: bool, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();

        if include_defaults {
            set.names
                .extend(DEFAULT_IGNORE_DIRECTORIES.iter().map(|s| s.to_string()));
        }

        for name in extra {
            let name = name.into();
            if name.is_empty() {
                continue;
            }
            if name.contains(std::path::is_separator) {
                warn!("Ignoring '{}': not a plain directory name", name);
                continue;
            }
            set.names.insert(name);
        }

        if set.names.is_empty() {
            return Err(Error::NoIgnoreNames);
        }

        Ok(set)
    }

    /// Whether `name` is one of the ignored basenames.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
