//! Registers candidate directories as Spotlight exclusions.
//!
//! Every check re-reads the store: another process owns the list, so
//! nothing is cached between paths.

use crate::error::{Error, Result};
use crate::store::ExclusionStore;
use std::path::Path;
use tracing::{debug, warn};

/// What happened to a single candidate path.
#[derive(Debug)]
pub enum RegisterOutcome {
    /// The path was already in the exclusion list.
    AlreadyExcluded,
    /// The path was appended.
    Added,
    /// Dry run: the path would have been appended.
    WouldAdd,
    /// Appending failed. The run continues with the next path.
    Failed(Error),
}

impl RegisterOutcome {
    /// Whether this outcome counts towards the "new exclusions" total.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Added | Self::WouldAdd)
    }
}

/// Running totals over a registration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSummary {
    pub candidates: usize,
    pub added: usize,
    pub already_excluded: usize,
    pub failed: usize,
}

impl RegisterSummary {
    pub fn record(&mut self, outcome: &RegisterOutcome) {
        self.candidates += 1;
        match outcome {
            RegisterOutcome::AlreadyExcluded => self.already_excluded += 1,
            RegisterOutcome::Added | RegisterOutcome::WouldAdd => self.added += 1,
            RegisterOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Read-check-append over an [`ExclusionStore`].
pub struct Registrar<S> {
    store: S,
    dry_run: bool,
}

impl<S: ExclusionStore> Registrar<S> {
    pub fn new(store: S, dry_run: bool) -> Self {
        Self { store, dry_run }
    }

    /// Adds `path` to the store unless it is already there.
    ///
    /// Read failures are fatal and returned as `Err`. Append failures are
    /// logged and reported as [`RegisterOutcome::Failed`]. In dry-run mode
    /// the store is read but never written.
    pub fn register(&mut self, path: &Path) -> Result<RegisterOutcome> {
        let current = self.store.read()?;
        let path_str = path.display().to_string();

        if current.iter().any(|existing| *existing == path_str) {
            debug!("Already excluded: {}", path_str);
            return Ok(RegisterOutcome::AlreadyExcluded);
        }

        if self.dry_run {
            debug!("Would exclude: {}", path_str);
            return Ok(RegisterOutcome::WouldAdd);
        }

        match self.store.append(&path_str) {
            Ok(()) => {
                debug!("Excluded: {}", path_str);
                Ok(RegisterOutcome::Added)
            }
            Err(e) => {
                warn!("{}", e);
                Ok(RegisterOutcome::Failed(e))
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
