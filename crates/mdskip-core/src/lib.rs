//! mdskip Core - ignore sets, exclusion storage and service control
//!
//! Everything mdskip does besides walking the filesystem lives here:
//! deciding which directory names to skip, reading and extending the
//! Spotlight exclusion list, backing up its configuration, and
//! restarting the metadata server afterwards.
//!
//! # Example
//!
//! ```no_run
//! use mdskip_core::{MemoryStore, Registrar};
//! use std::path::Path;
//!
//! let mut registrar = Registrar::new(MemoryStore::default(), false);
//! let outcome = registrar.register(Path::new("/Users/me/repo/target")).unwrap();
//! assert!(outcome.is_new());
//! ```

pub mod backup;
pub mod config;
pub mod error;
pub mod ignore_set;
pub mod privilege;
pub mod registrar;
pub mod service;
pub mod store;

pub use backup::{create_backup, rollback_commands};
pub use config::Settings;
pub use error::{Error, Result};
pub use ignore_set::{IgnoreSet, DEFAULT_IGNORE_DIRECTORIES};
pub use privilege::require_root;
pub use registrar::{RegisterOutcome, RegisterSummary, Registrar};
pub use service::{restart, Launchctl, RestartReport, ServiceControl};
pub use store::{parse_exclusions, ExclusionStore, MemoryStore, PlutilStore};
