//! mdskip Walker - finding artifact directories
//!
//! Walks a directory tree and yields every directory whose name is in
//! the [`IgnoreSet`](mdskip_core::IgnoreSet), except those nested inside
//! another match. Registering `repo/node_modules` already covers
//! `repo/node_modules/pkg/node_modules`, so the deeper one is dropped.

mod selector;

pub use selector::{is_suppressed, select, SelectOptions, Selector, WalkError};
