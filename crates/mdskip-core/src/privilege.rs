//! Effective-uid check.

use crate::error::{Error, Result};

/// Whether the process runs with an effective uid of 0.
#[cfg(unix)]
pub fn is_elevated() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}

/// Fails with [`Error::NotPrivileged`] unless running as root.
pub fn require_root() -> Result<()> {
    if is_elevated() {
        Ok(())
    } else {
        Err(Error::NotPrivileged)
    }
}
