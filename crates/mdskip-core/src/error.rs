//! Error types for mdskip.
//!
//! Each variant says what went wrong. Variants that the user can fix
//! carry a remediation hint, available through [`Error::hint`].

use std::path::PathBuf;
use thiserror::Error;

/// Convenience type for fallible mdskip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Things that can go wrong while configuring Spotlight exclusions.
#[derive(Error, Debug)]
pub enum Error {
    /// The process is not running with an effective uid of 0.
    #[error("this tool must be run with sudo privileges")]
    NotPrivileged,

    /// The IgnoreSet ended up empty.
    #[error("no directories to ignore")]
    NoIgnoreNames,

    /// Copying the configuration plist aside failed.
    #[error("could not create backup of Spotlight configuration at '{path}': {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No home directory to place the default backup in.
    #[error("could not determine a backup directory")]
    NoBackupDir,

    /// The query tool ran but reported failure.
    #[error("failed to read Spotlight configuration: {stderr}")]
    ReadExclusions { stderr: String },

    /// An external command could not be spawned because it does not exist.
    #[error("'{tool}' command not found")]
    ToolNotFound { tool: String },

    /// Spawning or waiting on an external command failed for another reason.
    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The query tool's output was not a plist array.
    #[error("failed to parse Spotlight configuration: {0}")]
    Malformed(String),

    /// Inserting a single exclusion failed.
    #[error("failed to add '{path}' to Spotlight exclusions: {reason}")]
    Append { path: String, reason: String },

    /// `launchctl stop` or `launchctl start` failed.
    #[error("failed to {action} Spotlight service: {reason}")]
    Service { action: &'static str, reason: String },
}

impl Error {
    /// Creates a spawn error, mapping a missing binary to [`Error::ToolNotFound`].
    pub fn spawn(tool: impl Into<String>, source: std::io::Error) -> Self {
        let tool = tool.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::ToolNotFound { tool }
        } else {
            Self::Spawn { tool, source }
        }
    }

    /// Returns what the user can do about this error, if anything.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotPrivileged | Self::Backup { .. } => Some("You need to run this tool with 'sudo'"),
            Self::ReadExclusions { .. } => Some("You may need to run this tool with 'sudo'"),
            Self::NoIgnoreNames => Some("Use --also-ignore or remove --skip-defaults"),
            Self::NoBackupDir => Some("Pass --backup-dir to choose where the backup goes"),
            Self::ToolNotFound { .. } => Some("This tool requires macOS"),
            Self::Service { .. } => Some("You may need to restart Spotlight manually"),
            Self::Spawn { .. } | Self::Malformed(_) | Self::Append { .. } => None,
        }
    }
}

/// Trimmed stderr of a failed command, or its exit status if stderr is empty.
pub(crate) fn failure_reason(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    }
}
