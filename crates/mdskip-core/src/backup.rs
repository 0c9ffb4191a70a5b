//! Backups of the configuration plist.
//!
//! A backup gives the user a way to roll back, and doubles as a
//! nondestructive check that we can actually touch the configuration.

use crate::config::Settings;
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the backup file for a given moment.
pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!(
        "Spotlight-V100.VolumeConfiguration.{}.plist",
        now.format("%Y-%m-%d.%H-%M-%S")
    )
}

/// Copies the configuration plist into the backup directory.
///
/// Returns the path of the new backup.
pub fn create_backup(settings: &Settings) -> Result<PathBuf> {
    let dir = settings.resolve_backup_dir().ok_or(Error::NoBackupDir)?;
    let backup_path = dir.join(backup_file_name(Local::now()));

    fs::copy(&settings.plist_path, &backup_path).map_err(|source| Error::Backup {
        path: backup_path.clone(),
        source,
    })?;

    info!("Backed up {} to {}", settings.plist_path.display(), backup_path.display());
    Ok(backup_path)
}

/// Shell commands that restore `backup` and restart the service.
pub fn rollback_commands(backup: &Path, settings: &Settings) -> Vec<String> {
    vec![
        format!(
            "sudo cp {} {}",
            backup.display(),
            settings.plist_path.display()
        ),
        format!("sudo launchctl stop {}", settings.service_label),
        format!("sudo launchctl start {}", settings.service_label),
    ]
}
