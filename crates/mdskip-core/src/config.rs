//! Locations and names of the things mdskip touches.

use std::path::PathBuf;

/// Path to the Spotlight volume configuration on Catalina and later.
pub const SPOTLIGHT_PLIST_PATH: &str =
    "/System/Volumes/Data/.Spotlight-V100/VolumeConfiguration.plist";

/// launchd label of the Spotlight metadata server.
pub const SPOTLIGHT_SERVICE_LABEL: &str = "com.apple.metadata.mds";

/// Key in the configuration plist holding the exclusion list.
pub const EXCLUSIONS_KEY: &str = "Exclusions";

/// Runtime settings, resolved from command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Configuration plist to read and modify.
    pub plist_path: PathBuf,

    /// launchd label to stop and start after changes.
    pub service_label: String,

    /// Directory for backups. `None` means the user's Desktop.
    pub backup_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plist_path: PathBuf::from(SPOTLIGHT_PLIST_PATH),
            service_label: SPOTLIGHT_SERVICE_LABEL.to_string(),
            backup_dir: None,
        }
    }
}

impl Settings {
    /// The directory backups are written to, falling back to `~/Desktop`.
    pub fn resolve_backup_dir(&self) -> Option<PathBuf> {
        self.backup_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
    }
}
