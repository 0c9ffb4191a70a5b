//! Access to the list of paths Spotlight skips.
//!
//! The list lives in a plist owned by the system. We only ever see it
//! through [`ExclusionStore`], so the walker and registrar don't care
//! whether the backing store is `plutil`, a file, or memory.

use crate::config::{Settings, EXCLUSIONS_KEY};
use crate::error::{failure_reason, Error, Result};
use plist::Value;
use std::io::Cursor;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// A list-valued configuration key holding excluded path strings.
pub trait ExclusionStore {
    /// Returns the current exclusions, in stored order.
    fn read(&self) -> Result<Vec<String>>;

    /// Adds `path` to the end of the list.
    fn append(&mut self, path: &str) -> Result<()>;
}

/// Parses the XML plist `plutil -extract ... xml1` prints for an array.
///
/// Non-string and empty items are skipped.
pub fn parse_exclusions(xml: &[u8]) -> Result<Vec<String>> {
    let value = Value::from_reader_xml(Cursor::new(xml))
        .map_err(|e| Error::Malformed(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.is_empty() => Some(text),
                _ => None,
            })
            .collect()),
        _ => Err(Error::Malformed(format!(
            "'{}' is not an array",
            EXCLUSIONS_KEY
        ))),
    }
}

/// Exclusions stored in a plist, read and written through `plutil`.
#[derive(Debug, Clone)]
pub struct PlutilStore {
    program: String,
    plist_path: PathBuf,
}

impl PlutilStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: "plutil".to_string(),
            plist_path: settings.plist_path.clone(),
        }
    }

    /// Uses `program` instead of `plutil` from `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments that print the exclusion list as XML on stdout.
    pub fn extract_args(&self) -> Vec<String> {
        vec![
            "-extract".to_string(),
            EXCLUSIONS_KEY.to_string(),
            "xml1".to_string(),
            "-o".to_string(),
            "-".to_string(),
            self.plist_path.display().to_string(),
        ]
    }

    /// Arguments that insert `path` at position `index` of the list.
    pub fn insert_args(&self, index: usize, path: &str) -> Vec<String> {
        vec![
            "-insert".to_string(),
            format!("{}.{}", EXCLUSIONS_KEY, index),
            "-string".to_string(),
            path.to_string(),
            self.plist_path.display().to_string(),
        ]
    }
}

impl ExclusionStore for PlutilStore {
    fn read(&self) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .args(self.extract_args())
            .output()
            .map_err(|e| Error::spawn(&self.program, e))?;

        if !output.status.success() {
            return Err(Error::ReadExclusions {
                stderr: failure_reason(&output),
            });
        }

        parse_exclusions(&output.stdout)
    }

    fn append(&mut self, path: &str) -> Result<()> {
        let index = self.read()?.len();
        debug!("Inserting {} at {}.{}", path, EXCLUSIONS_KEY, index);

        let output = Command::new(&self.program)
            .args(self.insert_args(index, path))
            .output()
            .map_err(|e| Error::spawn(&self.program, e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::Append {
                path: path.to_string(),
                reason: failure_reason(&output),
            })
        }
    }
}

/// An exclusion list held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: Vec<String>,
}

impl MemoryStore {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl ExclusionStore for MemoryStore {
    fn read(&self) -> Result<Vec<String>> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, path: &str) -> Result<()> {
        self.entries.push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<array>
	<string>/Users/me/repos/pipeline/target</string>
	<string>/Users/me/repos/pipeline/node_modules</string>
</array>
</plist>
"#;

    #[test]
    fn test_parse_exclusions_keeps_order() {
        let paths = parse_exclusions(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            paths,
            vec![
                "/Users/me/repos/pipeline/target".to_string(),
                "/Users/me/repos/pipeline/node_modules".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_empty_array() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<array/>
</plist>
"#;
        assert!(parse_exclusions(xml.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_skips_non_strings_and_empty_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<array>
	<string>/a/target</string>
	<integer>3</integer>
	<string></string>
</array>
</plist>
"#;
        assert_eq!(parse_exclusions(xml.as_bytes()).unwrap(), vec!["/a/target"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_exclusions(b"<plist><array><string>").unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<string>/a/target</string>
</plist>
"#;
        let err = parse_exclusions(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_plutil_arguments() {
        let store = PlutilStore::new(&Settings::default());
        assert_eq!(
            store.extract_args(),
            vec![
                "-extract",
                "Exclusions",
                "xml1",
                "-o",
                "-",
                "/System/Volumes/Data/.Spotlight-V100/VolumeConfiguration.plist",
            ]
        );
        assert_eq!(
            store.insert_args(4, "/a/target")[..4],
            ["-insert", "Exclusions.4", "-string", "/a/target"]
        );
    }

    #[test]
    fn test_missing_plutil_is_reported() {
        let store =
            PlutilStore::new(&Settings::default()).with_program("mdskip-no-such-plutil-binary");
        let err = store.read().unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[test]
    fn test_memory_store_appends_in_order() {
        let mut store = MemoryStore::new(vec!["/a".to_string()]);
        store.append("/b").unwrap();
        assert_eq!(store.read().unwrap(), vec!["/a", "/b"]);
    }
}
