//! Artifact directory selection.

use mdskip_core::IgnoreSet;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Problems with the search root. Errors below the root are logged and skipped.
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("failed to resolve '{path}': {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),
}

/// Options for directory selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectOptions {
    /// Follow symbolic links when walking directories.
    pub follow_symlinks: bool,
}

/// Whether a match at `relative` sits inside another match.
///
/// Only the components strictly before the last one are checked, so a
/// match is never suppressed by its own name.
pub fn is_suppressed(relative: &Path, ignore: &IgnoreSet) -> bool {
    let Some(parent) = relative.parent() else {
        return false;
    };
    parent.components().any(|component| match component {
        Component::Normal(name) => name.to_str().is_some_and(|name| ignore.contains(name)),
        _ => false,
    })
}

/// Lazy iterator over the directories to exclude under a root.
///
/// Yields absolute paths in walk order. The root itself is never yielded.
pub struct Selector<'a> {
    root: PathBuf,
    ignore: &'a IgnoreSet,
    walker: walkdir::IntoIter,
}

impl<'a> Selector<'a> {
    /// Creates a selector over `root`, which is canonicalized first.
    pub fn new(root: &Path, ignore: &'a IgnoreSet, options: SelectOptions) -> Result<Self, WalkError> {
        let root = root.canonicalize().map_err(|source| WalkError::Root {
            path: root.to_path_buf(),
            source,
        })?;

        if !root.is_dir() {
            return Err(WalkError::NotADirectory(root));
        }

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(options.follow_symlinks)
            .into_iter();

        Ok(Self {
            root,
            ignore,
            walker,
        })
    }

    /// The canonical root being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for Selector<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let matched = entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.ignore.contains(name));
            if !matched {
                continue;
            }

            // Nothing below a match can be yielded, so don't walk it.
            self.walker.skip_current_dir();

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative,
                Err(_) => {
                    debug!("Not under root, skipping: {}", entry.path().display());
                    continue;
                }
            };

            if is_suppressed(relative, self.ignore) {
                debug!("Covered by an ancestor: {}", entry.path().display());
                continue;
            }

            return Some(entry.into_path());
        }
    }
}

/// Selects artifact directories under `root` with default options.
///
/// # Example
///
/// ```no_run
/// use mdskip_core::IgnoreSet;
/// use mdskip_walker::select;
/// use std::path::Path;
///
/// let ignore = IgnoreSet::build(true, Vec::<String>::new()).unwrap();
/// for path in select(Path::new("."), &ignore).unwrap() {
///     println!("{}", path.display());
/// }
/// ```
pub fn select<'a>(root: &Path, ignore: &'a IgnoreSet) -> Result<Selector<'a>, WalkError> {
    Selector::new(root, ignore, SelectOptions::default())
}
