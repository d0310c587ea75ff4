//! Domain entities: core data structures

use std::fmt;
use std::path::PathBuf;

/// Kind of filesystem entry removed from a landing zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symbolic link (removed as a link, target untouched)
    Symlink,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::File => write!(f, "file"),
            EntryKind::Symlink => write!(f, "symlink"),
        }
    }
}

/// One top-level entry removed while cleaning a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    /// Entry name relative to the cleaned directory
    pub name: String,
    pub kind: EntryKind,
}

/// Result of emptying a landing zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Directory that was emptied
    pub dir: PathBuf,
    /// Removed entries, in removal order
    pub removed: Vec<RemovedEntry>,
}

impl CleanReport {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            removed: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// Number of removed entries of the given kind.
    pub fn count(&self, kind: EntryKind) -> usize {
        self.removed.iter().filter(|e| e.kind == kind).count()
    }
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
