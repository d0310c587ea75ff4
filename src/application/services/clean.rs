//! Landing zone cleanup service
//!
//! Empties a directory: every entry directly inside it is removed
//! (subdirectories recursively), the directory itself is kept.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CleanReport, EntryKind, RemovedEntry};
use crate::infrastructure::traits::FileSystem;

/// Filesystem cleaner for landing zones.
pub struct CleanService {
    fs: Arc<dyn FileSystem>,
}

impl CleanService {
    /// Create a new clean service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Remove every entry inside `dir`.
    ///
    /// Equivalent to [`clear_directory_with`](Self::clear_directory_with) without
    /// a progress callback.
    pub fn clear_directory(&self, dir: &Path) -> ApplicationResult<CleanReport> {
        self.clear_directory_with(dir, |_| {})
    }

    /// Remove every entry inside `dir`, calling `on_removed` after each removal.
    ///
    /// Not atomic: on error the entries removed so far stay removed.
    /// Symlinks are removed as links, their targets are never followed.
    ///
    /// # Errors
    /// - `DirectoryNotFound` if `dir` does not exist (nothing is created)
    /// - `NotADirectory` if `dir` is not a directory
    /// - `OperationFailed` for any other I/O failure
    #[instrument(skip(self, on_removed))]
    pub fn clear_directory_with<F>(
        &self,
        dir: &Path,
        mut on_removed: F,
    ) -> ApplicationResult<CleanReport>
    where
        F: FnMut(&RemovedEntry),
    {
        if !self.fs.exists(dir) {
            return Err(ApplicationError::DirectoryNotFound(dir.to_path_buf()));
        }
        if !self.fs.is_dir(dir) {
            return Err(ApplicationError::NotADirectory(dir.to_path_buf()));
        }

        let entries = self.fs.read_dir(dir).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::DirectoryNotFound(dir.to_path_buf()),
            _ => ApplicationError::OperationFailed {
                context: format!("read directory: {}", dir.display()),
                source: Box::new(e),
            },
        })?;
        debug!("clear_directory: {} entries in {}", entries.len(), dir.display());

        let mut report = CleanReport::new(dir.to_path_buf());
        for path in entries {
            let kind = self.remove_entry(&path)?;
            let entry = RemovedEntry {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
                kind,
            };
            on_removed(&entry);
            report.removed.push(entry);
        }

        debug!("clear_directory: removed {} entries", report.removed.len());
        Ok(report)
    }

    fn remove_entry(&self, path: &Path) -> ApplicationResult<EntryKind> {
        // symlink check first: is_dir follows links
        if self.fs.is_symlink(path) {
            self.fs
                .remove_file(path)
                .with_path_context("remove symlink", path)?;
            Ok(EntryKind::Symlink)
        } else if self.fs.is_dir(path) {
            self.fs
                .remove_dir_all(path)
                .with_path_context("remove directory", path)?;
            Ok(EntryKind::Directory)
        } else {
            self.fs
                .remove_file(path)
                .with_path_context("remove file", path)?;
            Ok(EntryKind::File)
        }
    }
}
