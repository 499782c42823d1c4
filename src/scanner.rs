//! Directory scanning: selecting which files a run will process.
//!
//! The scanner lists the immediate children of the target directory and keeps
//! only regular files. Subdirectories are never descended into. Hidden files
//! (leading `.`), temporary files (leading `~`), the active run log, and any
//! configured exclusions are filtered out before classification, so they are
//! invisible to the rest of the pipeline.

use crate::category::extension_of;
use crate::config::CompiledFilters;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that abort a run before any file is touched.
#[derive(Debug)]
pub enum ScanError {
    /// The target path does not exist.
    DirectoryNotFound(PathBuf),
    /// The target path exists but is not a directory.
    NotADirectory(PathBuf),
    /// The directory listing could not be read.
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::DirectoryNotFound(path) => {
                write!(f, "Directory not found: {}", path.display())
            }
            ScanError::NotADirectory(path) => {
                write!(f, "Not a directory: {}", path.display())
            }
            ScanError::ReadFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// A regular file selected for processing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// The bare file name, lossily decoded.
    pub name: String,
    /// The text after the last `.` of the name, if any.
    pub extension: Option<String>,
    /// Resolved absolute path of the file.
    pub path: PathBuf,
}

/// Lists the regular files of a target directory, applying built-in and
/// configured exclusions.
pub struct Scanner<'a> {
    root: &'a Path,
    log_path: PathBuf,
    filters: &'a CompiledFilters,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner for `root` that will never yield the run log at
    /// `log_path`, however that path is spelled.
    pub fn new(root: &'a Path, log_path: &Path, filters: &'a CompiledFilters) -> Self {
        Self {
            root,
            log_path: resolve_path(log_path),
            filters,
        }
    }

    /// Produces the files to process, sorted by name.
    ///
    /// Fails before any file is touched when the root is missing, is not a
    /// directory, or cannot be read. Excluded entries are simply absent from
    /// the result; they are not counted anywhere.
    pub fn scan(&self) -> Result<Vec<FileEntry>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::DirectoryNotFound(self.root.to_path_buf()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.to_path_buf()));
        }

        // Resolved so that entry paths compare cleanly against the log path.
        let resolved_root = fs::canonicalize(self.root).map_err(|e| ScanError::ReadFailed {
            path: self.root.to_path_buf(),
            source: e,
        })?;

        let entries = fs::read_dir(&resolved_root).map_err(|e| ScanError::ReadFailed {
            path: self.root.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            if let Ok(file_type) = entry.file_type()
                && file_type.is_file()
            {
                // The name is for display and classification; the path keeps
                // the on-disk bytes, so non-UTF-8 names still move.
                let name = entry.file_name().to_string_lossy().to_string();
                let path = entry.path();
                if self.should_skip(&name, &path) {
                    continue;
                }
                let extension = extension_of(&name).map(str::to_string);
                files.push(FileEntry {
                    name,
                    extension,
                    path,
                });
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Built-in exclusions first, then configured rules.
    fn should_skip(&self, name: &str, path: &Path) -> bool {
        name.starts_with('.')
            || name.starts_with('~')
            || path == self.log_path
            || self.filters.excludes(path)
    }
}

/// Resolves a path to an absolute, symlink-free form for comparison.
///
/// A file that does not exist yet cannot be canonicalized directly, so its
/// parent is resolved instead and the file name re-attached.
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => fs::canonicalize(parent)
            .map(|resolved| resolved.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
