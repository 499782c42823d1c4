//! Relocating files into category subfolders.
//!
//! A [`Mover`] owns the mutations of a run: folder creation and file moves.
//! Folders are created lazily, the first time a category receives a file.
//! In dry-run mode the same decisions are made and reported but nothing on
//! disk changes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors from moving a single file. These are recoverable at the file
/// boundary: the run records them and continues.
#[derive(Debug)]
pub enum MoveError {
    /// Failed to create a category folder.
    FolderCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file into its category folder.
    MoveFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderCreationFailed { path, source } => {
                write!(f, "Failed to create folder {}: {}", path.display(), source)
            }
            Self::MoveFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Result type for move operations.
pub type MoveResult<T> = Result<T, MoveError>;

/// What a single move did, or in dry-run mode would have done.
#[derive(Debug, Clone)]
pub struct MoveReceipt {
    /// Where the file ended up (or would end up).
    pub destination: PathBuf,
    /// True the first time this run needed to create the category folder.
    pub folder_created: bool,
    /// True when a name collision forced a `_copy` rename.
    pub renamed: bool,
}

/// Moves files into category subfolders under a fixed base directory.
pub struct Mover {
    base_path: PathBuf,
    dry_run: bool,
    ensured: HashSet<String>,
}

impl Mover {
    /// Creates a mover rooted at `base_path`. With `dry_run` set, all
    /// operations are simulated.
    pub fn new(base_path: &Path, dry_run: bool) -> Self {
        Self {
            base_path: base_path.to_path_buf(),
            dry_run,
            ensured: HashSet::new(),
        }
    }

    /// Whether this mover only simulates.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Moves `file_path` into the category's subfolder, preserving its name.
    ///
    /// The category folder is created on first need; the receipt reports that
    /// creation exactly once per category per run. A same-named file already
    /// at the destination is never overwritten: the incoming file gets a
    /// `_copy` suffix on its stem instead (`_copy2`, `_copy3`, ... until a
    /// free name is found).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortdir::mover::Mover;
    /// use std::path::Path;
    ///
    /// let mut mover = Mover::new(Path::new("/path/to/dir"), false);
    /// match mover.move_to_category(Path::new("/path/to/dir/photo.png"), "Images") {
    ///     Ok(receipt) => println!("Moved to {}", receipt.destination.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_to_category(
        &mut self,
        file_path: &Path,
        category: &str,
    ) -> MoveResult<MoveReceipt> {
        let (folder, folder_created) = self.ensure_category_folder(category)?;

        let file_name = file_path.file_name().ok_or_else(|| MoveError::MoveFailed {
            source: file_path.to_path_buf(),
            destination: folder.clone(),
            source_error: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;

        let preferred = folder.join(file_name);
        let destination = free_destination(&preferred);
        let renamed = destination != preferred;

        if !self.dry_run {
            fs::rename(file_path, &destination).map_err(|e| MoveError::MoveFailed {
                source: file_path.to_path_buf(),
                destination: destination.clone(),
                source_error: e,
            })?;
        }

        Ok(MoveReceipt {
            destination,
            folder_created,
            renamed,
        })
    }

    /// Ensures the category subfolder exists, creating it on first need.
    ///
    /// Returns the folder path and whether this call had to create it.
    /// Creation is reported at most once per category per run, and never for
    /// folders that already existed.
    fn ensure_category_folder(&mut self, category: &str) -> MoveResult<(PathBuf, bool)> {
        let folder = self.base_path.join(category);
        if self.ensured.contains(category) {
            return Ok((folder, false));
        }

        let mut created = false;
        if !folder.exists() {
            if !self.dry_run {
                fs::create_dir(&folder).map_err(|e| MoveError::FolderCreationFailed {
                    path: folder.clone(),
                    source: e,
                })?;
            }
            created = true;
        }

        self.ensured.insert(category.to_string());
        Ok((folder, created))
    }
}

/// First free destination: the preferred name itself, then `stem_copy`,
/// `stem_copy2`, and so on.
fn free_destination(preferred: &Path) -> PathBuf {
    if !preferred.exists() {
        return preferred.to_path_buf();
    }

    let stem = preferred
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let suffix = preferred
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let candidate_name = if attempt == 1 {
            format!("{}_copy{}", stem, suffix)
        } else {
            format!("{}_copy{}{}", stem, attempt, suffix)
        };
        let candidate = preferred.with_file_name(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_creates_folder_and_moves_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let file_path = base.join("report.pdf");
        fs::write(&file_path, "content").expect("Failed to write test file");

        let mut mover = Mover::new(base, false);
        let receipt = mover
            .move_to_category(&file_path, "Documents")
            .expect("Failed to move file");

        assert!(receipt.folder_created);
        assert!(!receipt.renamed);
        assert!(!file_path.exists());
        assert!(base.join("Documents").is_dir());
        assert!(base.join("Documents").join("report.pdf").exists());
    }

    #[test]
    fn test_move_reuses_existing_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Images")).expect("Failed to create folder");
        let file_path = base.join("photo.png");
        fs::write(&file_path, "content").expect("Failed to write test file");

        let mut mover = Mover::new(base, false);
        let receipt = mover
            .move_to_category(&file_path, "Images")
            .expect("Failed to move file");

        assert!(!receipt.folder_created);
        assert!(base.join("Images").join("photo.png").exists());
    }

    #[test]
    fn test_folder_creation_reported_once_per_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let first = base.join("a.txt");
        let second = base.join("b.txt");
        fs::write(&first, "x").expect("write");
        fs::write(&second, "x").expect("write");

        let mut mover = Mover::new(base, false);
        let first_receipt = mover.move_to_category(&first, "Documents").expect("move");
        let second_receipt = mover.move_to_category(&second, "Documents").expect("move");

        assert!(first_receipt.folder_created);
        assert!(!second_receipt.folder_created);
    }

    #[test]
    fn test_collision_appends_copy_suffix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Documents")).expect("mkdir");
        fs::write(base.join("Documents").join("notes.txt"), "existing").expect("write");
        let incoming = base.join("notes.txt");
        fs::write(&incoming, "incoming").expect("write");

        let mut mover = Mover::new(base, false);
        let receipt = mover.move_to_category(&incoming, "Documents").expect("move");

        assert!(receipt.renamed);
        assert_eq!(
            receipt.destination,
            base.join("Documents").join("notes_copy.txt")
        );
        assert!(receipt.destination.exists());
        // The original at the destination is untouched.
        let kept = fs::read_to_string(base.join("Documents").join("notes.txt")).expect("read");
        assert_eq!(kept, "existing");
    }

    #[test]
    fn test_repeated_collisions_number_the_copies() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Documents")).expect("mkdir");
        fs::write(base.join("Documents").join("notes.txt"), "one").expect("write");
        fs::write(base.join("Documents").join("notes_copy.txt"), "two").expect("write");

        let incoming = base.join("notes.txt");
        fs::write(&incoming, "three").expect("write");

        let mut mover = Mover::new(base, false);
        let receipt = mover.move_to_category(&incoming, "Documents").expect("move");

        assert_eq!(
            receipt.destination,
            base.join("Documents").join("notes_copy2.txt")
        );
    }

    #[test]
    fn test_collision_suffix_respects_multi_dot_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Archives")).expect("mkdir");
        fs::write(base.join("Archives").join("backup.tar.gz"), "existing").expect("write");
        let incoming = base.join("backup.tar.gz");
        fs::write(&incoming, "incoming").expect("write");

        let mut mover = Mover::new(base, false);
        let receipt = mover.move_to_category(&incoming, "Archives").expect("move");

        assert_eq!(
            receipt.destination,
            base.join("Archives").join("backup.tar_copy.gz")
        );
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let file_path = base.join("song.mp3");
        fs::write(&file_path, "content").expect("write");

        let mut mover = Mover::new(base, true);
        assert!(mover.is_dry_run());
        let receipt = mover.move_to_category(&file_path, "Audio").expect("move");

        assert!(receipt.folder_created);
        assert_eq!(receipt.destination, base.join("Audio").join("song.mp3"));
        assert!(file_path.exists());
        assert!(!base.join("Audio").exists());
    }

    #[test]
    fn test_dry_run_reports_folder_once() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let first = base.join("a.mp3");
        let second = base.join("b.mp3");
        fs::write(&first, "x").expect("write");
        fs::write(&second, "x").expect("write");

        let mut mover = Mover::new(base, true);
        let first_receipt = mover.move_to_category(&first, "Audio").expect("move");
        let second_receipt = mover.move_to_category(&second, "Audio").expect("move");

        assert!(first_receipt.folder_created);
        assert!(!second_receipt.folder_created);
    }

    #[test]
    fn test_move_missing_source_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        let mut mover = Mover::new(base, false);
        let result = mover.move_to_category(&base.join("vanished.txt"), "Documents");
        assert!(matches!(result, Err(MoveError::MoveFailed { .. })));
    }
}
