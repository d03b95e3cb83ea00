/// File organization pass over a single directory.
///
/// This module enumerates the immediate entries of a target directory,
/// classifies every file by extension and moves it into a sub-folder named
/// after its category. Per-file failures are logged and counted as skipped;
/// they never abort the run.
use crate::file_category::{ExtensionLookup, extension_of};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that stop a run before or while listing the target directory.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The target path is missing or is not a directory.
    #[error("The specified path '{}' is not a valid directory", .path.display())]
    InvalidTarget { path: PathBuf },

    /// The target directory could not be listed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors for a single file. These are logged and counted, never propagated.
#[derive(Debug, Error)]
pub enum MoveError {
    /// Failed to create the category directory.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Something already sits at the destination and the policy is to skip.
    #[error("Destination {} already exists", .destination.display())]
    DestinationExists { destination: PathBuf },

    /// The rename (or copy fallback) failed.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// What to do when the destination already holds an entry with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Leave both files alone and count the source as skipped.
    #[default]
    Skip,
    /// Replace the existing destination file.
    Overwrite,
}

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeOptions {
    pub conflict: ConflictPolicy,
    /// Classify and report without creating folders or moving files.
    pub dry_run: bool,
}

/// Counters for one run.
///
/// `moved + skipped` equals the number of non-directory entries found in the
/// target directory when the run started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub moved: usize,
    pub skipped: usize,
    /// Moved files per category name.
    pub by_category: BTreeMap<String, usize>,
}

impl RunReport {
    fn record_move(&mut self, category: &str) {
        self.moved += 1;
        *self.by_category.entry(category.to_string()).or_insert(0) += 1;
    }

    fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn total_processed(&self) -> usize {
        self.moved + self.skipped
    }
}

/// Organizes the files of one directory into category sub-folders.
pub struct FileOrganizer<'a> {
    target: PathBuf,
    lookup: &'a ExtensionLookup,
    options: OrganizeOptions,
}

impl<'a> FileOrganizer<'a> {
    /// Creates an organizer for `target`.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::InvalidTarget` if `target` does not exist or is
    /// not a directory. Nothing is touched in that case.
    pub fn new(
        target: &Path,
        lookup: &'a ExtensionLookup,
        options: OrganizeOptions,
    ) -> OrganizeResult<Self> {
        if !target.is_dir() {
            return Err(OrganizeError::InvalidTarget {
                path: target.to_path_buf(),
            });
        }

        Ok(Self {
            target: target.to_path_buf(),
            lookup,
            options,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Runs one classification-and-move pass over the target directory.
    ///
    /// The directory listing is taken once up front and processed in name
    /// order. Sub-directories are ignored and not counted.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::ReadDir` if the directory cannot be listed.
    /// Failures on individual files are counted in the report instead.
    pub fn run(&self) -> OrganizeResult<RunReport> {
        info!(
            dir = %self.target.display(),
            dry_run = self.options.dry_run,
            "Starting file organization process..."
        );

        let read_dir_error = |source: io::Error| OrganizeError::ReadDir {
            path: self.target.clone(),
            source,
        };
        let mut entries = fs::read_dir(&self.target)
            .map_err(read_dir_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_dir_error)?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut report = RunReport::default();
        for entry in entries {
            let path = entry.path();
            // Follows symlinks, so a link to a directory is left alone too.
            if fs::metadata(&path).is_ok_and(|meta| meta.is_dir()) {
                debug!(path = %path.display(), "Ignoring directory");
                continue;
            }
            self.process_file(&path, &mut report);
        }

        info!("--- Organization Complete ---");
        info!("Total files moved: {}", report.moved);
        info!("Total files skipped: {}", report.skipped);
        Ok(report)
    }

    fn process_file(&self, path: &Path, report: &mut RunReport) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(ext) = extension_of(&file_name) else {
            warn!("Skipping file without extension: {}", file_name);
            report.record_skip();
            return;
        };
        let category = self.lookup.category_for(&ext);

        if self.options.dry_run {
            match self.predict_block(category, &file_name) {
                Some(reason) => {
                    warn!("Would skip {}: {}", file_name, reason);
                    report.record_skip();
                }
                None => {
                    info!("Would move: {} -> {}/", file_name, category);
                    report.record_move(category);
                }
            }
            return;
        }

        match self.move_to_category(path, category) {
            Ok(_) => {
                info!("Moved: {} -> {}/", file_name, category);
                report.record_move(category);
            }
            Err(e) => {
                error!("Failed to move {}. Error: {}", file_name, e);
                report.record_skip();
            }
        }
    }

    /// Why a real run would refuse to move `file_name` into `category`, if it
    /// would. Mirrors the checks of [`Self::move_to_category`] without
    /// touching the filesystem.
    fn predict_block(&self, category: &str, file_name: &str) -> Option<String> {
        let category_path = self.target.join(category);
        if entry_exists(&category_path) && !category_path.is_dir() {
            return Some(format!("{} exists and is not a directory", category));
        }

        let destination = category_path.join(file_name);
        if destination.is_dir() {
            return Some(format!("{}/{} is a directory", category, file_name));
        }
        if self.options.conflict == ConflictPolicy::Skip && entry_exists(&destination) {
            return Some(format!("{}/{} already exists", category, file_name));
        }
        None
    }

    /// Moves a file into `<target>/<category>/`, keeping its name.
    ///
    /// The category directory is created if needed. Returns the new path.
    ///
    /// # Errors
    ///
    /// Returns a `MoveError` if the directory cannot be created, if the
    /// destination exists under `ConflictPolicy::Skip`, or if the move fails.
    pub fn move_to_category(&self, file_path: &Path, category: &str) -> Result<PathBuf, MoveError> {
        let category_path = self.target.join(category);
        fs::create_dir_all(&category_path).map_err(|e| MoveError::DirectoryCreationFailed {
            path: category_path.clone(),
            source: e,
        })?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| MoveError::FileMoveFailure {
                from: file_path.to_path_buf(),
                to: category_path.clone(),
                source: io::Error::new(ErrorKind::InvalidInput, "file has no name component"),
            })?;
        let destination_path = category_path.join(file_name);

        if self.options.conflict == ConflictPolicy::Skip && entry_exists(&destination_path) {
            return Err(MoveError::DestinationExists {
                destination: destination_path,
            });
        }

        relocate(file_path, &destination_path).map_err(|e| MoveError::FileMoveFailure {
            from: file_path.to_path_buf(),
            to: destination_path.clone(),
            source: e,
        })?;

        Ok(destination_path)
    }
}

/// True if anything, including a dangling symlink, sits at `path`.
fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Renames `from` to `to`, copying then removing the source when the two
/// paths are on different devices.
fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!(from = %from.display(), to = %to.display(), "Rename crosses devices, copying");
            copy_then_remove(from, to)
        }
        result => result,
    }
}

/// Copies `from` to `to` and removes `from`.
///
/// On failure the file is left only at `from`: a partial copy is removed, as
/// is a complete copy whose source could not be removed. A file that already
/// sat at `to` before the copy started is left alone.
fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let replaced = entry_exists(to);
    if let Err(e) = fs::copy(from, to) {
        if !replaced {
            let _ = fs::remove_file(to);
        }
        return Err(e);
    }
    if let Err(e) = fs::remove_file(from) {
        let _ = fs::remove_file(to);
        return Err(e);
    }
    Ok(())
}
