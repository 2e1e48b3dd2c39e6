use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Result, SweepError};

/// Outcome of clearing one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub path: PathBuf,
    /// Immediate children removed
    pub removed: usize,
    /// Children that could not be removed, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// The directory did not exist and was skipped
    pub missing: bool,
}

impl ClearReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove every immediate child of `path`, leaving the directory itself.
///
/// A missing directory is skipped. Failing children are recorded and the
/// rest are still removed. Symlinks are unlinked, never followed.
pub fn clear_directory(path: &Path) -> Result<ClearReport> {
    let mut report = ClearReport {
        path: path.to_path_buf(),
        ..Default::default()
    };

    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "directory does not exist, skipping");
            report.missing = true;
            return Ok(report);
        }
        Err(e) => return Err(e.into()),
    };
    if !meta.is_dir() {
        return Err(SweepError::NotADirectory(path.to_path_buf()));
    }

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read directory entry");
                report.failed.push((path.to_path_buf(), e.to_string()));
                continue;
            }
        };

        let child = entry.path();
        let removal = match entry.file_type() {
            Ok(ft) if ft.is_dir() => fs::remove_dir_all(&child),
            Ok(_) => fs::remove_file(&child),
            Err(e) => Err(e),
        };

        match removal {
            Ok(()) => {
                debug!(path = %child.display(), "removed");
                report.removed += 1;
            }
            Err(e) => {
                warn!(path = %child.display(), error = %e, "failed to remove");
                report.failed.push((child, e.to_string()));
            }
        }
    }

    info!(
        path = %path.display(),
        removed = report.removed,
        failed = report.failed.len(),
        "cleared directory"
    );

    Ok(report)
}

/// Clear each directory independently; a failure on one never stops the rest
pub fn clear_directories<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Vec<ClearReport> {
    paths
        .into_iter()
        .map(|path| {
            clear_directory(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "could not clear directory");
                ClearReport {
                    path: path.to_path_buf(),
                    failed: vec![(path.to_path_buf(), e.to_string())],
                    ..Default::default()
                }
            })
        })
        .collect()
}
