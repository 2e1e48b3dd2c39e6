use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jwalk::WalkDir;
use tracing::debug;

use super::record::FileRecord;
use crate::config::ScanConfig;

/// Cancellation token for stopping scans
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of walking one root directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryScan {
    pub root: PathBuf,
    /// Records in discovery order
    pub files: Vec<FileRecord>,
    /// Sum of `files` sizes
    pub total_bytes: u64,
    /// Entries skipped because they or their metadata could not be read
    pub errors: u64,
    /// The walk stopped early on cancellation
    pub cancelled: bool,
    /// The root did not exist or was not a directory
    pub missing: bool,
}

fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Walk `root` recursively and collect every non-empty regular file.
///
/// Hidden children are pruned before descent. Unreadable entries are counted
/// and skipped. The token is checked between entries and before each
/// directory read; once set, the walk returns what it has so far.
pub fn walk_directory(
    root: &Path,
    config: &ScanConfig,
    cancel: &CancellationToken,
) -> DirectoryScan {
    let mut scan = DirectoryScan {
        root: root.to_path_buf(),
        ..Default::default()
    };

    if !root.is_dir() {
        debug!(path = %root.display(), "directory missing, contributing empty result");
        scan.missing = true;
        return scan;
    }

    let skip_hidden = config.skip_hidden;
    let cancel_for_filter = cancel.clone();
    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(config.follow_symlinks)
        .sort(true)
        .process_read_dir(move |depth, _path, _read_dir_state, children| {
            // Stop descending once cancelled
            if cancel_for_filter.is_cancelled() {
                children.clear();
                return;
            }

            // `None` depth carries the root entry itself, which is never pruned
            if skip_hidden && depth.is_some() {
                children.retain(|entry| match entry {
                    Ok(e) => !is_hidden(&e.file_name),
                    Err(_) => true,
                });
            }
        });

    let walker = if config.num_threads > 0 {
        walker.parallelism(jwalk::Parallelism::RayonNewPool(config.num_threads))
    } else {
        walker
    };

    for entry_result in walker {
        if cancel.is_cancelled() {
            scan.cancelled = true;
            break;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                scan.errors += 1;
                continue;
            }
        };

        // Root and directories only contribute through their files
        if entry.depth == 0 || !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "skipping entry without metadata");
                scan.errors += 1;
                continue;
            }
        };

        if let Some(record) = FileRecord::from_metadata(entry.path(), &metadata) {
            scan.total_bytes += record.size_bytes;
            scan.files.push(record);
        }
    }

    // A cancel that lands after the last entry still marks the result partial
    if cancel.is_cancelled() {
        scan.cancelled = true;
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(scan: &DirectoryScan) -> Vec<String> {
        scan.files.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_walk_empty_dir() {
        let temp = TempDir::new().unwrap();
        let scan = walk_directory(temp.path(), &ScanConfig::default(), &CancellationToken::new());

        assert!(scan.files.is_empty());
        assert_eq!(scan.total_bytes, 0);
        assert!(!scan.cancelled);
        assert!(!scan.missing);
    }

    #[test]
    fn test_walk_skips_hidden_and_empty_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), vec![1u8; 100]).unwrap();
        fs::write(temp.path().join("b.txt"), b"").unwrap();
        fs::write(temp.path().join(".hidden"), vec![1u8; 50]).unwrap();

        let scan = walk_directory(temp.path(), &ScanConfig::default(), &CancellationToken::new());

        assert_eq!(scan.total_bytes, 100);
        assert_eq!(names(&scan), vec!["a.txt"]);
    }

    #[test]
    fn test_walk_prunes_hidden_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git/objects")).unwrap();
        fs::write(temp.path().join(".git/objects/pack"), vec![1u8; 500]).unwrap();
        fs::create_dir_all(temp.path().join("build/out")).unwrap();
        fs::write(temp.path().join("build/out/app.bin"), vec![1u8; 70]).unwrap();
        fs::write(temp.path().join("build/log.txt"), vec![1u8; 30]).unwrap();

        let scan = walk_directory(temp.path(), &ScanConfig::default(), &CancellationToken::new());

        assert_eq!(scan.total_bytes, 100);
        assert_eq!(scan.files.len(), 2);
        assert!(scan.files.iter().all(|f| !f.path.to_string_lossy().contains(".git")));
    }

    #[test]
    fn test_walk_hidden_root_is_scanned() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".cache");
        fs::create_dir_all(root.join("pip")).unwrap();
        fs::write(root.join("pip/wheel.whl"), vec![1u8; 100]).unwrap();
        fs::write(root.join("pip/.lock"), vec![1u8; 9]).unwrap();

        let scan = walk_directory(&root, &ScanConfig::default(), &CancellationToken::new());

        assert!(!scan.missing);
        assert_eq!(scan.total_bytes, 100);
        assert_eq!(names(&scan), vec!["wheel.whl"]);
    }

    #[test]
    fn test_walk_includes_hidden_when_configured() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".hidden"), vec![1u8; 50]).unwrap();

        let config = ScanConfig {
            skip_hidden: false,
            ..Default::default()
        };
        let scan = walk_directory(temp.path(), &config, &CancellationToken::new());

        assert_eq!(scan.total_bytes, 50);
    }

    #[test]
    fn test_walk_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");

        let scan = walk_directory(&missing, &ScanConfig::default(), &CancellationToken::new());

        assert!(scan.missing);
        assert!(scan.files.is_empty());
        assert_eq!(scan.total_bytes, 0);
        assert_eq!(scan.root, missing);
    }

    #[test]
    fn test_walk_file_root_is_missing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"data").unwrap();

        let scan = walk_directory(&file, &ScanConfig::default(), &CancellationToken::new());
        assert!(scan.missing);
        assert!(scan.files.is_empty());
    }

    #[test]
    fn test_walk_with_cancelled_token() {
        let temp = TempDir::new().unwrap();
        for i in 0..20 {
            fs::write(temp.path().join(format!("f{i}")), vec![1u8; 10]).unwrap();
        }

        let token = CancellationToken::new();
        token.cancel();
        let scan = walk_directory(temp.path(), &ScanConfig::default(), &token);

        assert!(scan.cancelled);
        assert!(scan.files.is_empty());
    }

    #[test]
    fn test_walk_with_fixed_thread_count() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/one"), vec![1u8; 7]).unwrap();
        fs::write(temp.path().join("two"), vec![1u8; 5]).unwrap();

        let config = ScanConfig {
            num_threads: 2,
            ..Default::default()
        };
        let scan = walk_directory(temp.path(), &config, &CancellationToken::new());

        assert_eq!(scan.total_bytes, 12);
        assert_eq!(scan.files.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_record_symlinks() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real"), vec![1u8; 64]).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let scan = walk_directory(temp.path(), &ScanConfig::default(), &CancellationToken::new());

        assert_eq!(names(&scan), vec!["real"]);
        assert_eq!(scan.total_bytes, 64);
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
