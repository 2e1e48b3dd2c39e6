use std::path::PathBuf;

/// Notification emitted by the scan engine
#[derive(Debug, Clone, PartialEq)]
pub enum ScanMessage {
    /// A new session began over `total` directories
    Started { session: u64, total: usize },
    /// Started walking the directory at `index`
    DirectoryStarted { index: usize, path: PathBuf },
    /// Published the result of the directory at `index`
    DirectoryFinished {
        index: usize,
        path: PathBuf,
        bytes: u64,
        files: usize,
        /// The walk stopped early and the result is partial
        cancelled: bool,
    },
    /// Every directory was walked
    Completed,
    /// The session stopped on a cancellation request
    Cancelled,
}

/// Point-in-time view of the current (or last) scan session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanProgress {
    /// Session counter, incremented by every scan start
    pub session: u64,
    pub is_running: bool,
    pub cancel_requested: bool,
    pub directories_completed: usize,
    pub directories_total: usize,
    /// Files recorded so far in this session
    pub files_found: u64,
    /// Bytes recorded so far in this session
    pub bytes_found: u64,
    /// Entries skipped because they could not be read
    pub errors: u64,
    /// Directory currently being walked
    pub current_directory: Option<PathBuf>,
}

impl ScanProgress {
    /// Completed directories over total, in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.directories_total == 0 {
            0.0
        } else {
            self.directories_completed as f64 / self.directories_total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let mut progress = ScanProgress {
            directories_total: 4,
            ..Default::default()
        };
        assert_eq!(progress.fraction(), 0.0);

        progress.directories_completed = 1;
        assert_eq!(progress.fraction(), 0.25);

        progress.directories_completed = 4;
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_fraction_without_directories() {
        assert_eq!(ScanProgress::default().fraction(), 0.0);
    }
}
