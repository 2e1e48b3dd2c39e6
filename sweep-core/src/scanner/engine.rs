use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use super::progress::{ScanMessage, ScanProgress};
use super::record::FileRecord;
use super::walker::{CancellationToken, walk_directory};
use crate::config::ScanConfig;

/// Session state shared between the scan thread and readers
#[derive(Debug, Default)]
struct ScanState {
    session: u64,
    is_running: bool,
    cancel_requested: bool,
    directories_completed: usize,
    directories_total: usize,
    files: Vec<FileRecord>,
    bytes_found: u64,
    errors: u64,
    current_directory: Option<PathBuf>,
    /// Per-root totals; survives across sessions until overwritten
    directory_sizes: HashMap<PathBuf, u64>,
}

impl ScanState {
    fn to_progress(&self) -> ScanProgress {
        ScanProgress {
            session: self.session,
            is_running: self.is_running,
            cancel_requested: self.cancel_requested,
            directories_completed: self.directories_completed,
            directories_total: self.directories_total,
            files_found: self.files.len() as u64,
            bytes_found: self.bytes_found,
            errors: self.errors,
            current_directory: self.current_directory.clone(),
        }
    }
}

struct Shared {
    state: Mutex<ScanState>,
    listeners: Mutex<Vec<Sender<ScanMessage>>>,
    /// Token of the newest session; swapped in before the previous thread is joined
    cancel: Mutex<CancellationToken>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, ScanState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cancel(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `update` if `session` is still current. Returns false when superseded.
    fn publish(&self, session: u64, update: impl FnOnce(&mut ScanState)) -> bool {
        let mut state = self.lock_state();
        if state.session != session {
            return false;
        }
        update(&mut state);
        true
    }

    fn notify(&self, message: ScanMessage) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|tx| tx.send(message.clone()).is_ok());
    }
}

/// Scans lists of directories on a background thread, one directory at a time.
///
/// The scan thread is the only writer of session state; every query takes the
/// state lock and copies out what it needs.
pub struct ScanEngine {
    config: ScanConfig,
    shared: Arc<Shared>,
    /// Handle of the running (or last unjoined) scan thread
    active: Mutex<Option<JoinHandle<()>>>,
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                state: Mutex::new(ScanState::default()),
                listeners: Mutex::new(Vec::new()),
                cancel: Mutex::new(CancellationToken::new()),
            }),
            active: Mutex::new(None),
        }
    }

    /// Receive notifications for every session started after this call
    pub fn subscribe(&self) -> Receiver<ScanMessage> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Start scanning `roots` in order, replacing any scan in progress.
    ///
    /// A running scan is cancelled and joined first. Progress and the file
    /// list are reset before this returns; the walk itself runs in the
    /// background. Returns the new session number.
    pub fn start_scan<I, P>(&self, roots: I) -> u64
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        let cancel = CancellationToken::new();
        let previous = std::mem::replace(&mut *self.shared.lock_cancel(), cancel.clone());
        previous.cancel();

        if let Some(handle) = active.take() {
            debug!("waiting for previous scan to stop");
            let _ = handle.join();
        }

        let total = roots.len();
        let session = {
            let mut state = self.shared.lock_state();
            state.session += 1;
            state.is_running = true;
            state.cancel_requested = false;
            state.directories_completed = 0;
            state.directories_total = total;
            state.files.clear();
            state.bytes_found = 0;
            state.errors = 0;
            state.current_directory = None;
            state.session
        };

        info!(session, directories = total, "scan started");
        self.shared.notify(ScanMessage::Started { session, total });

        let shared = Arc::clone(&self.shared);
        let config = self.config.clone();

        let handle = std::thread::spawn(move || {
            run_scan(session, roots, &config, &cancel, &shared);
        });

        *active = Some(handle);

        session
    }

    /// Request that the running scan stop at its next checkpoint.
    ///
    /// Never blocks on the scan thread, including while `start_scan` is
    /// joining a superseded one.
    pub fn cancel(&self) {
        self.shared.lock_cancel().cancel();

        let mut state = self.shared.lock_state();
        if state.is_running {
            state.cancel_requested = true;
        }
    }

    /// Block until the current scan, if any, has terminated
    pub fn wait(&self) {
        let handle = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock_state().is_running
    }

    pub fn progress(&self) -> ScanProgress {
        self.shared.lock_state().to_progress()
    }

    /// Total bytes recorded under `path` by the latest scan that covered it
    pub fn directory_size(&self, path: &Path) -> Option<u64> {
        self.shared.lock_state().directory_sizes.get(path).copied()
    }

    /// Sum of the known sizes of `paths`; unknown paths count as zero
    pub fn combined_size<'a>(&self, paths: impl IntoIterator<Item = &'a Path>) -> u64 {
        let state = self.shared.lock_state();
        paths
            .into_iter()
            .filter_map(|p| state.directory_sizes.get(p))
            .sum()
    }

    /// The `n` largest files of the session, largest first.
    ///
    /// Equal sizes keep discovery order.
    pub fn top_files(&self, n: usize) -> Vec<FileRecord> {
        let state = self.shared.lock_state();
        let mut largest: Vec<&FileRecord> = state.files.iter().collect();
        largest.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        largest.into_iter().take(n).cloned().collect()
    }

    /// Every file recorded in the session, in discovery order
    pub fn files(&self) -> Vec<FileRecord> {
        self.shared.lock_state().files.clone()
    }
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl Drop for ScanEngine {
    fn drop(&mut self) {
        self.cancel();
        self.wait();
    }
}

/// Scan thread body: walk each root in order and publish after each one
fn run_scan(
    session: u64,
    roots: Vec<PathBuf>,
    config: &ScanConfig,
    cancel: &CancellationToken,
    shared: &Shared,
) {
    let total = roots.len();

    for (index, root) in roots.into_iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }

        let current = root.clone();
        if !shared.publish(session, |state| state.current_directory = Some(current)) {
            return;
        }
        shared.notify(ScanMessage::DirectoryStarted {
            index,
            path: root.clone(),
        });

        let result = walk_directory(&root, config, cancel);
        let bytes = result.total_bytes;
        let files = result.files.len();
        let cancelled = result.cancelled;

        debug!(
            path = %root.display(),
            bytes,
            files,
            errors = result.errors,
            missing = result.missing,
            cancelled,
            "directory scanned"
        );

        let published = shared.publish(session, |state| {
            state.directory_sizes.insert(root.clone(), bytes);
            state.directories_completed = index + 1;
            state.bytes_found += bytes;
            state.errors += result.errors;
            state.files.extend(result.files);
        });
        if !published {
            return;
        }

        shared.notify(ScanMessage::DirectoryFinished {
            index,
            path: root,
            bytes,
            files,
            cancelled,
        });
    }

    let cancelled = cancel.is_cancelled();
    let finished = shared.publish(session, |state| {
        state.is_running = false;
        state.cancel_requested = false;
        state.current_directory = None;
    });
    if !finished {
        return;
    }

    if cancelled {
        info!(session, total, "scan cancelled");
        shared.notify(ScanMessage::Cancelled);
    } else {
        info!(session, total, "scan completed");
        shared.notify(ScanMessage::Completed);
    }
}
