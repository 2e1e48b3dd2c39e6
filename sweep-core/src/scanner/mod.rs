mod engine;
mod progress;
mod record;
mod walker;

pub use engine::ScanEngine;
pub use progress::{ScanMessage, ScanProgress};
pub use record::FileRecord;
pub use walker::{CancellationToken, DirectoryScan, walk_directory};
