pub mod catalog;
pub mod cleaner;
pub mod config;
pub mod display;
pub mod error;
pub mod scanner;

pub use catalog::{Catalog, CatalogEntry, ScanTarget, expand_home};
pub use cleaner::{ClearReport, clear_directories, clear_directory};
pub use config::{ScanConfig, default_entries, load_entries, parse_entries};
pub use display::{describe_file_kind, format_count, format_percent, format_size};
pub use error::{Result, SweepError};
pub use scanner::{
    CancellationToken, DirectoryScan, FileRecord, ScanEngine, ScanMessage, ScanProgress,
    walk_directory,
};
