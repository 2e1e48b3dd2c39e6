use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::Result;
use crate::catalog::CatalogEntry;

/// Candidate list compiled into the binary, used when no file is configured
const DEFAULT_DIRECTORIES: &str = include_str!("../directories.json");

/// On-disk shape of a candidate list file
#[derive(Debug, Deserialize)]
struct DirectoriesFile {
    directories: Vec<CatalogEntry>,
}

/// Walker configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
    /// Prune entries whose name starts with `.`
    pub skip_hidden: bool,
    /// Number of parallel threads per walk (0 = auto)
    pub num_threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            skip_hidden: true,
            num_threads: 0, // auto
        }
    }
}

/// Parse a candidate list, failing on malformed input
pub fn parse_entries(text: &str) -> Result<Vec<CatalogEntry>> {
    let file: DirectoriesFile = serde_json::from_str(text)?;
    Ok(file.directories)
}

/// Load a candidate list from disk.
///
/// Configuration problems never stop the program: a missing, unreadable or
/// malformed file is logged and yields an empty list.
pub fn load_entries(path: &Path) -> Vec<CatalogEntry> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read directory list");
            return Vec::new();
        }
    };

    match parse_entries(&text) {
        Ok(entries) => {
            debug!(path = %path.display(), count = entries.len(), "loaded directory list");
            entries
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not parse directory list");
            Vec::new()
        }
    }
}

/// The bundled candidate list
pub fn default_entries() -> Vec<CatalogEntry> {
    parse_entries(DEFAULT_DIRECTORIES).unwrap_or_else(|e| {
        warn!(error = %e, "bundled directory list is invalid");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_entries() {
        let text = r#"{
            "directories": [
                { "path": "~/Library/Caches", "name": "Caches", "tags": ["system"] },
                { "path": "/tmp/build", "name": "Build" }
            ]
        }"#;

        let entries = parse_entries(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "~/Library/Caches");
        assert_eq!(entries[0].tags, vec!["system".to_string()]);
        assert!(entries[1].tags.is_empty());
    }

    #[test]
    fn test_parse_entries_rejects_malformed() {
        assert!(parse_entries("{ not json").is_err());
        assert!(parse_entries(r#"{ "dirs": [] }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let entries = load_entries(&PathBuf::from("/nonexistent/sweep/directories.json"));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("directories.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(load_entries(&path).is_empty());
    }

    #[test]
    fn test_load_valid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("directories.json");
        fs::write(
            &path,
            r#"{ "directories": [ { "path": "~/.cache", "name": "Cache", "tags": ["linux"] } ] }"#,
        )
        .unwrap();

        let entries = load_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Cache");
    }

    #[test]
    fn test_default_entries_parse() {
        let entries = default_entries();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| !e.name.is_empty()));
    }
}
