use std::collections::BTreeSet;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use serde::Deserialize;

/// Raw candidate directory as written in a directory list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Path, possibly starting with `~`
    pub path: String,
    /// Human-readable name
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A candidate directory the user may scan and clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Resolved absolute path; the target's identity
    pub path: PathBuf,
    pub display_name: String,
    pub tags: BTreeSet<String>,
    pub selected: bool,
}

impl ScanTarget {
    pub fn from_entry(entry: CatalogEntry, home: &Path) -> Self {
        Self {
            path: expand_home(&entry.path, home),
            display_name: entry.name,
            tags: entry.tags.into_iter().collect(),
            selected: false,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Replace a leading `~` path component with `home`
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix('~') {
        Some(rest) if rest.starts_with('/') || rest.starts_with(MAIN_SEPARATOR) => {
            home.join(rest.trim_start_matches(['/', MAIN_SEPARATOR]))
        }
        _ => PathBuf::from(raw),
    }
}
