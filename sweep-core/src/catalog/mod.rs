mod target;

pub use target::{CatalogEntry, ScanTarget, expand_home};

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Candidate directories, their selection state and the active tag filter
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    targets: Vec<ScanTarget>,
    active_tags: BTreeSet<String>,
}

impl Catalog {
    /// Build an unselected catalog from raw entries, expanding `~` to `home`.
    ///
    /// Order follows the input. A path that resolves to one already loaded is
    /// dropped, so the path stays a unique key.
    pub fn load(entries: impl IntoIterator<Item = CatalogEntry>, home: &Path) -> Self {
        let mut seen = HashSet::new();
        let mut targets = Vec::new();

        for entry in entries {
            let target = ScanTarget::from_entry(entry, home);
            if !seen.insert(target.path.clone()) {
                warn!(path = %target.path.display(), "duplicate directory in list, ignoring");
                continue;
            }
            targets.push(target);
        }

        debug!(count = targets.len(), "catalog loaded");

        Self {
            targets,
            active_tags: BTreeSet::new(),
        }
    }

    /// All targets in catalog order
    pub fn targets(&self) -> &[ScanTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Look up a target by its resolved path
    pub fn get(&self, path: &Path) -> Option<&ScanTarget> {
        self.targets.iter().find(|t| t.path == path)
    }

    /// Flip selection for the target at `path`. Returns false if there is none.
    pub fn toggle(&mut self, path: &Path) -> bool {
        match self.targets.iter_mut().find(|t| t.path == path) {
            Some(target) => {
                target.selected = !target.selected;
                true
            }
            None => false,
        }
    }

    /// Set selection for the target at `path`. Returns false if there is none.
    pub fn set_selected(&mut self, path: &Path, selected: bool) -> bool {
        match self.targets.iter_mut().find(|t| t.path == path) {
            Some(target) => {
                target.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Select everything when nothing is selected, otherwise deselect everything.
    ///
    /// Returns the selection state that was applied.
    pub fn toggle_all(&mut self) -> bool {
        let select = self.targets.iter().all(|t| !t.selected);
        for target in &mut self.targets {
            target.selected = select;
        }
        select
    }

    /// Add `tag` to the filter, or remove it if already active
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
    }

    pub fn active_tags(&self) -> &BTreeSet<String> {
        &self.active_tags
    }

    /// Targets carrying any active tag, or every target when no filter is set
    pub fn filtered(&self) -> Vec<&ScanTarget> {
        if self.active_tags.is_empty() {
            return self.targets.iter().collect();
        }
        self.targets
            .iter()
            .filter(|t| !t.tags.is_disjoint(&self.active_tags))
            .collect()
    }

    /// Every distinct tag across the catalog, sorted
    pub fn tags(&self) -> BTreeSet<&str> {
        self.targets
            .iter()
            .flat_map(|t| t.tags.iter().map(String::as_str))
            .collect()
    }

    /// Selected targets in catalog order
    pub fn selected(&self) -> Vec<&ScanTarget> {
        self.targets.iter().filter(|t| t.selected).collect()
    }

    /// Paths of the selected targets in catalog order
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.targets
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.path.clone())
            .collect()
    }
}
