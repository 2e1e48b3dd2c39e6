use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::bail;
use sweep_core::{
    Catalog, CatalogEntry, ClearReport, ScanConfig, ScanEngine, ScanMessage, clear_directories,
    default_entries, expand_home, load_entries,
};
use tracing::info;

use super::Selection;
use crate::ui::render_progress_line;

/// Catalog plus the engine scanning it
pub struct AppState {
    pub catalog: Catalog,
    pub engine: ScanEngine,
}

impl AppState {
    pub fn load(config: Option<&Path>, home: &Path, scan_config: ScanConfig) -> Self {
        Self {
            catalog: Catalog::load(resolve_entries(config), home),
            engine: ScanEngine::new(scan_config),
        }
    }

    /// Mark the directories named by `selection` as selected
    pub fn apply_selection(&mut self, selection: &Selection, home: &Path) -> Result<()> {
        if selection.is_empty() {
            bail!("nothing selected; pass --tag, --path or --all");
        }

        if selection.all && self.catalog.selected().is_empty() {
            self.catalog.toggle_all();
        }

        if !selection.tags.is_empty() {
            for tag in &selection.tags {
                self.catalog.toggle_tag(tag);
            }
            let tagged: Vec<PathBuf> = self
                .catalog
                .filtered()
                .iter()
                .map(|t| t.path.clone())
                .collect();
            if tagged.is_empty() {
                bail!("no directory carries tag(s) {}", selection.tags.join(", "));
            }
            for path in tagged {
                self.catalog.set_selected(&path, true);
            }
        }

        for raw in &selection.paths {
            let path = expand_home(raw, home);
            if !self.catalog.set_selected(&path, true) {
                bail!(
                    "{} is not in the directory list (see `sweep list`)",
                    path.display()
                );
            }
        }

        Ok(())
    }

    /// Scan the selected directories, writing one progress line per directory to `out`
    pub fn scan(&self, out: &mut impl Write) -> Result<()> {
        let roots = self.catalog.selected_paths();
        let rx = self.engine.subscribe();
        self.engine.start_scan(roots);

        for message in rx.iter() {
            match message {
                ScanMessage::DirectoryFinished { path, bytes, .. } => {
                    let line = render_progress_line(&self.engine.progress(), &path, bytes);
                    writeln!(out, "{line}")?;
                }
                ScanMessage::Completed | ScanMessage::Cancelled => break,
                _ => {}
            }
        }

        self.engine.wait();
        Ok(())
    }

    /// Combined scanned size of the selected directories
    pub fn selected_size(&self) -> u64 {
        self.engine
            .combined_size(self.catalog.selected().iter().map(|t| t.path.as_path()))
    }

    /// Delete the contents of every selected directory
    pub fn clear_selected(&self) -> Result<Vec<ClearReport>> {
        if self.engine.is_running() {
            bail!("a scan is still running");
        }

        let paths = self.catalog.selected_paths();
        info!(directories = paths.len(), "clearing selected directories");
        Ok(clear_directories(paths.iter().map(PathBuf::as_path)))
    }
}

/// Explicit file, then the user config file, then the bundled list
fn resolve_entries(config: Option<&Path>) -> Vec<CatalogEntry> {
    if let Some(path) = config {
        return load_entries(path);
    }

    if let Some(path) = dirs::config_dir().map(|d| d.join("sweep").join("directories.json"))
        && path.exists()
    {
        return load_entries(&path);
    }

    default_entries()
}
