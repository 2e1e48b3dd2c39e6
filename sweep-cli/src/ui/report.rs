use std::time::SystemTime;

use chrono::{DateTime, Local};
use sweep_core::{
    Catalog, ClearReport, FileRecord, ScanEngine, ScanTarget, describe_file_kind, format_count,
    format_size,
};

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

/// Candidate directories with their tags
pub fn render_targets(targets: &[&ScanTarget]) -> String {
    let mut out = String::new();
    if targets.is_empty() {
        out.push_str("No directories configured\n");
        return out;
    }

    for target in targets {
        let marker = if target.path.is_dir() { ' ' } else { '-' };
        let tags: Vec<&str> = target.tags.iter().map(String::as_str).collect();
        out.push_str(&format!(
            "{marker} {:<28} [{}]\n    {}\n",
            target.display_name,
            tags.join(", "),
            target.path.display()
        ));
    }
    out
}

pub fn render_tags(catalog: &Catalog) -> String {
    let mut out = String::new();
    for tag in catalog.tags() {
        out.push_str(&format!("{tag}\n"));
    }
    out
}

/// Scanned size of each target, then their combined size
pub fn render_sizes(targets: &[&ScanTarget], engine: &ScanEngine) -> String {
    let mut out = String::new();
    let mut total = 0u64;

    for target in targets {
        let size = match engine.directory_size(&target.path) {
            Some(size) => {
                total += size;
                format_size(size)
            }
            None => "-".to_string(),
        };
        out.push_str(&format!("{:>12}  {}\n", size, target.display_name));
    }

    let progress = engine.progress();
    out.push_str(&format!(
        "{:>12}  total ({} files, {} unreadable entries skipped)\n",
        format_size(total),
        format_count(progress.files_found),
        format_count(progress.errors)
    ));
    out
}

/// Largest files with kind and modification time
pub fn render_top_files(files: &[FileRecord]) -> String {
    let mut out = String::new();
    if files.is_empty() {
        out.push_str("No files found\n");
        return out;
    }

    out.push_str("Largest files:\n");
    for file in files {
        out.push_str(&format!(
            "{:>12}  {:<16} {}  {}\n",
            format_size(file.size_bytes),
            describe_file_kind(&file.path),
            format_time(file.modified_at),
            file.path.display()
        ));
    }
    out
}

pub fn render_clear_reports(reports: &[ClearReport]) -> String {
    let mut out = String::new();

    for report in reports {
        if report.missing {
            out.push_str(&format!("skipped  {} (does not exist)\n", report.path.display()));
            continue;
        }
        out.push_str(&format!(
            "cleared  {} ({} removed, {} failed)\n",
            report.path.display(),
            format_count(report.removed as u64),
            report.failed.len()
        ));
        for (path, reason) in &report.failed {
            out.push_str(&format!("    failed {}: {reason}\n", path.display()));
        }
    }
    out
}
