use std::path::Path;

use sweep_core::{ScanProgress, format_percent, format_size};

use super::bar_chart::render_bar;

const BAR_WIDTH: usize = 20;

/// One line summarising a finished directory and the session so far
pub fn render_progress_line(progress: &ScanProgress, path: &Path, bytes: u64) -> String {
    format!(
        "[{}] {:>4} {:>3}/{:<3} {:>10}  {}",
        render_bar(progress.fraction(), BAR_WIDTH),
        format_percent(progress.fraction()),
        progress.directories_completed,
        progress.directories_total,
        format_size(bytes),
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line() {
        let progress = ScanProgress {
            directories_completed: 1,
            directories_total: 2,
            ..Default::default()
        };
        let line = render_progress_line(&progress, Path::new("/tmp/cache"), 512);

        assert!(line.contains("50%"));
        assert!(line.contains("1/2"));
        assert!(line.contains("512 B"));
        assert!(line.ends_with("/tmp/cache"));
    }
}
