pub mod bar_chart;
mod confirm;
mod progress;
mod report;

pub use confirm::confirm;
pub use progress::render_progress_line;
pub use report::{render_clear_reports, render_sizes, render_tags, render_targets, render_top_files};
