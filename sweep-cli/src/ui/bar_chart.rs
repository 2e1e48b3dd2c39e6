/// Unicode partial block characters for smooth progress bars
const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a `width`-column bar filled to `fraction` (0.0..=1.0)
pub fn render_bar(fraction: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let filled_width = fraction.clamp(0.0, 1.0) * width as f64;
    let full_blocks = filled_width.floor() as usize;
    let partial = ((filled_width - full_blocks as f64) * 8.0).round() as usize;

    let mut bar = String::with_capacity(width * 3); // Unicode chars can be multi-byte

    for _ in 0..full_blocks.min(width) {
        bar.push(BLOCKS[8]);
    }

    if full_blocks < width && partial > 0 {
        bar.push(BLOCKS[partial.min(8)]);
    }

    let current_len = bar.chars().count();
    for _ in current_len..width {
        bar.push(' ');
    }

    bar
}
