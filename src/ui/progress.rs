// Progress bar and progress indicators module

use colored::Colorize;
use std::io::{self, Write};

const BAR_LENGTH: usize = 30;

/// Render a progress bar as text (no colors, no carriage return)
pub fn render_progress_bar(processed: usize, total: usize) -> String {
    let (percentage, filled) = if total > 0 {
        let processed = processed.min(total);
        (
            processed * 100 / total,
            processed * BAR_LENGTH / total,
        )
    } else {
        (0, 0)
    };

    format!(
        "[{}{}] {}% ({}/{})",
        "=".repeat(filled),
        " ".repeat(BAR_LENGTH - filled),
        percentage,
        processed,
        total
    )
}

/// Display a progress bar on the current line
///
/// # Arguments
/// * `processed` - Number of items processed
/// * `total` - Total number of items
/// * `prefix` - Text to display before the progress bar
pub fn show_progress_bar(processed: usize, total: usize, prefix: &str) {
    print!(
        "\r{} {} ",
        prefix.white(),
        render_progress_bar(processed, total).green()
    );
    io::stdout().flush().ok();

    if total > 0 && processed >= total {
        println!();
    }
}
