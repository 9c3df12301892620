use colored::Colorize;
use humansize::{format_size as humansize_format, DECIMAL};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::normalizer::SearchSession;

const TITLE_WIDTH: usize = 48;
const CHANNEL_WIDTH: usize = 24;

/// Format file size in human-readable format
pub fn format_size(size: u64) -> String {
    humansize_format(size, DECIMAL)
}

/// Format a duration as `M:SS` or `H:MM:SS`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Truncate to a display width, adding an ellipsis when something was cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Render a session as a plain table (no colors) with the index column first
pub fn render_results_table(session: &SearchSession) -> String {
    let headers = ["index", "title", "views", "channel", "duration", "url"];
    let rows: Vec<[String; 6]> = session
        .results()
        .iter()
        .map(|r| {
            [
                r.index.to_string(),
                truncate_to_width(&r.title, TITLE_WIDTH),
                r.popularity_display.clone(),
                truncate_to_width(&r.channel, CHANNEL_WIDTH),
                r.clip_duration.clone(),
                r.source_url.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let render_row = |cells: Vec<&str>| {
        let inner: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {} ", pad_to_width(cell, *w)))
            .collect();
        format!("|{}|", inner.join("|"))
    };

    let mut lines = vec![separator.clone(), render_row(headers.to_vec()), separator.clone()];
    for row in &rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.push(separator);

    lines.join("\n")
}

/// Print the results table with a colored heading
pub fn print_results(session: &SearchSession) {
    println!();
    println!(
        "{} {}",
        "Results for".cyan(),
        format!("\"{}\"", session.query()).yellow().bold()
    );
    println!("{}", render_results_table(session));
    println!();
}
