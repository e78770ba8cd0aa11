//! Report formatting utilities for terminal output

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar centred on an axis: negatives grow left, positives grow right
pub fn format_signed_bar(value: f64, max_abs: f64, half_width: usize) -> String {
    let filled = if max_abs <= 0.0 {
        0
    } else {
        (((value.abs() / max_abs) * half_width as f64).round() as usize).min(half_width)
    };

    if value < 0.0 {
        format!(
            "{}{}│{}",
            " ".repeat(half_width - filled),
            "▓".repeat(filled),
            " ".repeat(half_width)
        )
    } else {
        format!(
            "{}│{}{}",
            " ".repeat(half_width),
            "█".repeat(filled),
            " ".repeat(half_width - filled)
        )
    }
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
