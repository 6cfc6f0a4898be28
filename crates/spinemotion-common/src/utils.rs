//! Shared formatting helpers.

/// Truncates a label to at most `max_chars` characters, ending in an ellipsis when cut.
pub fn truncate_label(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Percentage share of `part` in `total`, `0.0` for an empty total.
#[allow(clippy::cast_precision_loss)]
pub fn share_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Formats a percentage with one decimal, as the pie chart captions do.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
