//! Progress bars and percentage formatting.

/// Render a fixed-width progress bar for a 0..=100 percentage.
///
/// Values above 100 are clamped.
///
/// ```
/// use degreeplan::ui::format_progress_bar;
///
/// assert_eq!(format_progress_bar(50, 8), "████░░░░");
/// ```
pub fn format_progress_bar(percentage: u32, width: usize) -> String {
    let percentage = percentage.min(100) as usize;
    let filled = (percentage * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a unit count with its percentage, e.g. `2/3 (67%)`.
pub fn format_fraction(completed: u32, total: u32, percentage: u32) -> String {
    format!("{}/{} ({}%)", completed, total, percentage)
}
