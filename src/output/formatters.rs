//! Formatting utilities for terminal output

use std::time::Duration;

/// Format elapsed time as `M:SS`, or `H:MM:SS` from one hour up
///
/// # Examples
/// ```
/// use cascade::output::formatters::format_time;
/// use std::time::Duration;
///
/// assert_eq!(format_time(Duration::from_secs(75)), "1:15");
/// assert_eq!(format_time(Duration::from_secs(3_725)), "1:02:05");
/// ```
#[must_use]
pub fn format_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3_600, (total % 3_600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// The text a player shares after finishing
#[must_use]
pub fn share_text(completion: Option<Duration>, current_streak: u32, best_streak: u32) -> String {
    let time = completion.map_or_else(|| "Not completed".to_string(), format_time);
    format!(
        "🎯 I just solved today's Cascade puzzle in {time}!\n\n\
         🔥 Current streak: {current_streak}\n\
         🏆 Best streak: {best_streak}\n\n\
         Can you beat my time?\n\n\
         Try it yourself!"
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64).max(0.0) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
