//! Playback position formatting.

/// Format whole seconds as `MM:SS` (under one hour) or `HH:MM:SS`.
pub fn format_time(seconds: u64) -> String {
    if seconds < 3600 {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    } else {
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}
