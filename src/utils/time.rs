//! Time and size formatting utilities

/// Format whole seconds as `M:SS`, or `H:MM:SS` once an hour is reached.
///
/// ```
/// use clipx_cli::utils::time::format_clock;
/// assert_eq!(format_clock(0), "0:00");
/// assert_eq!(format_clock(125), "2:05");
/// assert_eq!(format_clock(3725), "1:02:05");
/// ```
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a byte count in mebibytes with one decimal, e.g. `12.3 MB`
pub fn format_file_size_mb(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Format file size for display, picking the largest fitting unit
pub fn format_file_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
