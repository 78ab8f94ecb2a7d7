//! Reusable formatting utilities for CLI output
//!
//! The scan service sends timestamps as ISO-8601 strings, with or without an
//! offset. These helpers turn them into the dashboard's display format.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Display format for scan timestamps, e.g. `May 1, 2024 10:00:00`
const DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M:%S";

/// Parse an RFC 3339 or zone-less ISO timestamp; zone-less values are taken
/// as UTC.
fn parse_timestamp(timestamp: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Format a service timestamp for display.
///
/// Unparseable values are shown as-is; empty values as "N/A".
pub fn format_scan_time(timestamp: &str) -> String {
    if timestamp.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_timestamp(timestamp) {
        // Shown on the service's own wall clock
        Some(dt) => dt.naive_local().format(DISPLAY_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

/// Like [`format_scan_time`], with "N/A" for a missing value.
pub fn format_optional_time(timestamp: Option<&str>) -> String {
    timestamp.map_or_else(|| "N/A".to_string(), format_scan_time)
}

/// Elapsed time between start and end, e.g. `2m 30s`.
///
/// Returns "--" when the scan has not finished or either side is unparseable.
pub fn format_scan_duration(start: &str, end: Option<&str>) -> String {
    let (Some(start), Some(end)) = (parse_timestamp(start), end.and_then(parse_timestamp)) else {
        return "--".to_string();
    };

    let secs = (end - start).num_seconds();
    if secs < 0 {
        return "--".to_string();
    }

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
