//! Common display utilities and helpers

use colored::{ColoredString, Colorize};

use crate::client::ScanStatus;

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Status label colored the way the dashboard badges are
pub fn colored_status(status: ScanStatus) -> ColoredString {
    match status {
        ScanStatus::Completed => status.as_str().green(),
        ScanStatus::Failed => status.as_str().red(),
        ScanStatus::Running => status.as_str().blue(),
        ScanStatus::Pending => status.as_str().yellow(),
    }
}
