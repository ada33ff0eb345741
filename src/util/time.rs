//! Formatting helpers for timestamps and play durations.
//!
//! Pure functions: callers supply "now" so display layers stay testable.

use std::time::Duration;

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const CLOCK: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute][period case:lower]");
const DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day], [year]");

/// Format a play duration the way score lists show it: seconds with
/// centisecond precision, switching to `m:ss.ss` from one minute up.
pub fn format_play_time(elapsed: Duration) -> String {
    let seconds = elapsed.as_millis() as f64 / 1000.0;
    if seconds < 60.0 {
        format!("{seconds:.2}s")
    } else {
        let minutes = (seconds / 60.0) as u64;
        let rest = seconds - (minutes as f64) * 60.0;
        format!("{minutes}:{rest:05.2}")
    }
}

/// Coarse "how long ago" label for recent-activity rows.
///
/// Returns `None` for instants in the future.
pub fn time_since(past: OffsetDateTime, now: OffsetDateTime) -> Option<String> {
    let elapsed = now - past;
    if elapsed.is_negative() {
        return None;
    }

    let label = if elapsed.whole_days() > 0 {
        format!("{}d ago", elapsed.whole_days())
    } else if elapsed.whole_hours() > 0 {
        format!("{}h ago", elapsed.whole_hours())
    } else if elapsed.whole_minutes() > 0 {
        format!("{}m ago", elapsed.whole_minutes())
    } else if elapsed.whole_seconds() == 0 {
        "just now".to_string()
    } else {
        format!("{}s ago", elapsed.whole_seconds())
    };

    Some(label)
}

/// Short timestamp: time of day for same-day instants, a short date
/// otherwise.
pub fn format_created_at(moment: OffsetDateTime, now: OffsetDateTime) -> String {
    let formatted = if moment.date() == now.date() {
        moment.format(CLOCK)
    } else {
        moment.format(DATE)
    };

    formatted.unwrap_or_else(|_| moment.to_string())
}
