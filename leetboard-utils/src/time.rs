use crate::formatting::format_compact_duration;

/// "5m ago" style age of `then` relative to `now`; "never" for a zero timestamp.
pub fn format_age(then: u64, now: u64) -> String {
    if then == 0 {
        return "never".to_owned();
    }

    format!("{} ago", format_compact_duration(now.saturating_sub(then)))
}
