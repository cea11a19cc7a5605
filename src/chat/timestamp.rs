use chrono::{DateTime, Local};

use crate::common::Millis;

const MINUTE_MS: Millis = 60_000;
const HOUR_MS: Millis = 60 * MINUTE_MS;
const DAY_MS: Millis = 24 * HOUR_MS;

/// Human-relative label for `ts` as seen at `now`.
///
/// Timestamps in the future (clock skew) read as "Just now".
pub fn format_timestamp(ts: Millis, now: Millis) -> String {
    let diff = now.saturating_sub(ts);
    if diff < MINUTE_MS {
        return "Just now".to_string();
    }
    if diff < HOUR_MS {
        return format!("{}m ago", diff / MINUTE_MS);
    }
    if diff < DAY_MS {
        return format!("{}h ago", diff / HOUR_MS);
    }

    match DateTime::from_timestamp_millis(ts) {
        Some(utc) => utc.with_timezone(&Local).format("%b %-d, %I:%M %p").to_string(),
        None => "Unknown date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Millis = 1_760_000_000_000;

    #[test]
    fn recent_messages_are_just_now() {
        assert_eq!(format_timestamp(NOW - 30_000, NOW), "Just now");
        assert_eq!(format_timestamp(NOW, NOW), "Just now");
        assert_eq!(format_timestamp(NOW - 59_999, NOW), "Just now");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        assert_eq!(format_timestamp(NOW + 90_000, NOW), "Just now");
    }

    #[test]
    fn minutes_and_hours_round_down() {
        assert_eq!(format_timestamp(NOW - 65_000, NOW), "1m ago");
        assert_eq!(format_timestamp(NOW - 3_599_999, NOW), "59m ago");
        assert_eq!(format_timestamp(NOW - 3_700_000, NOW), "1h ago");
        assert_eq!(format_timestamp(NOW - (DAY_MS - 1), NOW), "23h ago");
    }

    #[test]
    fn older_than_a_day_is_absolute() {
        let label = format_timestamp(NOW - 2 * DAY_MS, NOW);
        assert!(!label.ends_with("ago"), "{label}");
        assert!(label.contains(':'), "{label}");
        assert!(label.ends_with("AM") || label.ends_with("PM"), "{label}");
    }
}
