/// Formats a millisecond position as `HH:MM:SS`.
///
/// Hours are padded to two digits but never truncated, so long recordings
/// render as e.g. `123:04:05`. Sub-second remainders are dropped.
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// The `[HH:MM:SS] ` marker inserted into notes.
pub fn note_stamp(ms: u64) -> String {
    format!("[{}] ", format_time(ms))
}

#[cfg(test)]
mod tests {
    use super::{format_time, note_stamp};

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(3_661_000), "01:01:01");
        assert_eq!(format_time(3_600_000), "01:00:00");
        assert_eq!(format_time(59_999), "00:00:59");
    }

    #[test]
    fn hours_are_unbounded() {
        assert_eq!(format_time(360_000_000), "100:00:00");
    }

    #[test]
    fn note_stamp_wraps_in_brackets() {
        assert_eq!(note_stamp(61_500), "[00:01:01] ");
    }
}
