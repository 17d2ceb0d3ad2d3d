//! Clock display helpers.

/// Format a millisecond budget as `mm:ss.d`, truncating to tenths.
pub fn format_time(ms: u64) -> String {
    let tenths = ms / 100;
    let minutes = tenths / 600;
    let seconds = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", minutes, seconds, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_seconds_tenths() {
        assert_eq!(format_time(90_000), "01:30.0");
        assert_eq!(format_time(59_999), "00:59.9");
        assert_eq!(format_time(1_250), "00:01.2");
        assert_eq!(format_time(0), "00:00.0");
    }
}
