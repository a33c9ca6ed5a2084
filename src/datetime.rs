//! Date/time utilities for depot.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format used for the per-day directory segment.
pub const DATE_SEGMENT_FORMAT: &str = "%Y%m%d";

/// Format a UTC instant in the given timezone.
///
/// # Arguments
///
/// * `dt` - DateTime in UTC
/// * `tz` - Target timezone
/// * `format` - Output format string (e.g., "%Y/%m/%d %H:%M")
pub fn format_in_tz(dt: &DateTime<Utc>, tz: &Tz, format: &str) -> String {
    dt.with_timezone(tz).format(format).to_string()
}

/// The `YYYYMMDD` directory name for an instant, as seen in `tz`.
pub fn date_segment(dt: &DateTime<Utc>, tz: &Tz) -> String {
    format_in_tz(dt, tz, DATE_SEGMENT_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_segment_utc() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(date_segment(&dt, &Tz::UTC), "20240309");
    }

    #[test]
    fn test_date_segment_crosses_midnight() {
        // 20:30 UTC is already the next day in Shanghai (UTC+8)
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 20, 30, 0).unwrap();
        assert_eq!(date_segment(&dt, &Tz::UTC), "20241231");
        assert_eq!(date_segment(&dt, &chrono_tz::Asia::Shanghai), "20250101");
    }

    #[test]
    fn test_format_in_tz() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            format_in_tz(&dt, &chrono_tz::Asia::Tokyo, "%Y/%m/%d %H:%M"),
            "2024/01/15 19:30"
        );
    }
}
