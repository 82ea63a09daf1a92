//! Date and time helpers for the guide.
//!
//! Program placement on the grid works in hours since UTC midnight, while
//! day selection works on local calendar days. All parsing is lenient:
//! a bad timestamp degrades to 0.0 / `None` with a diagnostic, never a panic.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Parse an ISO-8601 timestamp into UTC.
///
/// Accepts RFC 3339 (with offset or `Z`) and, as a fallback, a bare
/// `YYYY-MM-DDTHH:MM:SS` read as UTC.
pub fn parse_utc(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| naive.and_utc())
                .ok()
        })
}

/// Hours since UTC midnight as a fraction, always in `[0, 24)`.
///
/// Unparseable input yields 0.0 so a malformed record degrades to a
/// zero-offset block instead of breaking the whole grid.
pub fn utc_fractional_hour(ts: &str) -> f64 {
    match parse_utc(ts) {
        Some(dt) => {
            dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0
        }
        None => {
            log::warn!("Unparseable timestamp {:?}, treating as hour 0", ts);
            0.0
        }
    }
}

/// Duration between two timestamps in fractional hours.
///
/// Never negative: unparseable input or an end at/before the start yields 0.0.
pub fn duration_hours(start: &str, end: &str) -> f64 {
    let (Some(start_dt), Some(end_dt)) = (parse_utc(start), parse_utc(end)) else {
        log::warn!("Unparseable interval {:?} - {:?}, treating as zero", start, end);
        return 0.0;
    };
    let millis = (end_dt - start_dt).num_milliseconds();
    millis.max(0) as f64 / 3_600_000.0
}

/// The local calendar day a timestamp falls on, if it parses.
pub fn local_day(ts: &str) -> Option<NaiveDate> {
    parse_utc(ts).map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Whether two optional dates name the same calendar day.
///
/// False whenever either side is absent.
pub fn same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Seven consecutive local calendar dates starting today.
pub fn week_dates() -> Vec<NaiveDate> {
    week_from(Local::now().date_naive())
}

/// Seven consecutive dates starting at `start`.
pub fn week_from(start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// Format a fractional hour as a zero-padded `HH:MM` clock.
///
/// Total minutes are rounded and hours wrap modulo 24, so 24.0 reads "00:00".
pub fn format_clock(fractional_hour: f64) -> String {
    let total_minutes = (fractional_hour * 60.0).round() as i64;
    let hours = (total_minutes / 60).rem_euclid(24);
    let minutes = total_minutes.rem_euclid(60);
    format!("{:02}:{:02}", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // --- parsing ---

    #[test]
    fn test_parse_utc_rfc3339() {
        let dt = parse_utc("2024-03-10T02:30:00Z").unwrap();
        assert_eq!(dt.hour(), 2);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_utc_converts_offsets() {
        let dt = parse_utc("2024-03-10T05:45:00+03:00").unwrap();
        assert_eq!(dt.hour(), 2);
        assert_eq!(dt.minute(), 45);
    }

    #[test]
    fn test_parse_utc_naive_fallback() {
        let dt = parse_utc("2024-03-10T23:15:00").unwrap();
        assert_eq!(dt.hour(), 23);
    }

    #[test]
    fn test_parse_utc_rejects_garbage() {
        assert!(parse_utc("not-a-date").is_none());
        assert!(parse_utc("").is_none());
    }

    // --- fractional hours ---

    #[test]
    fn test_fractional_hour_basic() {
        assert_eq!(utc_fractional_hour("2024-03-10T02:30:00Z"), 2.5);
        assert_eq!(utc_fractional_hour("2024-03-10T00:00:00Z"), 0.0);
    }

    #[test]
    fn test_fractional_hour_includes_seconds() {
        let hour = utc_fractional_hour("2024-03-10T09:15:36Z");
        assert!((hour - 9.26).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_hour_invalid_is_zero() {
        assert_eq!(utc_fractional_hour("garbage"), 0.0);
    }

    #[test]
    fn test_fractional_hour_in_range() {
        for ts in [
            "2024-03-10T00:00:00Z",
            "2024-03-10T12:34:56Z",
            "2024-03-10T23:59:59Z",
        ] {
            let hour = utc_fractional_hour(ts);
            assert!((0.0..24.0).contains(&hour), "{} out of range: {}", ts, hour);
        }
    }

    // --- durations ---

    #[test]
    fn test_duration_basic() {
        let d = duration_hours("2024-03-10T02:30:00Z", "2024-03-10T04:00:00Z");
        assert_eq!(d, 1.5);
    }

    #[test]
    fn test_duration_across_midnight() {
        let d = duration_hours("2024-03-10T23:00:00Z", "2024-03-11T01:00:00Z");
        assert_eq!(d, 2.0);
    }

    #[test]
    fn test_duration_never_negative() {
        let d = duration_hours("2024-03-10T04:00:00Z", "2024-03-10T02:30:00Z");
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_duration_zero_length() {
        let d = duration_hours("2024-03-10T04:00:00Z", "2024-03-10T04:00:00Z");
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_duration_invalid_is_zero() {
        assert_eq!(duration_hours("bad", "2024-03-10T04:00:00Z"), 0.0);
        assert_eq!(duration_hours("2024-03-10T04:00:00Z", "bad"), 0.0);
    }

    // --- day comparison ---

    #[test]
    fn test_same_day_equal() {
        assert!(same_day(Some(date(2024, 3, 10)), Some(date(2024, 3, 10))));
    }

    #[test]
    fn test_same_day_different() {
        assert!(!same_day(Some(date(2024, 3, 10)), Some(date(2024, 3, 11))));
    }

    #[test]
    fn test_same_day_absent_is_false() {
        assert!(!same_day(None, Some(date(2024, 3, 10))));
        assert!(!same_day(Some(date(2024, 3, 10)), None));
        assert!(!same_day(None, None));
    }

    #[test]
    fn test_local_day_invalid_is_none() {
        assert!(local_day("nope").is_none());
        assert!(local_day("2024-06-15T12:00:00Z").is_some());
    }

    // --- week window ---

    #[test]
    fn test_week_from_is_seven_consecutive_days() {
        let days = week_from(date(2024, 3, 10));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 3, 10));
        assert_eq!(days[6], date(2024, 3, 16));
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn test_week_from_crosses_month_boundary() {
        let days = week_from(date(2024, 1, 29));
        assert_eq!(days[6], date(2024, 2, 4));
    }

    #[test]
    fn test_week_dates_starts_today() {
        let days = week_dates();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], Local::now().date_naive());
    }

    // --- clock formatting ---

    #[test]
    fn test_format_clock_pads() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(2.5), "02:30");
        assert_eq!(format_clock(9.25), "09:15");
    }

    #[test]
    fn test_format_clock_rounds_to_minutes() {
        assert_eq!(format_clock(13.999), "14:00");
        assert_eq!(format_clock(23.99), "23:59");
    }

    #[test]
    fn test_format_clock_wraps_midnight() {
        assert_eq!(format_clock(24.0), "00:00");
        assert_eq!(format_clock(23.9999), "00:00");
    }
}
