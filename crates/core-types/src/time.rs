use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Deserializer};

/// Floors an instant to the start of its minute (seconds and sub-seconds zeroed).
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(instant)
}

/// Naive layouts accepted after RFC 3339, tried in order. All are read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a query timestamp. RFC 3339 with an offset is preferred; naive
/// date-times (seconds optional, `T` or space separated) are read as UTC and
/// a bare `YYYY-MM-DD` means midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| CoreError::invalid("timestamp", format!("'{}' is not a date-time ({})", raw, e)))
}

/// Serde adapter for [`parse_timestamp`], for use with `#[serde(deserialize_with)]`.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// An inclusive time range `[start, end]` over report timestamps.
///
/// A negative duration produces `end < start`, which no timestamp can satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// Builds the window `[start, start + duration_minutes]`.
    pub fn new(start: DateTime<Utc>, duration_minutes: i32) -> Result<Self, CoreError> {
        let end = start
            .checked_add_signed(TimeDelta::minutes(i64::from(duration_minutes)))
            .ok_or_else(|| CoreError::invalid("duration", "window end is out of range"))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 5, 26, h, m, s).unwrap()
    }

    #[test]
    fn truncation_floors_to_the_minute() {
        let instant = at(10, 15, 47) + TimeDelta::milliseconds(500);
        assert_eq!(truncate_to_minute(instant), at(10, 15, 0));
    }

    #[test]
    fn truncation_never_rounds_up() {
        let instant = at(10, 15, 59) + TimeDelta::milliseconds(999);
        assert_eq!(truncate_to_minute(instant), at(10, 15, 0));
        assert_eq!(truncate_to_minute(at(10, 16, 0)), at(10, 16, 0));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = ReportWindow::new(at(10, 0, 0), 15).unwrap();
        assert_eq!(window.end, at(10, 15, 0));
        assert!(window.contains(at(10, 0, 0)));
        assert!(window.contains(at(10, 15, 0)));
        assert!(!window.contains(at(10, 16, 0)));
        assert!(!window.contains(at(9, 59, 0)));
    }

    #[test]
    fn zero_duration_matches_only_the_start() {
        let window = ReportWindow::new(at(10, 0, 0), 0).unwrap();
        assert!(window.contains(at(10, 0, 0)));
        assert!(!window.contains(at(10, 1, 0)));
    }

    #[test]
    fn negative_duration_matches_nothing() {
        let window = ReportWindow::new(at(10, 0, 0), -30).unwrap();
        assert!(window.is_inverted());
        assert!(!window.contains(at(10, 0, 0)));
        assert!(!window.contains(at(9, 45, 0)));
    }

    #[test]
    fn overflowing_window_is_rejected() {
        let err = ReportWindow::new(DateTime::<Utc>::MAX_UTC, 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "duration"));
    }

    #[test]
    fn parses_offset_and_naive_timestamps() {
        assert_eq!(parse_timestamp("2023-05-26T12:00:00+02:00").unwrap(), at(10, 0, 0));
        assert_eq!(parse_timestamp("2023-05-26T10:00:00Z").unwrap(), at(10, 0, 0));
        assert_eq!(parse_timestamp("2023-05-26T10:00:00").unwrap(), at(10, 0, 0));
        assert_eq!(
            parse_timestamp("2023-05-26T10:00:00.250").unwrap(),
            at(10, 0, 0) + TimeDelta::milliseconds(250)
        );
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn parses_timestamps_without_seconds() {
        assert_eq!(parse_timestamp("2023-05-26T10:15").unwrap(), at(10, 15, 0));
        assert_eq!(parse_timestamp("2023-05-26 10:15").unwrap(), at(10, 15, 0));
    }

    #[test]
    fn parses_space_separated_timestamps() {
        assert_eq!(parse_timestamp("2023-05-26 10:15:30").unwrap(), at(10, 15, 30));
        assert_eq!(
            parse_timestamp("2023-05-26 10:15:30.5").unwrap(),
            at(10, 15, 30) + TimeDelta::milliseconds(500)
        );
    }

    #[test]
    fn date_only_means_midnight_utc() {
        assert_eq!(parse_timestamp("2023-05-26").unwrap(), at(0, 0, 0));
        assert!(parse_timestamp("2023-05-26T").is_err());
        assert!(parse_timestamp("2023-13-01").is_err());
    }
}
