use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid datetime format: expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD")]
    InvalidDateTime,
}

/// Timestamps are UTC microseconds since the Unix epoch.
pub fn now_utc() -> i64 {
    Utc::now().timestamp_micros()
}

/// Parses an ISO-8601 style timestamp into UTC microseconds. Inputs without
/// an offset are taken to be UTC; digits past the microsecond are dropped.
pub fn parse_timestamp(input: &str) -> Result<i64, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp_micros());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.and_utc().timestamp_micros());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or(TimeParseError::InvalidDate)?;
        return Ok(naive.and_utc().timestamp_micros());
    }

    Err(TimeParseError::InvalidDateTime)
}

pub fn to_datetime(micros: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, to_datetime, TimeParseError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_timestamp_accepts_rfc3339_with_offset() {
        let ts = parse_timestamp("2030-01-15T13:45:00+02:00").unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 1, 15, 11, 45, 0).unwrap();
        assert_eq!(ts, expected.timestamp_micros());
    }

    #[test]
    fn parse_timestamp_treats_naive_as_utc() {
        let ts = parse_timestamp("2030-01-15T13:45:30.123456").unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 1, 15, 13, 45, 30).unwrap();
        assert_eq!(ts, expected.timestamp_micros() + 123_456);

        let ts = parse_timestamp("2030-01-15 13:45").unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 1, 15, 13, 45, 0).unwrap();
        assert_eq!(ts, expected.timestamp_micros());
    }

    #[test]
    fn parse_timestamp_accepts_date_only() {
        let ts = parse_timestamp("2030-01-15").unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(ts, expected.timestamp_micros());
    }

    #[test]
    fn parse_timestamp_keeps_sub_second_order() {
        let early = parse_timestamp("2024-01-15T14:30:00.200Z").unwrap();
        let late = parse_timestamp("2024-01-15T14:30:00.900Z").unwrap();
        assert_eq!(late - early, 700_000);

        let nanos = parse_timestamp("2024-01-15T14:30:00.123456789Z").unwrap();
        assert_eq!(nanos % 1_000_000, 123_456);
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("  "), Err(TimeParseError::Empty));
        assert_eq!(
            parse_timestamp("next tuesday"),
            Err(TimeParseError::InvalidDateTime)
        );
    }

    #[test]
    fn to_datetime_keeps_microseconds() {
        let ts = parse_timestamp("2024-05-01T08:30:00.654321Z").unwrap();
        let dt = to_datetime(ts);
        assert_eq!(dt.timestamp_micros(), ts);
        assert_eq!(
            serde_json::to_value(dt).unwrap(),
            serde_json::json!("2024-05-01T08:30:00.654321Z")
        );
    }
}
