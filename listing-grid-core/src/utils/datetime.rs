//! Timestamp parsing and formatting
//!
//! Record timestamps arrive in whatever form the upstream stored them:
//! RFC3339 strings, naive date/date-time strings, or Unix timestamps in
//! seconds or milliseconds. Parsing is best-effort; the template engine
//! falls back to the raw value text when nothing here matches.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Parse a timestamp out of a JSON value, if it holds one in a known form.
#[must_use]
pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime_str(s),
        Value::Number(n) => n.as_i64().and_then(parse_unix_timestamp),
        _ => None,
    }
}

/// Parse a timestamp string: RFC3339 first, then the common naive spellings.
#[must_use]
pub fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

/// Parse a Unix timestamp, auto-detecting seconds vs milliseconds.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // Timestamps above 10^11 are taken as milliseconds.
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// Render a timestamp as a locale-independent human date-time string (UTC).
#[must_use]
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rfc3339_with_offset() {
        let dt = parse_datetime_str("2024-06-01T12:30:00+02:00");
        assert!(dt.is_some(), "expected Some(..)");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_datetime(dt), "2024-06-01 10:30");
    }

    #[test]
    fn parse_rfc3339_zulu() {
        let dt = parse_datetime_str("2024-06-01T12:30:45Z");
        assert!(dt.is_some(), "expected Some(..)");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_datetime(dt), "2024-06-01 12:30");
    }

    #[test]
    fn parse_naive_datetime() {
        let dt = parse_datetime_str("2024-06-01 08:15:00");
        assert!(dt.is_some(), "expected Some(..)");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_datetime(dt), "2024-06-01 08:15");
    }

    #[test]
    fn parse_date_only() {
        let dt = parse_datetime_str("2024-06-01");
        assert!(dt.is_some(), "expected Some(..)");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_datetime(dt), "2024-06-01 00:00");
    }

    #[test]
    fn parse_unix_seconds() {
        let dt = parse_datetime(&json!(1_717_241_400));
        assert!(dt.is_some(), "expected Some(..)");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_datetime(dt), "2024-06-01 11:30");
    }

    #[test]
    fn parse_unix_milliseconds() {
        let dt = parse_datetime(&json!(1_717_241_400_000_i64));
        assert!(dt.is_some(), "expected Some(..)");
        let Some(dt) = dt else {
            return;
        };
        assert_eq!(format_datetime(dt), "2024-06-01 11:30");
    }

    #[test]
    fn unparseable_strings_are_none() {
        assert!(parse_datetime_str("next tuesday").is_none());
        assert!(parse_datetime_str("").is_none());
        assert!(parse_datetime_str("06/01/2024").is_none());
    }

    #[test]
    fn non_timestamp_values_are_none() {
        assert!(parse_datetime(&json!(true)).is_none());
        assert!(parse_datetime(&json!({ "at": "2024-06-01" })).is_none());
        assert!(parse_datetime(&Value::Null).is_none());
    }
}
