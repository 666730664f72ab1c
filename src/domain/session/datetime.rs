//! Parsing of the client-supplied session date-time.
//!
//! Clients send several textual layouts. They are tried in a fixed order and
//! the first that parses wins. Layouts without an offset are read as UTC.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};

use crate::domain::foundation::ValidationError;

const FIELD: &str = "datetime";

/// Offset-less layouts, tried after RFC 3339.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Offset written without a colon, e.g. `+0900`.
const COMPACT_OFFSET_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// `%Y` accepts signed years of any width; only four-digit years are valid.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parses a session date-time, keeping the offset it was written in.
///
/// The offset matters: attendance is bucketed by the calendar day in the
/// session's own offset, not in UTC.
pub fn parse_session_datetime(raw: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::empty_field(FIELD));
    }

    let dt = parse_any_layout(raw).ok_or_else(|| {
        ValidationError::invalid_format(FIELD, format!("'{}' is not a recognized date-time", raw))
    })?;

    if !YEARS.contains(&dt.year()) {
        return Err(ValidationError::invalid_format(
            FIELD,
            format!("year {} is out of range", dt.year()),
        ));
    }
    Ok(dt)
}

fn parse_any_layout(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    DateTime::parse_from_str(raw, COMPACT_OFFSET_LAYOUT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339_with_offset_and_keeps_it() {
        let dt = parse_session_datetime("2024-05-01T22:00:00+09:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.hour(), 22);
    }

    #[test]
    fn parses_rfc3339_zulu_with_fraction() {
        let dt = parse_session_datetime("2024-05-01T13:00:00.250Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn offset_less_seconds_layout_is_utc() {
        let dt = parse_session_datetime("2024-05-01T22:15:30").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (22, 15, 30));
    }

    #[test]
    fn minute_precision_layout_is_accepted() {
        let dt = parse_session_datetime("2024-05-01T22:15").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (22, 15, 0));
    }

    #[test]
    fn compact_offset_is_accepted() {
        let dt = parse_session_datetime("2024-05-01T22:00:00+0900").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            parse_session_datetime(""),
            Err(ValidationError::empty_field("datetime"))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["tomorrow", "2024-13-01T00:00", "2024/05/01 22:00", "22:00"] {
            let err = parse_session_datetime(raw).unwrap_err();
            assert_eq!(err.field(), "datetime", "input {raw:?}");
        }
    }

    #[test]
    fn rejects_years_beyond_four_digits() {
        for raw in ["+262142-12-31T23:00", "-0001-01-01T00:00", "0000-01-01T00:00:00Z", "+10000-01-01T00:00"] {
            let err = parse_session_datetime(raw).unwrap_err();
            assert_eq!(err.field(), "datetime", "input {raw:?}");
        }
    }

    #[test]
    fn accepts_year_bounds() {
        assert_eq!(parse_session_datetime("0001-01-01T00:00").unwrap().year(), 1);
        assert_eq!(
            parse_session_datetime("9999-12-31T23:59:59+09:00").unwrap().year(),
            9999
        );
    }
}
