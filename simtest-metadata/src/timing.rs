// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp and duration formats used by the report document.

use crate::errors::DurationParseError;
use chrono::{DateTime, Local};

/// The `strftime` format for timestamps in the report document.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp the way the report document records it
/// (`YYYY-MM-DD HH:MM:SS`, local time).
pub fn format_timestamp(timestamp: DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Formats a whole-second duration as `MM:SS`, switching to `HH:MM:SS` for
/// durations of an hour or more.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Parses a recorded duration string back into whole seconds.
///
/// Accepts the two shapes [`format_duration`] produces, `MM:SS` and
/// `HH:MM:SS`. Individual components are not range-checked beyond being
/// non-negative integers, so older reports with minute counts above 59 still
/// parse.
pub fn parse_duration(input: &str) -> Result<u64, DurationParseError> {
    let parts: Vec<&str> = input.split(':').collect();
    let parsed: Option<Vec<u64>> = parts.iter().map(|part| part.parse().ok()).collect();
    match parsed.as_deref() {
        Some([minutes, seconds]) => Ok(minutes * 60 + seconds),
        Some([hours, minutes, seconds]) => Ok(hours * 3600 + minutes * 60 + seconds),
        _ => Err(DurationParseError::new(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(0, "00:00")]
    #[test_case(7, "00:07")]
    #[test_case(65, "01:05")]
    #[test_case(599, "09:59")]
    #[test_case(3599, "59:59")]
    #[test_case(3600, "01:00:00")]
    #[test_case(3723, "01:02:03")]
    #[test_case(86399, "23:59:59")]
    fn duration_formatting(seconds: u64, expected: &str) {
        assert_eq!(format_duration(seconds), expected);
    }

    #[test_case("00:42", 42)]
    #[test_case("02:05", 125)]
    #[test_case("01:00:01", 3601)]
    #[test_case("99:99", 99 * 60 + 99; "lenient about out-of-range components")]
    fn duration_parsing(input: &str, expected: u64) {
        assert_eq!(parse_duration(input), Ok(expected));
    }

    #[test_case("")]
    #[test_case("42")]
    #[test_case("1:2:3:4")]
    #[test_case("aa:bb")]
    #[test_case("-1:30")]
    #[test_case("12:")]
    fn malformed_durations_are_rejected(input: &str) {
        let err = parse_duration(input).unwrap_err();
        assert_eq!(err.input(), input);
    }

    proptest! {
        #[test]
        fn format_parse_roundtrip(seconds in 0u64..1_000_000) {
            let formatted = format_duration(seconds);
            prop_assert_eq!(parse_duration(&formatted), Ok(seconds));
        }
    }

    #[test]
    fn timestamp_format() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_timestamp(ts), "2024-03-09 14:05:07");
    }
}
