use chrono::{Local, TimeZone};

use crate::TIMESTAMP_FORMAT;

/// Parse a Unix timestamp written as (possibly fractional) seconds.
///
/// Returns `None` for empty, non-numeric or non-finite input.
pub fn parse_unix_seconds(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite())
}

/// Format Unix seconds as a local `YYYY-MM-DD HH:MM:SS` string.
///
/// Both replay keys and log tags go through this function, so the two sides
/// always agree on the representation. Fractional seconds are floored.
pub fn format_local_timestamp(seconds: f64) -> Option<String> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    Local
        .timestamp_opt(whole as i64, 0)
        .earliest()
        .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_seconds() {
        assert_eq!(parse_unix_seconds("1609459200.5"), Some(1609459200.5));
        assert_eq!(parse_unix_seconds(" 42 "), Some(42.0));
    }

    #[test]
    fn rejects_garbage_seconds() {
        assert_eq!(parse_unix_seconds(""), None);
        assert_eq!(parse_unix_seconds("soon"), None);
        assert_eq!(parse_unix_seconds("NaN"), None);
        assert_eq!(parse_unix_seconds("inf"), None);
    }

    #[test]
    fn fraction_is_floored() {
        assert_eq!(
            format_local_timestamp(1609459200.5),
            format_local_timestamp(1609459200.0)
        );
        assert_ne!(
            format_local_timestamp(1609459200.0),
            format_local_timestamp(1609459201.0)
        );
    }

    #[test]
    fn formatted_shape() {
        let formatted = format_local_timestamp(1609459200.0).unwrap();
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
        assert_eq!(&formatted[13..14], ":");
    }

    #[test]
    fn non_finite_is_rejected() {
        assert_eq!(format_local_timestamp(f64::NAN), None);
        assert_eq!(format_local_timestamp(f64::INFINITY), None);
    }
}
