use std::fmt::Write;

use chrono::{DateTime, Utc};

/// Format a count with thousands separators (e.g. 1234567 -> "1,234,567").
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-readable age of `then` relative to `now`: "just now", "5m ago", "3h ago", "2d ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mut out = String::with_capacity(8);
    write_time_ago(&mut out, (now - then).num_seconds());
    out
}

/// Like [`time_ago`] but takes the raw RFC 3339 string from a snapshot file.
pub fn time_ago_str(raw: Option<&str>, now: DateTime<Utc>) -> String {
    match raw.and_then(parse_timestamp) {
        Some(then) => time_ago(then, now),
        None => "unknown".to_string(),
    }
}

pub fn write_time_ago(buf: &mut String, elapsed_secs: i64) {
    buf.clear();
    let _ = match elapsed_secs {
        s if s < 60 => write!(buf, "just now"),
        s if s < 3600 => write!(buf, "{}m ago", s / 60),
        s if s < 86_400 => write!(buf, "{}h ago", s / 3600),
        s => write!(buf, "{}d ago", s / 86_400),
    };
}

/// Parse an RFC 3339 timestamp, tolerating the naive `YYYY-MM-DDTHH:MM:SS[.f]` form
/// some generators emit without an offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn counts_below_a_thousand_are_plain() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn counts_above_999_get_separators() {
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn time_ago_buckets() {
        assert_eq!(time_ago(at(0), at(59)), "just now");
        assert_eq!(time_ago(at(0), at(60)), "1m ago");
        assert_eq!(time_ago(at(0), at(3599)), "59m ago");
        assert_eq!(time_ago(at(0), at(3600)), "1h ago");
        assert_eq!(time_ago(at(0), at(86_399)), "23h ago");
        assert_eq!(time_ago(at(0), at(86_400 * 3)), "3d ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        assert_eq!(time_ago(at(500), at(0)), "just now");
    }

    #[test]
    fn missing_or_garbage_timestamps_are_unknown() {
        assert_eq!(time_ago_str(None, at(0)), "unknown");
        assert_eq!(time_ago_str(Some(""), at(0)), "unknown");
        assert_eq!(time_ago_str(Some("yesterday"), at(0)), "unknown");
    }

    #[test]
    fn parses_zulu_and_naive_timestamps() {
        let zulu = parse_timestamp("2024-01-31T12:00:00.123456Z").unwrap();
        let naive = parse_timestamp("2024-01-31T12:00:00.123456").unwrap();
        assert_eq!(zulu, naive);
    }
}
