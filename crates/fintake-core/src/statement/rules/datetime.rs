//! Date-time parsing for statement records.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Formats attempted in order. Slash dates with 12h and 24h clocks come
/// first because that is what the tokenizer emits; ISO shapes cover records
/// arriving through the JSON import boundary.
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y, %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y, %H:%M",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only formats, resolved to midnight.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Parse a free-form date-time string. Returns `None` when nothing matches;
/// the caller decides whether that is a record-scoped rejection.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Lowercase am/pm markers fail %p on some chrono versions; retry
    // uppercased before giving up.
    for candidate in [trimmed.to_string(), trimmed.to_ascii_uppercase()] {
        for format in DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(&candidate, format) {
                return Some(parsed);
            }
        }
        for format in DATE_FORMATS {
            if let Ok(parsed) = NaiveDate::parse_from_str(&candidate, format) {
                return Some(parsed.and_time(NaiveTime::MIN));
            }
        }
    }

    None
}
