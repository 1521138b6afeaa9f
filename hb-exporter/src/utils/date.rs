//! Timestamp display for the listing

use chrono::{NaiveDate, NaiveDateTime};

/// `YYYY-MM-DD` for the vendor's ISO-ish timestamps, raw text otherwise
pub fn display_date(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| value.to_string())
}
