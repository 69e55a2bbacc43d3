//! Lenient text parsing for numeric and date/time cells.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d", "%d %B %Y", "%B %d, %Y"];

// Drops surrounding whitespace and thousands separators.
fn normalize_number(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with(',') {
        return None;
    }
    Some(trimmed.replace(',', ""))
}

/// Parse an integer, accepting surrounding whitespace, a leading sign and thousands separators.
pub fn parse_integer<T: FromStr>(text: &str) -> Option<T> {
    normalize_number(text)?.parse().ok()
}

/// Parse a floating point number, accepting thousands separators and exponents.
pub fn parse_float<T: FromStr>(text: &str) -> Option<T> {
    normalize_number(text)?.parse().ok()
}

/// Parse an exact decimal, accepting thousands separators and exponents.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let normalized = normalize_number(text)?;
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Parse a date/time from common textual layouts (ISO 8601 / RFC 3339, `yyyy-MM-dd`,
/// `yyyy/MM/dd`, `MM/dd/yyyy`, with or without a time of day).
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.naive_local());
    }
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
