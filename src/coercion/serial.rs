//! Spreadsheet date serial numbers (1900 date system).
//!
//! Serials count days since 1899-12-30 with the time of day as the fraction, except that the
//! 1900 system pretends 1900-02-29 exists: serials below 61 are shifted by one day so that serial 1
//! is 1900-01-01.

use chrono::{Duration, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: i64 = 86_400_000;
const LEAP_BUG_SERIAL: i64 = 61;
// Bounds of the OLE automation date range.
const MIN_SERIAL: f64 = -657_435.0;
const MAX_SERIAL: f64 = 2_958_466.0;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a serial number to a date/time, rounded to the millisecond.
///
/// Returns `None` for non-finite or out-of-range serials.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= MIN_SERIAL || serial >= MAX_SERIAL {
        return None;
    }
    let adjusted = if (0.0..LEAP_BUG_SERIAL as f64).contains(&serial) {
        serial + 1.0
    } else {
        serial
    };
    let mut millis = (adjusted * MILLIS_PER_DAY as f64).round() as i64;
    // Negative serials carry a positive time-of-day fraction.
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }
    base().checked_add_signed(Duration::milliseconds(millis))
}

/// Convert a date/time to its serial number.
pub fn datetime_to_serial(value: &NaiveDateTime) -> f64 {
    let delta = value.signed_duration_since(base());
    let millis = delta.num_milliseconds();
    let mut days = millis.div_euclid(MILLIS_PER_DAY);
    let time = millis.rem_euclid(MILLIS_PER_DAY);
    if (1..LEAP_BUG_SERIAL).contains(&days) {
        days -= 1;
    }
    let fraction = time as f64 / MILLIS_PER_DAY as f64;
    if days < 0 {
        // Fraction stays positive for negative serials.
        return days as f64 - fraction;
    }
    days as f64 + fraction
}
