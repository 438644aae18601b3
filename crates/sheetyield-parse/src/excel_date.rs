//! Excel 1900 date-serial <-> `NaiveDateTime` conversion.
//!
//! Serial 1 = 1900-01-01. Serial 60 is the phantom 1900-02-29 that Excel
//! thinks exists; dates on or after 1900-03-01 get +1 to compensate.

use chrono::{Duration as ChronoDur, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const EXCEL_EPOCH: NaiveDate = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();

pub fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    let days = (dt.date() - EXCEL_EPOCH).num_days();
    let serial_days = if dt.date() >= NaiveDate::from_ymd_opt(1900, 3, 1).unwrap() {
        days + 1
    } else {
        days
    };
    let secs_in_day = dt.time().num_seconds_from_midnight() as f64;
    serial_days as f64 + secs_in_day / 86_400.0
}

/// `None` when `serial` is non-finite or falls outside the range a
/// `NaiveDate` can represent (roughly ±262,000 years) — the caller turns
/// this into a `CellError::DateUnpack`.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.trunc() as i64;
    let frac_secs = (serial.fract() * 86_400.0).round() as i64;

    let date = if days == 60 {
        NaiveDate::from_ymd_opt(1900, 2, 28).unwrap()
    } else {
        let offset = if days < 60 { days } else { days - 1 };
        EXCEL_EPOCH.checked_add_signed(ChronoDur::try_days(offset)?)?
    };

    let time = NaiveTime::from_num_seconds_from_midnight_opt(frac_secs.rem_euclid(86_400) as u32, 0)?;
    Some(date.and_time(time))
}

/// Convert an Excel serial date directly to Unix epoch seconds, the shape
/// the row parser writes into numeric fields.
pub fn serial_to_unix_seconds(serial: f64) -> Option<i64> {
    Some(serial_to_datetime(serial)?.and_utc().timestamp())
}
