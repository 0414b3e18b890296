//! Calendar arithmetic used by the payment terms rules.
//!
//! Every function here is pure. Dates are exchanged with the outside world as
//! `YYYY-MM-DD` strings and handled internally as [`NaiveDate`] values.

use chrono::{Datelike, Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` date.
///
/// chrono alone would also accept unpadded fields such as `2019-5-6`, so the
/// shape of the string is checked before handing it over.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Returns true if `s` is a `YYYY-MM-DD` string naming a real calendar day.
pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_some()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The last day of the given month, or `None` if `month` is not in 1..=12.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Moves `date` forward by `months` calendar months, keeping the day of the
/// month.
///
/// Unlike [`NaiveDate::checked_add_months`] this never clamps: if the day does
/// not exist in the target month (e.g. the 30th of February) the result is
/// `None`.
pub fn add_calendar_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let zero_based = date.month0() as i64 + months as i64;
    let year = date.year() as i64 + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, date.day())
}

/// Adds `days` days, rolling over month and year boundaries.
pub fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}
