//! Calendar-date helpers.
//!
//! All dates are `chrono::NaiveDate`: no time of day, no timezone. Spans are
//! half-open `[start, end)` like all-day calendar entries.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{BalanceError, Result};

/// Wire format of an all-day date, e.g. `2024-01-08`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| BalanceError::InvalidDate(format!("{:?}: {}", s, e)))
}

/// Number of calendar days from `start` to `end`. Negative when `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Every date in the inclusive range `[start, end]`, ascending.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Every date in the half-open range `[start, end)`, ascending.
pub fn days_in_span(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d < end)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// January 1 of the year after `date`, the exclusive end of its calendar year.
pub fn year_end_exclusive(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap_or(NaiveDate::MAX)
}
