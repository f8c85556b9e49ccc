//! Tests for the working-day index.

use balance_engine::error::BalanceError;
use balance_engine::{HolidaySet, WorkdayIndex};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn new_year() -> HolidaySet {
    let mut h = HolidaySet::new();
    h.insert(d("2024-01-01"), "New Year");
    h
}

#[test]
fn index_counts_prior_working_days() {
    // 2024-01-01 is a Monday and a holiday.
    let index = WorkdayIndex::build(d("2024-01-01"), d("2024-01-15"), &new_year());

    assert_eq!(index.get(d("2024-01-01")).unwrap(), 0);
    assert_eq!(index.get(d("2024-01-02")).unwrap(), 0, "holiday not counted");
    assert_eq!(index.get(d("2024-01-03")).unwrap(), 1);
    // Tue..Fri of the first week, weekend adds nothing.
    assert_eq!(index.get(d("2024-01-06")).unwrap(), 4);
    assert_eq!(index.get(d("2024-01-08")).unwrap(), 4);
    assert_eq!(index.get(d("2024-01-15")).unwrap(), 9);
}

#[test]
fn working_days_of_half_open_spans() {
    let index = WorkdayIndex::build(d("2024-01-01"), d("2024-01-31"), &new_year());

    // Mon..Fri exclusive: Mon-Thu.
    assert_eq!(index.working_days(d("2024-01-08"), d("2024-01-12")).unwrap(), 4);
    // A full week.
    assert_eq!(index.working_days(d("2024-01-08"), d("2024-01-15")).unwrap(), 5);
    // Weekend only.
    assert_eq!(index.working_days(d("2024-01-06"), d("2024-01-08")).unwrap(), 0);
    // Span containing the holiday.
    assert_eq!(index.working_days(d("2024-01-01"), d("2024-01-03")).unwrap(), 1);
    // Empty span.
    assert_eq!(index.working_days(d("2024-01-10"), d("2024-01-10")).unwrap(), 0);
}

#[test]
fn range_end_is_queryable() {
    let index = WorkdayIndex::build(d("2024-01-08"), d("2024-01-12"), &HolidaySet::new());
    assert_eq!(index.first(), Some(d("2024-01-08")));
    assert_eq!(index.last(), Some(d("2024-01-12")));
    assert_eq!(index.working_days(d("2024-01-08"), d("2024-01-12")).unwrap(), 4);
}

#[test]
fn dates_outside_range_are_errors() {
    let index = WorkdayIndex::build(d("2024-01-08"), d("2024-01-12"), &HolidaySet::new());
    assert!(matches!(
        index.get(d("2024-01-13")),
        Err(BalanceError::OutsideWorkdayRange(date)) if date == d("2024-01-13")
    ));
    assert!(index.working_days(d("2024-01-07"), d("2024-01-10")).is_err());
}

#[test]
fn empty_range_builds_empty_index() {
    let index = WorkdayIndex::build(d("2024-01-12"), d("2024-01-08"), &HolidaySet::new());
    assert!(index.is_empty());
}
