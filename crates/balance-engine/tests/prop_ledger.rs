//! Property-based tests for accrual and the work-day index using proptest.

use balance_engine::ledger::ACCRUAL_PER_CALENDAR_DAY;
use balance_engine::run::build_index;
use balance_engine::{HolidaySet, Ledger, Marker, WorkdayIndex};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A start date in 2020-2027.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..8 * 365).prop_map(|offset| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset))
}

fn arb_fte_percent() -> impl Strategy<Value = u32> {
    prop_oneof![Just(100u32), 10u32..=99]
}

fn marker(summary: &str, start: NaiveDate, end: NaiveDate) -> Marker {
    Marker {
        id: String::new(),
        summary: summary.to_string(),
        description: String::new(),
        start,
        end,
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Accrued entitlement depends only on the elapsed calendar days, not on
    /// how many intervening markers subdivide them.
    #[test]
    fn accrual_is_additive(
        start in arb_date(),
        percent in arb_fte_percent(),
        gaps in prop::collection::vec(0i64..60, 0..20),
        total in 1i64..800,
    ) {
        let title = format!("Employee start date {}%", percent);
        let mut markers = vec![marker(&title, start, start + Duration::days(1))];
        let mut cursor = start;
        for gap in gaps {
            cursor += Duration::days(gap);
            markers.push(marker("Team offsite", cursor, cursor + Duration::days(1)));
        }
        let end = cursor + Duration::days(total);
        markers.push(marker("Team offsite", end - Duration::days(1), end));

        let ledger = Ledger::process(&markers, &build_index(&markers, &HolidaySet::new())).unwrap();
        let fte = f64::from(percent) / 100.0;
        let expected = fte * ACCRUAL_PER_CALENDAR_DAY * (end - start).num_days() as f64;
        prop_assert!((ledger.state().accrued - expected).abs() < 1e-9);
    }

    /// The index never decreases and grows by one exactly on working days.
    #[test]
    fn index_is_monotonic_and_skips_weekends(
        start in arb_date(),
        len in 0i64..120,
        holiday_offsets in prop::collection::vec(0i64..120, 0..10),
    ) {
        let end = start + Duration::days(len);
        let mut holidays = HolidaySet::new();
        for off in holiday_offsets {
            holidays.insert(start + Duration::days(off), "holiday");
        }
        let index = WorkdayIndex::build(start, end, &holidays);

        let mut prev = index.get(start).unwrap();
        prop_assert_eq!(prev, 0);
        let mut day = start;
        while day < end {
            let next_day = day + Duration::days(1);
            let next = index.get(next_day).unwrap();
            let working = !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(day);
            prop_assert_eq!(next - prev, u32::from(working));
            prev = next;
            day = next_day;
        }
    }

    /// Overlapping bookings never deduct the shared days twice.
    #[test]
    fn overlap_counts_union_once(
        start in arb_date(),
        a_len in 1i64..30,
        c_off in 0i64..30,
        d_extra in 0i64..30,
    ) {
        let a = start + Duration::days(7);
        let b = a + Duration::days(a_len);
        let c = a + Duration::days(c_off.min(a_len - 1));
        let d = b + Duration::days(d_extra);
        let markers = vec![
            marker("Employee start date", start, start + Duration::days(1)),
            marker("Vacation", a, b),
            marker("Vacation", c, d),
        ];
        let index = build_index(&markers, &HolidaySet::new());
        let ledger = Ledger::process(&markers, &index).unwrap();

        let days_off: f64 = ledger.entries().iter().map(|e| e.days_off).sum();
        prop_assert_eq!(days_off, f64::from(index.working_days(a, d).unwrap()));
    }
}
