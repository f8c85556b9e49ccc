//! Year-end projection of the vacation balance.

use chrono::{Datelike, NaiveDate};

use crate::date::{days_between, year_end_exclusive};
use crate::ledger::{LedgerState, ACCRUAL_PER_CALENDAR_DAY};

/// Accrued entitlement and balance projected to the end of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearEndProjection {
    pub year: i32,
    /// January 1 of the following year.
    pub year_end: NaiveDate,
    pub accrued: f64,
    pub balance: f64,
}

/// Project `state` to the end of the year of its last vacation.
///
/// Accrual continues at the final FTE from the last vacation's end to
/// January 1 of the next year. Returns `None` when no vacation was processed.
pub fn project_year_end(state: &LedgerState) -> Option<YearEndProjection> {
    let last_vacation_end = state.last_vacation_end?;
    let year_end = year_end_exclusive(last_vacation_end);
    let accrued = state.accrued
        + state.fte * ACCRUAL_PER_CALENDAR_DAY * days_between(last_vacation_end, year_end) as f64;
    Some(YearEndProjection {
        year: last_vacation_end.year(),
        year_end,
        accrued,
        balance: accrued - state.spent,
    })
}

impl std::fmt::Display for YearEndProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "vacation at {}: accrued {:.1}, balance {:.1}",
            self.year_end, self.accrued, self.balance
        )
    }
}
