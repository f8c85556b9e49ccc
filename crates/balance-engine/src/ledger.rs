//! The vacation ledger state machine.
//!
//! Markers are consumed in ascending start order. Every marker first advances
//! accrual to its end date; employment-start markers then set the FTE and
//! vacation markers deduct their effective working days.
//!
//! Each step takes the previous [`LedgerState`] by value and returns the next
//! one together with an optional [`LedgerEntry`] for the marker.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calendar::Marker;
use crate::classify::{classify, Classification, FtePercent};
use crate::date::days_between;
use crate::error::{BalanceError, Result};
use crate::workdays::WorkdayIndex;

/// Vacation days earned per calendar day at full time: 25 per 365.
pub const ACCRUAL_PER_CALENDAR_DAY: f64 = 25.0 / 365.0;

/// Working days in a week, the threshold unit for pro-rating long bookings.
const WORK_WEEK_DAYS: f64 = 5.0;

/// Running totals for one employee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerState {
    /// Start of the current employment period (latest start marker).
    pub start_date: Option<NaiveDate>,
    /// Date through which accrual has been integrated.
    pub last_accrual_date: Option<NaiveDate>,
    /// Exclusive end of the latest processed vacation.
    pub last_vacation_end: Option<NaiveDate>,
    /// Employment fraction, normally in `(0, 1]`; a literal `00%` gives 0.
    pub fte: f64,
    pub accrued: f64,
    pub spent: f64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            start_date: None,
            last_accrual_date: None,
            last_vacation_end: None,
            fte: 1.0,
            accrued: 0.0,
            spent: 0.0,
        }
    }
}

impl LedgerState {
    /// `accrued - spent`. May be negative.
    pub fn balance(&self) -> f64 {
        self.accrued - self.spent
    }

    /// Integrate accrual from `last_accrual_date` up to `until`.
    /// A no-op before the first employment start.
    fn accrue_until(mut self, until: NaiveDate) -> Self {
        if let Some(last) = self.last_accrual_date {
            self.accrued += self.fte * ACCRUAL_PER_CALENDAR_DAY * days_between(last, until) as f64;
            self.last_accrual_date = Some(until);
        }
        self
    }
}

/// Which kind of marker produced a [`LedgerEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    EmploymentStart,
    Vacation,
}

/// The ledger snapshot emitted for one processed marker.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub marker_id: String,
    pub kind: EntryKind,
    /// Span as counted: for a vacation that overlapped an earlier one, the
    /// start is moved up to the earlier vacation's end.
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Working days in the span.
    pub days_off: f64,
    /// Days actually deducted after pro-rating and the half-day rule.
    pub effective_days_off: f64,
    pub accrued: f64,
    pub spent: f64,
}

impl LedgerEntry {
    pub fn balance(&self) -> f64 {
        self.accrued - self.spent
    }
}

/// Apply one marker to `state`.
///
/// Returns the next state and the emitted entry, or `None` for markers the
/// ledger ignores (unrecognized titles, vacations already fully counted).
pub fn step(
    state: LedgerState,
    marker: &Marker,
    class: Classification,
    index: &WorkdayIndex,
) -> Result<(LedgerState, Option<LedgerEntry>)> {
    if marker.start > marker.end {
        warn!(summary = %marker.summary, "end {} before start {}, skipping", marker.end, marker.start);
        return Ok((state, None));
    }

    let mut next = state.accrue_until(marker.end);

    match class {
        Classification::Ignored => Ok((next, None)),

        Classification::EmploymentStart { fte_percent } => {
            if next.start_date.is_none() {
                next.last_accrual_date = Some(marker.start);
            }
            next.start_date = Some(marker.start);
            match fte_percent {
                FtePercent::Percent(p) => next.fte = f64::from(p) / 100.0,
                FtePercent::Absent => next.fte = 1.0,
            }
            info!("Start date {} ({:.0}%)", marker.start, next.fte * 100.0);

            let entry = LedgerEntry {
                marker_id: marker.id.clone(),
                kind: EntryKind::EmploymentStart,
                start: marker.start,
                end: marker.end,
                days_off: 0.0,
                effective_days_off: 0.0,
                accrued: next.accrued,
                spent: next.spent,
            };
            Ok((next, Some(entry)))
        }

        Classification::VacationBooking { half_day_hint } => {
            if next.start_date.is_none() {
                return Err(BalanceError::NoEmploymentStart { date: marker.start });
            }

            let mut start = marker.start;
            if let Some(last_end) = next.last_vacation_end {
                if last_end > marker.end {
                    warn!(
                        "vacation from {} to {} already accounted for",
                        marker.start, marker.end
                    );
                    return Ok((next, None));
                }
                if last_end > marker.start {
                    warn!(
                        "vacation from {} to {} partially accounted for up to {}",
                        marker.start, marker.end, last_end
                    );
                    start = last_end;
                }
            }
            next.last_vacation_end = Some(marker.end);

            let days_off = f64::from(index.working_days(start, marker.end)?);
            let calendar_days = days_between(start, marker.end) as f64;
            let effective_days_off =
                effective_days(days_off, calendar_days, next.fte, half_day_hint);
            next.spent += effective_days_off;

            let entry = LedgerEntry {
                marker_id: marker.id.clone(),
                kind: EntryKind::Vacation,
                start,
                end: marker.end,
                days_off,
                effective_days_off,
                accrued: next.accrued,
                spent: next.spent,
            };
            Ok((next, Some(entry)))
        }
    }
}

/// Days deducted for a booking.
///
/// Bookings of at least `5 * fte` calendar days are pro-rated by `fte`; a
/// single calendar day marked as half day counts 0.5; anything else counts
/// its full working days.
pub fn effective_days(days_off: f64, calendar_days: f64, fte: f64, half_day_hint: bool) -> f64 {
    if calendar_days >= WORK_WEEK_DAYS * fte {
        fte * days_off
    } else if calendar_days < 1.01 && half_day_hint {
        0.5
    } else {
        days_off
    }
}

/// The ledger for one employee's run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    state: LedgerState,
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and apply every marker in order, stopping at the first fatal error.
    pub fn process(markers: &[Marker], index: &WorkdayIndex) -> Result<Self> {
        let mut ledger = Self::new();
        for m in markers {
            ledger.apply(m, classify(m), index)?;
        }
        Ok(ledger)
    }

    /// Apply one classified marker. The state only changes if the step succeeds.
    pub fn apply(
        &mut self,
        marker: &Marker,
        class: Classification,
        index: &WorkdayIndex,
    ) -> Result<Option<&LedgerEntry>> {
        let (next, entry) = step(self.state, marker, class, index)?;
        self.state = next;
        Ok(match entry {
            Some(e) => {
                self.entries.push(e);
                self.entries.last()
            }
            None => None,
        })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}
