//! Date → working-days-elapsed index.
//!
//! `index[d]` is the number of working days strictly before `d` in the built
//! range, so `index[end] - index[start]` is the working-day count of the
//! half-open span `[start, end)`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::date::{days_inclusive, is_weekend};
use crate::error::{BalanceError, Result};
use crate::holidays::HolidaySet;

/// Monotonic counter of working days, built once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkdayIndex {
    elapsed: BTreeMap<NaiveDate, u32>,
}

impl WorkdayIndex {
    /// Build the index over the inclusive range `[range_start, range_end]`.
    ///
    /// The last date is included so that the exclusive end of the latest
    /// marker can be queried.
    pub fn build(range_start: NaiveDate, range_end: NaiveDate, holidays: &HolidaySet) -> Self {
        let mut elapsed = BTreeMap::new();
        let mut running = 0u32;
        for d in days_inclusive(range_start, range_end) {
            elapsed.insert(d, running);
            if !is_weekend(d) && !holidays.contains(d) {
                running += 1;
            }
        }
        Self { elapsed }
    }

    /// Working days elapsed before `date` since the start of the range.
    pub fn get(&self, date: NaiveDate) -> Result<u32> {
        self.elapsed
            .get(&date)
            .copied()
            .ok_or(BalanceError::OutsideWorkdayRange(date))
    }

    /// Working days in `[start, end)`. Both bounds must lie inside the range.
    pub fn working_days(&self, start: NaiveDate, end: NaiveDate) -> Result<u32> {
        let (a, b) = (self.get(start)?, self.get(end)?);
        Ok(b.saturating_sub(a))
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.elapsed.keys().next().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.elapsed.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.elapsed.is_empty()
    }
}
