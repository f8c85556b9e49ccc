//! # balance-engine
//!
//! Vacation accrual and balance ledger computed from all-day calendar markers.
//!
//! The engine walks an employee's calendar in start-date order, accrues
//! entitlement over elapsed calendar days (25 days per 365, scaled by the
//! employment fraction), deducts working days for every vacation booking and
//! renders a running balance line that is merged into each entry's notes.
//!
//! ## Modules
//!
//! - [`date`] — calendar-date parsing and day-span helpers
//! - [`workdays`] — date → working-days-elapsed index (weekends and public holidays excluded)
//! - [`classify`] — free-text classification of markers (employment start, vacation)
//! - [`ledger`] — the accrual/deduction state machine
//! - [`projection`] — project the balance to the end of the calendar year
//! - [`summary`] — render balance lines and merge them into notes
//! - [`holidays`] — public-holiday set, holiday calendar import and the local JSON cache
//! - [`calendar`] — calendar event model, paginated listing and description updates
//! - [`run`] — drive one employee's calendar through the engine and write results back
//! - [`error`] — Error types

pub mod calendar;
pub mod classify;
pub mod date;
pub mod error;
pub mod holidays;
pub mod ledger;
pub mod projection;
pub mod run;
pub mod summary;
pub mod workdays;

pub use calendar::{
    fetch_ordered_all_day_markers, CalendarEvent, CalendarSource, DescriptionSink, Marker,
    MemoryCalendar,
};
pub use classify::{classify, Classification, FtePercent};
pub use error::{BalanceError, WriteError};
pub use holidays::HolidaySet;
pub use ledger::{Ledger, LedgerEntry, LedgerState};
pub use projection::{project_year_end, YearEndProjection};
pub use run::{run, AnnotatedEntry, RunOptions, RunReport, WriteOutcome};
pub use summary::{merge_into_notes, render_line};
pub use workdays::WorkdayIndex;
