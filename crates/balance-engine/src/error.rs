//! Error types for balance-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanceError {
    /// A vacation marker was reached before any employment start marker.
    #[error(
        "no employee start date set before vacation on {date}; create a 1 day entry \
         with summary 'Employee Start Date' and re-run"
    )]
    NoEmploymentStart { date: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date {0} is outside the work-day index range")]
    OutsideWorkdayRange(NaiveDate),

    #[error("Holiday cache error: {0}")]
    HolidayCache(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Calendar error: {0}")]
    Calendar(String),
}

/// Failure to persist an updated description for one marker.
///
/// Recoverable: the driver logs it and keeps going, the ledger is unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to update event {marker_id}: {message}")]
pub struct WriteError {
    pub marker_id: String,
    pub message: String,
}

pub type Result<T> = std::result::Result<T, BalanceError>;
