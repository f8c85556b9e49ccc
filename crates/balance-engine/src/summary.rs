//! Balance lines and their idempotent merge into event notes.

use chrono::NaiveDate;

use crate::ledger::LedgerEntry;

/// Every balance line starts with this prefix; it identifies a stale line.
pub const LINE_PREFIX: &str = "vacation from ";

/// Render the one-line balance summary for a span.
pub fn render_line(
    start: NaiveDate,
    end: NaiveDate,
    days_off: f64,
    effective_days_off: f64,
    accrued: f64,
    spent: f64,
) -> String {
    format!(
        "{}{} to {}: {:.1} days (effective {:.1}), accrued {:.1}, spent {:.1} balance {:.1}",
        LINE_PREFIX,
        start,
        end,
        days_off,
        effective_days_off,
        accrued,
        spent,
        accrued - spent
    )
}

pub fn render_entry(entry: &LedgerEntry) -> String {
    render_line(
        entry.start,
        entry.end,
        entry.days_off,
        entry.effective_days_off,
        entry.accrued,
        entry.spent,
    )
}

/// Replace a trailing balance line in `existing` with `line`, or append it.
///
/// Only the last line is inspected. Empty notes split into one empty line,
/// so they become `"\n" + line`.
pub fn merge_into_notes(existing: &str, line: &str) -> String {
    let mut lines: Vec<&str> = existing.split('\n').collect();
    if lines.last().is_some_and(|l| l.starts_with(LINE_PREFIX)) {
        lines.pop();
    }
    lines.push(line);
    lines.join("\n")
}
