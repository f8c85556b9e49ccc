//! One employee's run: markers in, annotated balance lines out.
//!
//! Each marker is applied to the ledger and its balance line is merged into
//! the marker's description and written through the [`DescriptionSink`]
//! before the next marker is processed. Write failures are logged and
//! recorded but never change the ledger.

use tracing::{debug, info, warn};

use crate::calendar::{DescriptionSink, Marker};
use crate::classify::classify;
use crate::error::{Result, WriteError};
use crate::holidays::HolidaySet;
use crate::ledger::{Ledger, LedgerEntry, LedgerState};
use crate::projection::{project_year_end, YearEndProjection};
use crate::summary::{merge_into_notes, render_entry};
use crate::workdays::WorkdayIndex;

/// Run-scoped settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Compute and report everything but never call the sink.
    pub dry_run: bool,
}

/// What happened to a marker's description.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Updated,
    /// The merged description equals the existing one.
    Unchanged,
    /// Suppressed by [`RunOptions::dry_run`].
    DryRun,
    Failed(WriteError),
}

/// A ledger entry with its rendered line and write result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedEntry {
    pub entry: LedgerEntry,
    pub line: String,
    pub outcome: WriteOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub entries: Vec<AnnotatedEntry>,
    pub final_state: LedgerState,
    pub projection: Option<YearEndProjection>,
}

impl RunReport {
    pub fn failed_writes(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, WriteOutcome::Failed(_)))
            .count()
    }
}

/// Process `markers` (sorted by start) against `holidays`, writing each
/// updated description to `sink` unless `options.dry_run` is set.
///
/// A vacation before any employment start aborts the run; descriptions
/// written up to that point stay written.
pub fn run(
    markers: &[Marker],
    holidays: &HolidaySet,
    sink: &mut dyn DescriptionSink,
    options: RunOptions,
) -> Result<RunReport> {
    let index = build_index(markers, holidays);

    let mut ledger = Ledger::new();
    let mut entries = Vec::new();
    for marker in markers {
        let Some(entry) = ledger.apply(marker, classify(marker), &index)? else {
            continue;
        };
        let entry = entry.clone();
        let line = render_entry(&entry);
        debug!("{}", line);

        let outcome = write_line(sink, marker, &line, options);
        entries.push(AnnotatedEntry {
            entry,
            line,
            outcome,
        });
    }

    let final_state = *ledger.state();
    Ok(RunReport {
        entries,
        final_state,
        projection: project_year_end(&final_state),
    })
}

/// Work-day index spanning the first start to the latest end of `markers`.
pub fn build_index(markers: &[Marker], holidays: &HolidaySet) -> WorkdayIndex {
    let first = markers.iter().map(|m| m.start).min();
    let last = markers.iter().map(|m| m.end).max();
    match (first, last) {
        (Some(first), Some(last)) => WorkdayIndex::build(first, last, holidays),
        _ => WorkdayIndex::default(),
    }
}

fn write_line(
    sink: &mut dyn DescriptionSink,
    marker: &Marker,
    line: &str,
    options: RunOptions,
) -> WriteOutcome {
    if options.dry_run {
        return WriteOutcome::DryRun;
    }
    let merged = merge_into_notes(&marker.description, line);
    if merged == marker.description {
        debug!("No need to modify event {:?} ({})", marker.summary, marker.start);
        return WriteOutcome::Unchanged;
    }
    match sink.update_description(&marker.id, &merged) {
        Ok(()) => {
            info!("Updated event {:?} ({})", marker.summary, marker.start);
            WriteOutcome::Updated
        }
        Err(e) => {
            warn!("Error updating event {:?} ({}): {}", marker.summary, marker.start, e);
            WriteOutcome::Failed(e)
        }
    }
}
