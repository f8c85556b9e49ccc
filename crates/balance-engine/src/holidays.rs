//! Public-holiday set and its local JSON cache.
//!
//! A holiday on any part of a day removes the whole day from the working-day
//! count. The cache is a flat `{"YYYY-MM-DD": "label"}` document.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar::Marker;
use crate::date::{self, days_in_span, DATE_FORMAT};
use crate::error::Result;

/// Public holidays keyed by date, with a display label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidaySet {
    days: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, label: impl Into<String>) {
        self.days.insert(date, label.into());
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn label(&self, date: NaiveDate) -> Option<&str> {
        self.days.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Build the set from the entries of a public-holiday calendar.
    ///
    /// Every date of each entry's `[start, end)` span is a holiday labelled with
    /// the entry summary. Entries whose description says "holiday in" are
    /// regional and are kept only when the description also names `region`.
    pub fn from_calendar(markers: &[Marker], region: &str) -> Self {
        let mut set = Self::new();
        for m in markers {
            if m.description.contains("holiday in") && !m.description.contains(region) {
                debug!(summary = %m.summary, "skipping holiday outside {}", region);
                continue;
            }
            for d in days_in_span(m.start, m.end) {
                set.insert(d, m.summary.clone());
            }
            info!(
                "Public holiday: {} {} days: {}",
                m.start,
                date::days_between(m.start, m.end),
                m.summary
            );
        }
        set
    }

    /// Load a cached holiday set. Keys that are not valid dates fail the load.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let raw: BTreeMap<String, String> = serde_json::from_reader(BufReader::new(file))?;
        let mut set = Self::new();
        for (key, label) in raw {
            set.insert(date::parse_date(&key)?, label);
        }
        Ok(set)
    }

    /// Write the set as a tab-indented JSON object keyed by `YYYY-MM-DD`.
    pub fn store(&self, path: &Path) -> Result<()> {
        info!("saving public holidays as {}", path.display());
        let raw: BTreeMap<String, &str> = self
            .days
            .iter()
            .map(|(d, l)| (d.format(DATE_FORMAT).to_string(), l.as_str()))
            .collect();

        let mut writer = BufWriter::new(File::create(path)?);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        raw.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Load the cache at `path`, or rebuild it with `fetch` and store it.
    ///
    /// A missing or unreadable cache is not an error: it is logged and replaced.
    pub fn load_or_fetch<F>(path: &Path, fetch: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Self>,
    {
        match Self::load(path) {
            Ok(set) => Ok(set),
            Err(e) => {
                warn!("Loading cached public holidays: {}", e);
                info!("Updating cached public holidays...");
                let set = fetch()?;
                set.store(path)?;
                Ok(set)
            }
        }
    }
}
