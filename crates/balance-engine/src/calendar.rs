//! Calendar event model and the collaborator seams around the engine.
//!
//! Events follow the shape of a remote calendar's events-list response:
//! all-day entries carry `start.date`/`end.date`, timed entries carry
//! `start.dateTime`. Only all-day entries become [`Marker`]s.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::date::parse_date;
use crate::error::{BalanceError, Result, WriteError};

/// Start or end of a calendar event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One calendar event as listed by the calendar service.
///
/// Fields the engine does not use are kept in `extra` so that an event can be
/// written back unchanged apart from its description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of an events listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An all-day calendar entry spanning `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Opaque handle used only to write the description back.
    pub id: String,
    pub summary: String,
    pub description: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Marker {
    /// Convert an event into a marker.
    ///
    /// Returns `Ok(None)` for timed events and events without a start or end,
    /// and an error when an all-day date does not parse.
    pub fn from_event(event: &CalendarEvent) -> Result<Option<Marker>> {
        let (Some(start), Some(end)) = (&event.start, &event.end) else {
            return Ok(None);
        };
        if start.date_time.as_deref().is_some_and(|s| !s.is_empty()) {
            return Ok(None);
        }
        let start = parse_date(start.date.as_deref().unwrap_or_default())?;
        let end = parse_date(end.date.as_deref().unwrap_or_default())?;
        Ok(Some(Marker {
            id: event.id.clone(),
            summary: event.summary.clone(),
            description: event.description.clone(),
            start,
            end,
        }))
    }
}

/// Paginated read access to a calendar.
pub trait CalendarSource {
    /// List one page of events. `page_token` is `None` for the first page.
    fn list_page(&self, calendar_id: &str, page_token: Option<&str>) -> Result<EventPage>;
}

/// Write access to event descriptions.
pub trait DescriptionSink {
    fn update_description(
        &mut self,
        marker_id: &str,
        description: &str,
    ) -> std::result::Result<(), WriteError>;
}

/// List every page of `calendar_id` and return its all-day markers sorted by
/// start date. The sort is stable, so equal starts keep listing order.
///
/// Events whose dates do not parse are logged and skipped.
pub fn fetch_ordered_all_day_markers(
    source: &dyn CalendarSource,
    calendar_id: &str,
) -> Result<Vec<Marker>> {
    let mut markers = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = source.list_page(calendar_id, token.as_deref())?;
        for event in &page.items {
            match Marker::from_event(event) {
                Ok(Some(m)) if m.start > m.end => {
                    warn!(summary = %event.summary, "end {} before start {}, skipping", m.end, m.start);
                }
                Ok(Some(m)) => markers.push(m),
                Ok(None) => {}
                Err(e) => warn!(summary = %event.summary, "invalid start/end date: {}", e),
            }
        }
        token = page.next_page_token.filter(|t| !t.is_empty());
        if token.is_none() {
            break;
        }
    }
    markers.sort_by_key(|m| m.start);
    Ok(markers)
}

/// A calendar held in memory as a list of pages.
///
/// Page tokens are the page indices. Used for exported calendar files and
/// in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCalendar {
    pages: Vec<EventPage>,
}

impl MemoryCalendar {
    /// Split `events` into pages of at most `page_size` items.
    pub fn from_events(events: Vec<CalendarEvent>, page_size: usize) -> Self {
        let size = page_size.max(1);
        let chunks: Vec<Vec<CalendarEvent>> =
            events.chunks(size).map(<[CalendarEvent]>::to_vec).collect();
        let count = chunks.len();
        let pages = chunks
            .into_iter()
            .enumerate()
            .map(|(i, items)| EventPage {
                items,
                next_page_token: (i + 1 < count).then(|| (i + 1).to_string()),
                extra: Map::new(),
            })
            .collect();
        Self { pages }
    }

    /// Parse an events-list export (a single page document).
    pub fn from_json(json: &str) -> Result<Self> {
        let mut page: EventPage = serde_json::from_str(json)?;
        page.next_page_token = None;
        Ok(Self { pages: vec![page] })
    }

    /// Serialize all events back into a single events-list document.
    pub fn to_json(&self) -> Result<String> {
        let mut merged = self.pages.first().cloned().unwrap_or_default();
        merged.items = self.events().cloned().collect();
        merged.next_page_token = None;
        Ok(serde_json::to_string_pretty(&merged)?)
    }

    pub fn events(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }
}

impl CalendarSource for MemoryCalendar {
    fn list_page(&self, _calendar_id: &str, page_token: Option<&str>) -> Result<EventPage> {
        let index = match page_token {
            None => 0,
            Some(t) => t
                .parse::<usize>()
                .map_err(|_| BalanceError::Calendar(format!("invalid page token {:?}", t)))?,
        };
        match self.pages.get(index) {
            Some(page) => Ok(page.clone()),
            None if index == 0 => Ok(EventPage::default()),
            None => Err(BalanceError::Calendar(format!("no page {}", index))),
        }
    }
}

impl DescriptionSink for MemoryCalendar {
    fn update_description(
        &mut self,
        marker_id: &str,
        description: &str,
    ) -> std::result::Result<(), WriteError> {
        let event = self
            .pages
            .iter_mut()
            .flat_map(|p| p.items.iter_mut())
            .find(|e| e.id == marker_id)
            .ok_or_else(|| WriteError {
                marker_id: marker_id.to_string(),
                message: "no such event".to_string(),
            })?;
        event.description = description.to_string();
        Ok(())
    }
}
