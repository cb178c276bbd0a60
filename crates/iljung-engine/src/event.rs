//! Calendar events: wire shape, validation, filtering, and free-day
//! computation.
//!
//! The engine never talks to a calendar backend itself. A collaborator
//! implements [`EventSource`] and hands over [`RawEvent`] records for the
//! span reported by [`fetch_span`]; everything after that point is a pure
//! transformation.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::classify::TimeFilter;
use crate::error::{EngineError, Result};

/// Title substituted for events that arrive without one.
pub const UNTITLED: &str = "(제목 없음)";

// ── Event model ─────────────────────────────────────────────────────────────

/// An event record as fetched from a calendar backend, before validation.
/// Any field may be missing in practice.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub all_day: bool,
}

/// A validated calendar event. `end` is never before `start`; all-day
/// events carry no meaningful time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    pub all_day: bool,
}

impl CalendarEvent {
    /// Validate a raw record. Records with a missing start or end, or with
    /// end before start, are disqualified rather than failing the batch.
    pub fn from_raw(raw: RawEvent) -> Option<Self> {
        let start = raw.start?;
        let end = raw.end?;
        if end < start {
            return None;
        }
        Some(Self {
            start,
            end,
            title: raw.title.unwrap_or_else(|| UNTITLED.to_string()),
            all_day: raw.all_day,
        })
    }
}

/// Validate a fetched batch, silently dropping malformed records.
pub fn normalize_events(raw: Vec<RawEvent>) -> Vec<CalendarEvent> {
    raw.into_iter().filter_map(CalendarEvent::from_raw).collect()
}

/// Parse a collaborator's JSON payload (an array of raw events).
///
/// # Errors
///
/// Returns [`EngineError::InvalidEvents`] when the payload is not a JSON
/// array of event objects. Individual malformed records do not error; they
/// are dropped later by [`normalize_events`].
pub fn events_from_json(payload: &str) -> Result<Vec<RawEvent>> {
    serde_json::from_str(payload).map_err(|e| EngineError::InvalidEvents(e.to_string()))
}

// ── Event source capability ─────────────────────────────────────────────────

/// Narrow read-only capability over a calendar backend.
///
/// Injected into [`crate::answer`] so the engine can be exercised without
/// any network dependency; production implementations wrap the real
/// calendar API client.
pub trait EventSource {
    /// Events whose start falls within `[from, to)`.
    fn events_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<RawEvent>>;
}

/// The fetch window covering a resolved date set: day-start of the earliest
/// date through day-start of the day after the latest. `None` when the set
/// is empty.
pub fn fetch_span(dates: &[NaiveDate]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = dates.iter().min()?;
    let last = dates.iter().max()?;
    let from = first.and_hms_opt(0, 0, 0)?;
    let to = last.succ_opt()?.and_hms_opt(0, 0, 0)?;
    Some((from, to))
}

// ── Filtering ───────────────────────────────────────────────────────────────

/// Keep events matching the active time window and title keyword.
///
/// All-day events cannot be tested against a time window and are excluded
/// whenever one is active; with no time filter they pass through. The
/// keyword matches case-insensitively as a substring of the title. Input
/// order is preserved; callers sort by start beforehand.
pub fn filter_events(
    events: &[CalendarEvent],
    time: Option<TimeFilter>,
    keyword: Option<&str>,
) -> Vec<CalendarEvent> {
    let needle = keyword.map(str::to_lowercase);
    events
        .iter()
        .filter(|event| {
            if let Some(window) = time {
                if event.all_day || !window.admits(event.start.time()) {
                    return false;
                }
            }
            if let Some(needle) = &needle {
                if !event.title.to_lowercase().contains(needle) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Requested dates with no matching busy event.
///
/// The busy-day set is the distinct calendar dates of the filtered events'
/// starts. A requested date with zero fetched events is vacuously free; the
/// output is always a subset of `requested`, in the same order.
pub fn find_free_days(filtered: &[CalendarEvent], requested: &[NaiveDate]) -> Vec<NaiveDate> {
    let busy: BTreeSet<NaiveDate> = filtered.iter().map(|event| event.start.date()).collect();
    requested
        .iter()
        .copied()
        .filter(|date| !busy.contains(date))
        .collect()
}
