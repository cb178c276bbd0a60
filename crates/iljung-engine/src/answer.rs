//! The result boundary: fetched events plus a parsed intent in, a reply out.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::Result;
use crate::event::{
    fetch_span, filter_events, find_free_days, normalize_events, CalendarEvent, EventSource,
};
use crate::intent::{resolve, ParsedIntent};
use crate::present::{format_free_days, format_schedule};

/// Outcome of one schedule question.
///
/// Every variant is a normal result; the engine itself never fails. Only a
/// collaborator's fetch can error, and that surfaces from [`answer`], not
/// from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Matching events, formatted by week.
    Schedule { formatted: String },
    /// Requested days with nothing scheduled, formatted by week.
    FreeDays {
        days: Vec<NaiveDate>,
        formatted: String,
    },
    /// Dates resolved, but no event survived the filters.
    NoMatchingEvents,
    /// An availability question where every requested day is busy.
    NoFreeDays,
    /// No date expression was recognized in the text.
    UnrecognizedDates,
}

/// Combine fetched events with a parsed intent into a reply.
///
/// `events` should cover the span of `intent.dates` and be sorted by start.
pub fn build_result(events: &[CalendarEvent], intent: &ParsedIntent) -> Reply {
    if intent.dates.is_empty() {
        return Reply::UnrecognizedDates;
    }
    let filtered = filter_events(events, intent.time_filter, intent.keyword.as_deref());
    if intent.find_available {
        let days = find_free_days(&filtered, &intent.dates);
        if days.is_empty() {
            Reply::NoFreeDays
        } else {
            Reply::FreeDays {
                formatted: format_free_days(&days, intent.time_filter),
                days,
            }
        }
    } else if filtered.is_empty() {
        Reply::NoMatchingEvents
    } else {
        Reply::Schedule {
            formatted: format_schedule(&filtered),
        }
    }
}

/// Answer a schedule question end to end: parse the intent, fetch events
/// for the resolved span from `source`, and build the reply.
///
/// # Errors
///
/// Propagates only [`crate::EngineError`] values raised by the injected
/// `source`; every parsing outcome, including unrecognized text, is a
/// [`Reply`], not an error.
pub fn answer<S: EventSource>(text: &str, now: NaiveDateTime, source: &S) -> Result<Reply> {
    let intent = resolve(text, now);
    let Some((from, to)) = fetch_span(&intent.dates) else {
        return Ok(Reply::UnrecognizedDates);
    };
    let mut events = normalize_events(source.events_between(from, to)?);
    events.sort_by(|a, b| a.start.cmp(&b.start));
    Ok(build_result(&events, &intent))
}
