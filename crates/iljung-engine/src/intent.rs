//! The resolve boundary: text plus a reference instant in, a fully parsed
//! query intent out.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classify::{classify, TimeFilter, WeekdayRestriction};
use crate::normalize::normalize;
use crate::resolver::resolve_dates;
use crate::restrict;

/// Everything the event pipeline needs to know about one query.
///
/// Built fresh per query and discarded afterwards; nothing survives between
/// requests. `dates` is always present, possibly empty, sorted, and free of
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIntent {
    pub dates: Vec<NaiveDate>,
    pub time_filter: Option<TimeFilter>,
    pub keyword: Option<String>,
    pub find_available: bool,
    pub restriction: Option<WeekdayRestriction>,
}

/// Parse a schedule question against an externally supplied "now".
///
/// `now` is a parameter, never an ambient clock read, so resolution is
/// deterministic and reproducible. The raw text feeds segment splitting in
/// the resolver; the classifier and the restriction pass see the normalized
/// form.
pub fn resolve(text: &str, now: NaiveDateTime) -> ParsedIntent {
    let normalized = normalize(text);
    let classification = classify(&normalized);
    let dates = resolve_dates(text, now.date());
    let (dates, restriction) = restrict::compose(dates, &normalized, &classification);
    ParsedIntent {
        dates,
        time_filter: classification.time_filter,
        keyword: classification.keyword,
        find_available: classification.find_available,
        restriction,
    }
}
