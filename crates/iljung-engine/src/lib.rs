//! # iljung-engine
//!
//! Deterministic core for answering "what is on my calendar" questions
//! asked in free-form Korean text.
//!
//! The engine converts a raw sentence into a concrete, deduplicated set of
//! calendar dates plus auxiliary filters (time-of-day window, topic
//! keyword, availability-seeking intent, weekday restriction), applies
//! those filters to externally fetched events, and formats the result by
//! calendar week. Every function is a pure transformation of its explicit
//! inputs: the "now" reference is always a parameter, no state survives a
//! call chain, and no I/O happens here — event fetching hides behind the
//! injected [`EventSource`] capability.
//!
//! ## Modules
//!
//! - [`normalize`] — raw text canonicalization
//! - [`classify`] — time-of-day / keyword / availability / weekday signals
//! - [`resolver`] — the ordered rule cascade turning text into dates
//! - [`restrict`] — weekday restriction composition over resolved dates
//! - [`intent`] — the `resolve` boundary producing a [`ParsedIntent`]
//! - [`event`] — event model, filtering, and free-day computation
//! - [`present`] — week-grouped output formatting
//! - [`answer`] — the `build_result`/`answer` boundary producing a [`Reply`]
//! - [`error`] — error types
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//!
//! // Tuesday, May 20 2025 — the injected "now".
//! let now = NaiveDate::from_ymd_opt(2025, 5, 20)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//!
//! let intent = iljung_engine::resolve("다음주 월 화 수 저녁 회식", now);
//! assert_eq!(intent.dates.len(), 3);
//! assert_eq!(intent.keyword.as_deref(), Some("회식"));
//! ```

pub mod answer;
pub mod classify;
pub mod error;
pub mod event;
pub mod intent;
pub mod normalize;
pub mod present;
pub mod resolver;
pub mod restrict;

pub use answer::{answer, build_result, Reply};
pub use classify::{classify, Classification, TimeFilter, WeekdayRestriction};
pub use error::EngineError;
pub use event::{
    events_from_json, fetch_span, filter_events, find_free_days, normalize_events, CalendarEvent,
    EventSource, RawEvent,
};
pub use intent::{resolve, ParsedIntent};
pub use normalize::normalize;
pub use present::{format_free_days, format_schedule};
pub use resolver::resolve_dates;
