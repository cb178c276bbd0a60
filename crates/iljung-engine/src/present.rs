//! Week-grouped output formatting.
//!
//! Renders filtered events, or available days, grouped by ISO week
//! (Monday-start). Each week is labeled with its month, a week-of-month
//! ordinal, and its date span; inside a week, results are grouped by date
//! and listed chronologically. Exact `(start, end, title)` duplicates are
//! suppressed here because overlapping per-date fetches can hand the same
//! event over twice.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::classify::TimeFilter;
use crate::event::CalendarEvent;
use crate::resolver::monday_of;

// ── Labels ──────────────────────────────────────────────────────────────────

fn weekday_letter(day: Weekday) -> char {
    match day {
        Weekday::Mon => '월',
        Weekday::Tue => '화',
        Weekday::Wed => '수',
        Weekday::Thu => '목',
        Weekday::Fri => '금',
        Weekday::Sat => '토',
        Weekday::Sun => '일',
    }
}

/// `25/05/26(월)` — the day-string format used throughout the output.
fn day_label(date: NaiveDate) -> String {
    format!("{}({})", date.format("%y/%m/%d"), weekday_letter(date.weekday()))
}

/// `📅 5월 4주차 (05/26 ~ 06/01)` — month and week-of-month of the Monday
/// that begins the week, plus the week's span.
fn week_header(monday: NaiveDate) -> String {
    let ordinal = (monday.day() - 1) / 7 + 1;
    let sunday = monday + Duration::days(6);
    format!(
        "📅 {}월 {}주차 ({} ~ {})",
        monday.month(),
        ordinal,
        monday.format("%m/%d"),
        sunday.format("%m/%d")
    )
}

/// Duration in hours with one decimal place, trailing zero trimmed:
/// 90 minutes renders as `1.5h`, 60 as `1h`, 45 as `0.8h`.
fn format_hours(minutes: i64) -> String {
    let tenths = (minutes as f64 / 6.0).round() as i64;
    if tenths % 10 == 0 {
        format!("{}h", tenths / 10)
    } else {
        format!("{}.{}h", tenths / 10, tenths % 10)
    }
}

// ── Schedule formatting ─────────────────────────────────────────────────────

/// Format events grouped by week, then by date, chronologically throughout.
pub fn format_schedule(events: &[CalendarEvent]) -> String {
    let mut ordered: Vec<&CalendarEvent> = events.iter().collect();
    ordered.sort_by(|a, b| a.start.cmp(&b.start));

    let mut seen: HashSet<(NaiveDateTime, NaiveDateTime, &str)> = HashSet::new();
    let mut weeks: BTreeMap<NaiveDate, BTreeMap<NaiveDate, Vec<&CalendarEvent>>> = BTreeMap::new();
    for event in ordered {
        if !seen.insert((event.start, event.end, event.title.as_str())) {
            continue;
        }
        let date = event.start.date();
        weeks
            .entry(monday_of(date))
            .or_default()
            .entry(date)
            .or_default()
            .push(event);
    }

    let mut blocks = Vec::new();
    for (monday, days) in &weeks {
        let mut lines = vec![week_header(*monday)];
        for (date, day_events) in days {
            lines.push(day_label(*date));
            for event in day_events {
                lines.push(event_line(event));
            }
        }
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}

fn event_line(event: &CalendarEvent) -> String {
    if event.all_day {
        return format!("- 하루 종일: {}", event.title);
    }
    let minutes = (event.end - event.start).num_minutes();
    format!(
        "- {}~{} ({}): {}",
        event.start.format("%H:%M"),
        event.end.format("%H:%M"),
        format_hours(minutes),
        event.title
    )
}

// ── Availability formatting ─────────────────────────────────────────────────

/// Format available days grouped by week. When a time window was active the
/// line says which window is empty; otherwise the day simply has no events.
pub fn format_free_days(days: &[NaiveDate], time: Option<TimeFilter>) -> String {
    let mut sorted = days.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let note = match time {
        Some(window) => format!("{} 비어 있음", window.window_label()),
        None => "일정 없음".to_string(),
    };

    let mut weeks: BTreeMap<NaiveDate, Vec<NaiveDate>> = BTreeMap::new();
    for day in sorted {
        weeks.entry(monday_of(day)).or_default().push(day);
    }

    let mut blocks = Vec::new();
    for (monday, bucket) in &weeks {
        let mut lines = vec![week_header(*monday)];
        for day in bucket {
            lines.push(format!("✅ {} {}", day_label(*day), note));
        }
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}
