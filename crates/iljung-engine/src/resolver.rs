//! Date-expression resolution.
//!
//! Turns free-form query text into a concrete, deduplicated, ascending set
//! of calendar dates relative to an externally supplied reference day. The
//! raw text is split into segments on comma/plus/slash separators; each
//! segment is normalized and run through an ordered, first-match-wins rule
//! cascade, and the per-segment results are unioned.
//!
//! The cascade, in priority order:
//!
//! 1. [`try_relative_day`] — fixed relative-day words (오늘/내일/모레/글피),
//!    longest pattern first so 내일모레 never resolves as 내일
//! 2. [`try_counting_offset`] — native counting words 하루..이레 with a
//!    뒤/후 (forward) or 전 (backward) suffix
//! 3. [`try_numeric_offset`] — `N일 후|뒤` and `N일 전`
//! 4. [`try_month_span`] — `N월`, every day of the month, forward-rollover
//!    year selection
//! 5. [`try_week_span`] — 이번주/다음주/다다음주/다다다음주 and `N주 후|뒤`,
//!    the full Monday-Sunday week
//! 6. [`try_explicit_dates`] — `M/D` or `M.D` tokens, one or more per
//!    segment, invalid dates silently dropped
//!
//! Unmatched text resolves to an empty set. That is a normal outcome, not an
//! error; callers decide how to phrase "I could not find a date in that".

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::normalize::normalize;

// ── Vocabularies and patterns ───────────────────────────────────────────────

/// Fixed relative-day words, longest first. 내일모레 contains 내일 and must
/// be tested before it.
const RELATIVE_DAYS: [(&str, i64); 5] = [
    ("내일모레", 2),
    ("글피", 3),
    ("모레", 2),
    ("내일", 1),
    ("오늘", 0),
];

/// Native counting words for one through seven days.
const COUNTING_WORDS: [(&str, i64); 7] = [
    ("하루", 1),
    ("이틀", 2),
    ("사흘", 3),
    ("나흘", 4),
    ("닷새", 5),
    ("엿새", 6),
    ("이레", 7),
];

/// Week-offset words, longest first. 다다다음주 contains 다다음주 contains
/// 다음주, so order matters.
const WEEK_WORDS: [(&str, i64); 8] = [
    ("다다다음주", 3),
    ("다다담주", 3),
    ("다다음주", 2),
    ("다담주", 2),
    ("다음주", 1),
    ("담주", 1),
    ("이번주", 0),
    ("금주", 0),
];

static DAY_OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*일\s*(뒤|후|전)").unwrap());

static WEEK_OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*주\s*(뒤|후)").unwrap());

static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{1,2})월").unwrap());

static MONTH_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[./](\d{1,2})").unwrap());

// ── Entry point ─────────────────────────────────────────────────────────────

/// Resolve all date expressions in `text` against the reference day `today`.
///
/// Returns an ascending, duplicate-free list of dates. An empty list means
/// no segment matched any rule.
pub fn resolve_dates(text: &str, today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = BTreeSet::new();
    for segment in split_segments(text) {
        let segment = normalize(&segment);
        if segment.is_empty() {
            continue;
        }
        let resolved = try_relative_day(&segment, today)
            .or_else(|| try_counting_offset(&segment, today))
            .or_else(|| try_numeric_offset(&segment, today))
            .or_else(|| try_month_span(&segment, today))
            .or_else(|| try_week_span(&segment, today))
            .or_else(|| try_explicit_dates(&segment, today));
        if let Some(batch) = resolved {
            dates.extend(batch);
        }
    }
    dates.into_iter().collect()
}

/// Whether the text contains a bare month-number pattern (`N월`).
///
/// The filter composer suppresses explicit weekday restrictions when one is
/// present, so "6월 월요일" still covers all of June.
pub(crate) fn contains_month_pattern(text: &str) -> bool {
    MONTH_RE.is_match(text)
}

/// The Monday beginning the ISO week that contains `date`.
pub(crate) fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

// ── Segmentation ────────────────────────────────────────────────────────────

/// Split on `,`, `+` and `/`. A `/` flanked by ASCII digits on both sides is
/// part of an `M/D` token, not a separator.
fn split_segments(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        let is_separator = match ch {
            ',' | '+' => true,
            '/' => {
                let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
                let next_digit = chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
                !(prev_digit && next_digit)
            }
            _ => false,
        };
        if is_separator {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    segments.push(current);
    segments
}

// ── Rule cascade ────────────────────────────────────────────────────────────

fn try_relative_day(segment: &str, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    RELATIVE_DAYS
        .iter()
        .find(|(word, _)| segment.contains(*word))
        .and_then(|&(_, offset)| today.checked_add_signed(Duration::days(offset)))
        .map(|date| vec![date])
}

fn try_counting_offset(segment: &str, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    for (word, count) in COUNTING_WORDS {
        if let Some(idx) = segment.find(word) {
            let tail = segment[idx + word.len()..].trim_start();
            let offset = if tail.starts_with('뒤') || tail.starts_with('후') {
                count
            } else if tail.starts_with('전') {
                -count
            } else {
                continue;
            };
            let resolved = today.checked_add_signed(Duration::days(offset))?;
            return Some(vec![resolved]);
        }
    }
    None
}

fn try_numeric_offset(segment: &str, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    let caps = DAY_OFFSET_RE.captures(segment)?;
    let n: i64 = caps[1].parse().ok()?;
    let offset = if &caps[2] == "전" { -n } else { n };
    let resolved = today.checked_add_signed(Duration::try_days(offset)?)?;
    Some(vec![resolved])
}

fn try_month_span(segment: &str, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    let caps = MONTH_RE.captures(segment)?;
    let month: u32 = caps[1].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = rollover_year(month, today);
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let mut days = Vec::new();
    let mut day = first;
    while day < first_of_next {
        days.push(day);
        day = day.succ_opt()?;
    }
    Some(days)
}

fn try_week_span(segment: &str, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    let offset = WEEK_WORDS
        .iter()
        .find(|(word, _)| segment.contains(*word))
        .map(|&(_, n)| n)
        .or_else(|| {
            let caps = WEEK_OFFSET_RE.captures(segment)?;
            caps[1].parse().ok()
        })?;
    let base = today.checked_add_signed(Duration::try_days(offset.checked_mul(7)?)?)?;
    let monday = monday_of(base);
    let mut week = Vec::with_capacity(7);
    for i in 0..7 {
        week.push(monday.checked_add_signed(Duration::days(i))?);
    }
    Some(week)
}

fn try_explicit_dates(segment: &str, today: NaiveDate) -> Option<Vec<NaiveDate>> {
    let mut matched = false;
    let mut dates = Vec::new();
    for caps in MONTH_DAY_RE.captures_iter(segment) {
        matched = true;
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(rollover_year(month, today), month, day) {
            dates.push(date);
        }
    }
    matched.then_some(dates)
}

/// Forward-rollover year selection: a month at or past the current month is
/// this year, an earlier month is next year. Dates never land in a past
/// month of the current year.
fn rollover_year(month: u32, today: NaiveDate) -> i32 {
    if month >= today.month() {
        today.year()
    } else {
        today.year() + 1
    }
}
