//! Non-date query signals.
//!
//! Scans the full normalized text (never individual segments) for the four
//! auxiliary signals that ride along with a date expression: a time-of-day
//! window, a topic keyword, an availability-seeking phrasing, and a
//! weekday/weekend marker. Each signal is single-valued; precedence between
//! competing markers is fixed here and nowhere else.

use chrono::{NaiveTime, Timelike, Weekday};
use serde::Serialize;

// ── Time-of-day windows ─────────────────────────────────────────────────────

/// A time-of-day window applied to event start times.
///
/// Lunch and evening are closed intervals at both ends; morning and
/// afternoon are half-open so noon belongs to the afternoon only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    /// [11:00, 14:00]
    Lunch,
    /// [18:00, 21:00]
    Evening,
    /// [06:00, 12:00)
    Morning,
    /// [12:00, 18:00)
    Afternoon,
}

impl TimeFilter {
    /// Whether an event starting at `start` falls inside this window.
    pub fn admits(self, start: NaiveTime) -> bool {
        let secs = start.num_seconds_from_midnight();
        match self {
            TimeFilter::Lunch => (11 * 3600..=14 * 3600).contains(&secs),
            TimeFilter::Evening => (18 * 3600..=21 * 3600).contains(&secs),
            TimeFilter::Morning => (6 * 3600..12 * 3600).contains(&secs),
            TimeFilter::Afternoon => (12 * 3600..18 * 3600).contains(&secs),
        }
    }

    /// Human-readable window name used by the presenter.
    pub fn window_label(self) -> &'static str {
        match self {
            TimeFilter::Lunch => "점심시간(11~14시)",
            TimeFilter::Evening => "저녁시간(18~21시)",
            TimeFilter::Morning => "오전(6~12시)",
            TimeFilter::Afternoon => "오후(12~18시)",
        }
    }
}

// ── Weekday restriction ─────────────────────────────────────────────────────

/// Restriction on which weekdays survive date resolution.
///
/// `Weekdays`/`Weekend` come from the 평일/주말 markers; `Explicit` is built
/// later by the filter composer from named weekday tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayRestriction {
    Weekdays,
    Weekend,
    Explicit(Vec<Weekday>),
}

// ── Marker vocabularies ─────────────────────────────────────────────────────

/// Time-of-day markers in precedence order; the first hit wins, so a query
/// naming both lunch and evening resolves to lunch.
const TIME_MARKERS: [(&str, TimeFilter); 4] = [
    ("점심", TimeFilter::Lunch),
    ("저녁", TimeFilter::Evening),
    ("아침", TimeFilter::Morning),
    ("오후", TimeFilter::Afternoon),
];

/// Closed topic vocabulary, scanned in this order; single-valued by design.
const KEYWORDS: [&str; 8] = [
    "골프",
    "데이트",
    "회식",
    "미팅",
    "회의",
    "병원",
    "약속",
    "식사",
];

/// The two recognized "free day" phrasings.
const AVAILABILITY_MARKERS: [&str; 2] = ["한가", "비는 날"];

// ── Classification ──────────────────────────────────────────────────────────

/// The non-date signals extracted from one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub time_filter: Option<TimeFilter>,
    pub keyword: Option<String>,
    pub find_available: bool,
    /// 평일/주말 marker only; explicit weekday sets are composed downstream.
    pub day_marker: Option<WeekdayRestriction>,
}

/// Extract all non-date signals from the full normalized text.
pub fn classify(text: &str) -> Classification {
    let time_filter = TIME_MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|&(_, filter)| filter);

    let keyword = KEYWORDS
        .iter()
        .find(|word| text.contains(*word))
        .map(|word| (*word).to_string());

    let find_available = AVAILABILITY_MARKERS
        .iter()
        .any(|marker| text.contains(marker));

    // 평일 is checked before 주말; the two are mutually exclusive.
    let day_marker = if text.contains("평일") {
        Some(WeekdayRestriction::Weekdays)
    } else if text.contains("주말") {
        Some(WeekdayRestriction::Weekend)
    } else {
        None
    };

    Classification {
        time_filter,
        keyword,
        find_available,
        day_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_lunch_wins_over_evening() {
        let c = classify("점심이나 저녁에 시간 있어?");
        assert_eq!(c.time_filter, Some(TimeFilter::Lunch));
    }

    #[test]
    fn test_evening_marker() {
        let c = classify("이번주 저녁 일정");
        assert_eq!(c.time_filter, Some(TimeFilter::Evening));
    }

    #[test]
    fn test_morning_and_afternoon_markers() {
        assert_eq!(classify("내일 아침").time_filter, Some(TimeFilter::Morning));
        assert_eq!(
            classify("내일 오후 비어 있나").time_filter,
            Some(TimeFilter::Afternoon)
        );
    }

    #[test]
    fn test_no_time_marker() {
        assert_eq!(classify("다음주 일정 알려줘").time_filter, None);
    }

    #[test]
    fn test_keyword_vocabulary_order_wins() {
        // Both 회식 and 골프 appear; 골프 is earlier in the vocabulary.
        let c = classify("회식 말고 골프 일정만");
        assert_eq!(c.keyword.as_deref(), Some("골프"));
    }

    #[test]
    fn test_keyword_single_valued() {
        let c = classify("다음주 병원 약속");
        assert_eq!(c.keyword.as_deref(), Some("병원"));
    }

    #[test]
    fn test_availability_phrasings() {
        assert!(classify("다음주에 한가한 날 있어?").find_available);
        assert!(classify("6월에 비는 날 알려줘").find_available);
        assert!(!classify("다음주 일정").find_available);
    }

    #[test]
    fn test_weekday_marker_precedence() {
        assert_eq!(
            classify("다음주 평일").day_marker,
            Some(WeekdayRestriction::Weekdays)
        );
        assert_eq!(
            classify("다음주 주말").day_marker,
            Some(WeekdayRestriction::Weekend)
        );
        // 평일 checked first when both appear.
        assert_eq!(
            classify("평일이든 주말이든").day_marker,
            Some(WeekdayRestriction::Weekdays)
        );
    }

    #[test]
    fn test_lunch_window_inclusive_boundaries() {
        assert!(TimeFilter::Lunch.admits(time(11, 0)));
        assert!(TimeFilter::Lunch.admits(time(14, 0)));
        assert!(!TimeFilter::Lunch.admits(time(10, 59)));
        assert!(!TimeFilter::Lunch.admits(time(14, 1)));
    }

    #[test]
    fn test_evening_window_inclusive_boundaries() {
        assert!(TimeFilter::Evening.admits(time(18, 0)));
        assert!(TimeFilter::Evening.admits(time(21, 0)));
        assert!(!TimeFilter::Evening.admits(time(17, 59)));
        assert!(!TimeFilter::Evening.admits(time(21, 1)));
    }

    #[test]
    fn test_noon_belongs_to_afternoon_only() {
        assert!(!TimeFilter::Morning.admits(time(12, 0)));
        assert!(TimeFilter::Afternoon.admits(time(12, 0)));
        assert!(TimeFilter::Morning.admits(time(6, 0)));
        assert!(!TimeFilter::Afternoon.admits(time(18, 0)));
    }
}
