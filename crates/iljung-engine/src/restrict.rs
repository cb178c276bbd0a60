//! Weekday restriction composition.
//!
//! The final stage of intent parsing: narrows an already-resolved date set
//! to weekdays, to the weekend, or to explicitly named weekdays. Kept
//! separate from the resolver so it can be tested against arbitrary
//! pre-resolved sets.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::classify::{Classification, WeekdayRestriction};
use crate::resolver::contains_month_pattern;

const WEEKDAY_LETTERS: [(char, Weekday); 7] = [
    ('월', Weekday::Mon),
    ('화', Weekday::Tue),
    ('수', Weekday::Wed),
    ('목', Weekday::Thu),
    ('금', Weekday::Fri),
    ('토', Weekday::Sat),
    ('일', Weekday::Sun),
];

/// Apply the applicable weekday restriction, if any, and report which one
/// was used.
///
/// A 평일/주말 marker from the classifier always wins. Otherwise weekday
/// names in the full text restrict the set, but only when no bare
/// month-number pattern is present: "6월 월요일" still means all of June.
pub fn compose(
    dates: Vec<NaiveDate>,
    text: &str,
    classification: &Classification,
) -> (Vec<NaiveDate>, Option<WeekdayRestriction>) {
    match classification
        .day_marker
        .clone()
        .or_else(|| explicit_weekdays(text))
    {
        Some(restriction) => {
            let filtered = apply(&dates, &restriction);
            (filtered, Some(restriction))
        }
        None => (dates, None),
    }
}

/// Filter `dates` down to the days admitted by `restriction`. Idempotent.
pub fn apply(dates: &[NaiveDate], restriction: &WeekdayRestriction) -> Vec<NaiveDate> {
    dates
        .iter()
        .copied()
        .filter(|date| admits(*date, restriction))
        .collect()
}

fn admits(date: NaiveDate, restriction: &WeekdayRestriction) -> bool {
    match restriction {
        WeekdayRestriction::Weekdays => date.weekday().num_days_from_monday() < 5,
        WeekdayRestriction::Weekend => date.weekday().num_days_from_monday() >= 5,
        WeekdayRestriction::Explicit(days) => days.contains(&date.weekday()),
    }
}

/// Collect explicitly named weekdays from the text, token by token.
///
/// A token names weekdays when it is composed purely of the single-letter
/// day names (월, 월화수, ...) or carries the 요일 full form (월요일,
/// 토요일에). Token-level matching keeps ordinary words such as 일정 from
/// reading as Sunday.
fn explicit_weekdays(text: &str) -> Option<WeekdayRestriction> {
    if contains_month_pattern(text) {
        return None;
    }
    let mut days: Vec<Weekday> = Vec::new();
    for token in text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation()) {
        for day in weekdays_in_token(token) {
            if !days.contains(&day) {
                days.push(day);
            }
        }
    }
    if days.is_empty() {
        None
    } else {
        Some(WeekdayRestriction::Explicit(days))
    }
}

fn weekdays_in_token(token: &str) -> Vec<Weekday> {
    if let Some(idx) = token.find("요일") {
        // 월요일, 토요일에, ... — the letter right before 요일 names the day.
        return token[..idx]
            .chars()
            .last()
            .and_then(letter_day)
            .into_iter()
            .collect();
    }
    let mut days = Vec::new();
    for ch in token.chars() {
        match letter_day(ch) {
            Some(day) => days.push(day),
            // Mixed tokens (일정, 월말, ...) name no weekday at all.
            None => return Vec::new(),
        }
    }
    days
}

fn letter_day(letter: char) -> Option<Weekday> {
    WEEKDAY_LETTERS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|&(_, day)| day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use chrono::Duration;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Monday 2025-05-26 through Sunday 2025-06-01.
    fn next_week() -> Vec<NaiveDate> {
        (0..7).map(|i| d(2025, 5, 26) + Duration::days(i)).collect()
    }

    fn compose_for(text: &str, dates: Vec<NaiveDate>) -> (Vec<NaiveDate>, Option<WeekdayRestriction>) {
        let classification = classify(text);
        compose(dates, text, &classification)
    }

    #[test]
    fn test_weekday_marker_keeps_monday_through_friday() {
        let (dates, restriction) = compose_for("다음주 평일", next_week());
        assert_eq!(restriction, Some(WeekdayRestriction::Weekdays));
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], d(2025, 5, 26));
        assert_eq!(dates[4], d(2025, 5, 30));
    }

    #[test]
    fn test_weekend_marker_keeps_saturday_and_sunday() {
        let (dates, _) = compose_for("다음주 주말", next_week());
        assert_eq!(dates, vec![d(2025, 5, 31), d(2025, 6, 1)]);
    }

    #[test]
    fn test_named_weekday_tokens_restrict() {
        let (dates, restriction) = compose_for("다음주 월 화 수", next_week());
        assert_eq!(
            restriction,
            Some(WeekdayRestriction::Explicit(vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed
            ]))
        );
        assert_eq!(dates, vec![d(2025, 5, 26), d(2025, 5, 27), d(2025, 5, 28)]);
    }

    #[test]
    fn test_combined_letter_token() {
        let (dates, _) = compose_for("다음주 월화수", next_week());
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn test_full_form_with_particle() {
        let (dates, _) = compose_for("다음주 토요일에 시간 돼?", next_week());
        assert_eq!(dates, vec![d(2025, 5, 31)]);
    }

    #[test]
    fn test_ordinary_words_do_not_restrict() {
        // 일정 contains the Sunday letter but is not a weekday token.
        let (dates, restriction) = compose_for("다음주 일정 알려줘", next_week());
        assert_eq!(restriction, None);
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn test_month_pattern_suppresses_named_weekdays() {
        let june: Vec<NaiveDate> = (1..=30).map(|day| d(2025, 6, day)).collect();
        let (dates, restriction) = compose_for("6월 월요일", june.clone());
        assert_eq!(restriction, None);
        assert_eq!(dates, june);
    }

    #[test]
    fn test_marker_wins_over_named_weekdays() {
        let (dates, restriction) = compose_for("다음주 평일 월", next_week());
        assert_eq!(restriction, Some(WeekdayRestriction::Weekdays));
        assert_eq!(dates.len(), 5);
    }

    #[test]
    fn test_no_restriction_passes_dates_through() {
        let (dates, restriction) = compose_for("다음주", next_week());
        assert_eq!(restriction, None);
        assert_eq!(dates, next_week());
    }

    proptest! {
        #[test]
        fn restriction_application_is_idempotent(offsets in proptest::collection::vec(0i64..730, 0..40)) {
            let base = d(2025, 1, 1);
            let dates: Vec<NaiveDate> = offsets.iter().map(|&n| base + Duration::days(n)).collect();
            for restriction in [
                WeekdayRestriction::Weekdays,
                WeekdayRestriction::Weekend,
                WeekdayRestriction::Explicit(vec![Weekday::Mon, Weekday::Thu]),
            ] {
                let once = apply(&dates, &restriction);
                let twice = apply(&once, &restriction);
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn restricted_set_is_a_subset(offsets in proptest::collection::vec(0i64..730, 0..40)) {
            let base = d(2025, 1, 1);
            let dates: Vec<NaiveDate> = offsets.iter().map(|&n| base + Duration::days(n)).collect();
            let kept = apply(&dates, &WeekdayRestriction::Weekend);
            for date in kept {
                prop_assert!(dates.contains(&date));
            }
        }
    }
}
