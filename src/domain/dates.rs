// src/domain/dates.rs

use crate::domain::event::Event;
use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Date formats the scrape feeds actually use, tried in order.
/// First match wins: "Apr 4 2026" / "Apr 04 2026", "4.4.26" / "04.04.26",
/// "04/04/26". Year-less "Apr 4" is handled separately with the current
/// calendar year.
const DATE_FORMATS: &[&str] = &["%b %d %Y", "%m.%d.%y", "%m/%d/%y"];

/// Parse free-text date into a calendar date. `None` means "unparsed",
/// which is a valid outcome; callers must branch on it, never assume
/// success.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_date_with_year(text, Utc::now().year())
}

/// Same as `parse_date`, with the fallback year for year-less inputs made
/// explicit so tests don't depend on the wall clock.
pub fn parse_date_with_year(text: &str, fallback_year: i32) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    // "Apr 4" / "Apr 24": the feed drops the year for the current season.
    NaiveDate::parse_from_str(&format!("{trimmed} {fallback_year}"), "%b %d %Y").ok()
}

/// Day-count primitive: days from `today` to the parsed date (negative for
/// past dates), or `None` when the text is unparsed.
pub fn days_until_on(text: &str, today: NaiveDate) -> Option<i64> {
    parse_date_with_year(text, today.year()).map(|date| (date - today).num_days())
}

pub fn days_until(text: &str) -> Option<i64> {
    days_until_on(text, Utc::now().date_naive())
}

/// Unparsed dates are never considered past, so an event with a mangled
/// date line is never hidden from notifications.
pub fn is_past_event_on(text: &str, today: NaiveDate) -> bool {
    match parse_date_with_year(text, today.year()) {
        Some(date) => date < today,
        None => false,
    }
}

pub fn is_past_event(text: &str) -> bool {
    is_past_event_on(text, Utc::now().date_naive())
}

/// True when the date falls on or after today's midnight and strictly
/// before `today + n` days. Fails open: unparsed dates and non-positive
/// windows always pass the filter.
pub fn is_within_days_on(text: &str, n: i64, today: NaiveDate) -> bool {
    if n <= 0 {
        return true;
    }
    match parse_date_with_year(text, today.year()) {
        Some(date) => date >= today && date < today + Duration::days(n),
        None => true,
    }
}

pub fn is_within_days(text: &str, n: i64) -> bool {
    is_within_days_on(text, n, Utc::now().date_naive())
}

/// Fails open, like `is_within_days`.
pub fn is_upcoming_on(text: &str, today: NaiveDate) -> bool {
    match parse_date_with_year(text, today.year()) {
        Some(date) => date >= today,
        None => true,
    }
}

pub fn is_upcoming(text: &str) -> bool {
    is_upcoming_on(text, Utc::now().date_naive())
}

/// Stable ascending sort by parsed date. Unparsed entries trail every
/// parsed entry and keep their original relative order.
pub fn sort_by_date_on(events: &mut [Event], today: NaiveDate) {
    events.sort_by_key(|event| {
        let parsed = parse_date_with_year(&event.date_text, today.year());
        // None sorts before Some, so flag unparsed entries to push them last.
        (parsed.is_none(), parsed)
    });
}

pub fn sort_by_date(events: &mut [Event]) {
    sort_by_date_on(events, Utc::now().date_naive());
}

/// Human-facing rendering: "Saturday, April 4, 2026 (in 2 weeks)".
/// Unparsed input is echoed back unchanged.
pub fn format_event_date(text: &str, today: NaiveDate) -> String {
    let Some(date) = parse_date_with_year(text, today.year()) else {
        return text.to_string();
    };
    let formatted = date.format("%A, %B %-d, %Y").to_string();
    let days_out = (date - today).num_days();
    let suffix = match days_out {
        0 => Some("(today!)".to_string()),
        1 => Some("(tomorrow)".to_string()),
        2..=13 => Some(format!("(in {days_out} days)")),
        14..=30 => Some(format!("(in {} weeks)", days_out / 7)),
        -1 => Some("(yesterday)".to_string()),
        d if d < -1 => Some(format!("({} days ago)", -d)),
        _ => None,
    };
    match suffix {
        Some(s) => format!("{formatted} {s}"),
        None => formatted,
    }
}
