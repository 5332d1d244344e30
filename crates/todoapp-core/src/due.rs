//! Parsing and formatting of due dates typed by the user.
//!
//! Due dates have day granularity. A chosen day is stored as midnight UTC
//! so the calendar day survives a round trip through `todos.json` on any
//! machine.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime};

use crate::TodoError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn due_date_from(day: NaiveDate) -> DateTime<FixedOffset> {
    day.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Parse a due date relative to `today`.
///
/// Accepts an empty string (no due date), `YYYY-MM-DD`, `today`,
/// `tomorrow`, `yesterday` and signed day offsets such as `+3` or `-1`.
pub fn parse_due_input(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, TodoError> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let day = match s.to_ascii_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        other => {
            if let Some(n) = other.strip_prefix('+') {
                parse_offset(n).and_then(|n| today.checked_add_days(Days::new(n)))
            } else if let Some(n) = other.strip_prefix('-') {
                parse_offset(n).and_then(|n| today.checked_sub_days(Days::new(n)))
            } else {
                NaiveDate::parse_from_str(other, DATE_FORMAT).ok()
            }
        }
    };

    day.map(Some)
        .ok_or_else(|| TodoError::InvalidInput(format!("unrecognised due date: {s}")))
}

fn parse_offset(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_means_no_due_date() {
        assert_eq!(parse_due_input("", today()), Ok(None));
        assert_eq!(parse_due_input("   ", today()), Ok(None));
    }

    #[test]
    fn keywords_are_relative_to_today() {
        assert_eq!(parse_due_input("today", today()), Ok(Some(today())));
        assert_eq!(parse_due_input("Tomorrow", today()), Ok(Some(ymd(2026, 10, 17))));
        assert_eq!(parse_due_input("yesterday", today()), Ok(Some(ymd(2026, 10, 15))));
    }

    #[test]
    fn signed_offsets() {
        assert_eq!(parse_due_input("+20", today()), Ok(Some(ymd(2026, 11, 5))));
        assert_eq!(parse_due_input("-16", today()), Ok(Some(ymd(2026, 9, 30))));
    }

    #[test]
    fn iso_dates() {
        assert_eq!(parse_due_input("2027-01-02", today()), Ok(Some(ymd(2027, 1, 2))));
    }

    #[test]
    fn garbage_is_rejected() {
        for bad in ["soon", "+", "-x", "2026-13-01", "+1d"] {
            assert!(
                matches!(parse_due_input(bad, today()), Err(TodoError::InvalidInput(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn stored_due_date_keeps_the_day() {
        let due = due_date_from(ymd(2026, 12, 15));
        assert_eq!(due.date_naive(), ymd(2026, 12, 15));
        assert_eq!(format_day(due.date_naive()), "2026-12-15");
    }
}
