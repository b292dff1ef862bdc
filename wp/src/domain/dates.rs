//! Week date arithmetic
//!
//! ISO-week semantics throughout: a week runs Monday through Sunday, and
//! Sunday is day 7 of its week, not day 0 of the next one. The ISO date
//! of a week's Monday doubles as the persistence key for that week.

use chrono::{Datelike, Days, Local, NaiveDate};
use eyre::{Result, eyre};

/// The Monday on or before the given date
///
/// Idempotent: a Monday maps to itself.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Format a date as `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_iso(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| eyre!("Invalid date '{}': {}", s, e))
}

/// The seven consecutive dates of the week starting at `monday`
pub fn week_dates(monday: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| monday.checked_add_days(Days::new(i as u64)).unwrap_or(monday))
}

/// Move a week's Monday by `offset` whole weeks
pub fn shift_weeks(monday: NaiveDate, offset: i64) -> NaiveDate {
    let days = offset * 7;
    let shifted = if days >= 0 {
        monday.checked_add_days(Days::new(days as u64))
    } else {
        monday.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(monday)
}

/// Week id for today, in local time
pub fn current_week_id() -> String {
    iso_date(monday_of(Local::now().date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_of_is_idempotent() {
        // Every day of a sample week maps to the same Monday, which then
        // maps to itself.
        for day in week_dates(date(2024, 6, 3)) {
            let monday = monday_of(day);
            assert_eq!(monday, date(2024, 6, 3));
            assert_eq!(monday_of(monday), monday);
        }
    }

    #[test]
    fn test_sunday_belongs_to_preceding_week() {
        // 2024-06-09 is a Sunday; ISO semantics put it in the week of
        // Monday 2024-06-03, not the week of 2024-06-10.
        let sunday = date(2024, 6, 9);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(monday_of(sunday), date(2024, 6, 3));
    }

    #[test]
    fn test_monday_of_crosses_month_and_year() {
        // 2024-01-01 is a Monday
        assert_eq!(monday_of(date(2024, 1, 1)), date(2024, 1, 1));
        // 2023-12-31 is the Sunday before it
        assert_eq!(monday_of(date(2023, 12, 31)), date(2023, 12, 25));
    }

    #[test]
    fn test_week_dates_len_and_head() {
        let monday = date(2024, 6, 3);
        let dates = week_dates(monday);
        assert_eq!(dates.len(), 7);
        assert_eq!(iso_date(dates[0]), "2024-06-03");
        assert_eq!(iso_date(dates[6]), "2024-06-09");
    }

    #[test]
    fn test_shift_weeks() {
        let monday = date(2024, 6, 3);
        assert_eq!(shift_weeks(monday, 1), date(2024, 6, 10));
        assert_eq!(shift_weeks(monday, -1), date(2024, 5, 27));
        assert_eq!(shift_weeks(monday, 0), monday);
    }

    #[test]
    fn test_iso_round_trip() {
        let monday = date(2024, 6, 3);
        assert_eq!(parse_iso(&iso_date(monday)).unwrap(), monday);
        assert!(parse_iso("not-a-date").is_err());
    }
}
