//! Calendar date helpers shared by the views and the stats controls.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Number of days in the given month (handles leap years).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    // Day 1 of the following month, stepped back by one day.
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// First and last day of the given month. None for out-of-range input.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    Some((first, last))
}

/// Today in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Yesterday in the local timezone.
pub fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn bounds_cover_the_whole_month() {
        let (first, last) = month_bounds(2024, 3).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn bounds_reject_invalid_months() {
        assert!(month_bounds(2024, 0).is_none());
        assert!(month_bounds(2024, 13).is_none());
    }
}
