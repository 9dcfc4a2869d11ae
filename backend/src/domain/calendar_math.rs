//! Calendar arithmetic used by the grid builder and the recurrence expander.
//!
//! Month and year addition clamp to the last valid day of the target month:
//! Jan 31 + 1 month is Feb 28 (Feb 29 in leap years), and Feb 29 + 1 year is
//! Feb 28 when the target year is not a leap year. Additions are always
//! computed from an anchor date, so a clamped result never shortens later
//! steps.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::error::{DomainError, DomainResult};

/// Years whose dates format as plain `YYYY-MM-DD`. Stored dates are compared
/// as text, which only orders correctly inside this range.
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a month. `month` must already be normalized (1-12).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Human-readable name for a month number (1-12)
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "Invalid Month",
    }
}

/// Normalize a (year, month) pair where callers computed the month by simple
/// arithmetic: month 0 is December of the previous year and month 13 is
/// January of the next year.
pub fn normalize_year_month(year: i32, month: i32) -> DomainResult<(i32, u32)> {
    let (year, month) = match month {
        0 => (year.checked_sub(1), 12),
        13 => (year.checked_add(1), 1),
        1..=12 => (Some(year), month as u32),
        _ => {
            return Err(DomainError::InvalidDate(format!(
                "month {} is out of range",
                month
            )))
        }
    };

    let year = year.ok_or_else(|| DomainError::InvalidDate("year overflow".to_string()))?;
    first_of_month(year, month)?;
    Ok((year, month))
}

/// Reject years outside `MIN_YEAR..=MAX_YEAR`
pub fn check_storable_year(year: i32) -> DomainResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(DomainError::InvalidDate(format!(
            "year {} is outside {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )))
    }
}

/// First day of a month, failing for years chrono cannot represent
pub fn first_of_month(year: i32, month: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        DomainError::InvalidDate(format!("{:04}-{:02} is not a representable month", year, month))
    })
}

/// The month before `month` of `year`, wrapping the year boundary
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The month after `month` of `year`, wrapping the year boundary
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Add whole calendar months to a date, clamping the day of month
pub fn add_months(date: NaiveDate, months: u32) -> DomainResult<NaiveDate> {
    let zero_based = date.month0() as i64 + months as i64;
    let year = date.year() as i64 + zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;

    let year = i32::try_from(year)
        .map_err(|_| DomainError::InvalidDate(format!("{} + {} months overflows", date, months)))?;
    clamped_date(year, month, date.day())
        .ok_or_else(|| DomainError::InvalidDate(format!("{} + {} months overflows", date, months)))
}

/// Add whole calendar years to a date, clamping Feb 29 in non-leap years
pub fn add_years(date: NaiveDate, years: u32) -> DomainResult<NaiveDate> {
    let year = i32::try_from(years)
        .ok()
        .and_then(|years| date.year().checked_add(years))
        .ok_or_else(|| DomainError::InvalidDate(format!("{} + {} years overflows", date, years)))?;

    clamped_date(year, date.month(), date.day())
        .ok_or_else(|| DomainError::InvalidDate(format!("{} + {} years overflows", date, years)))
}

/// Add a number of days to a date
pub fn add_days(date: NaiveDate, days: u64) -> DomainResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::InvalidDate(format!("{} + {} days overflows", date, days)))
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Date range covered by the three-month window centred on `year`/`month`:
/// the first day of the previous month (inclusive) up to the first day of the
/// month after the next month (exclusive).
pub fn window_bounds(year: i32, month: u32) -> DomainResult<(NaiveDate, NaiveDate)> {
    let (prev_year, prev_month) = previous_month(year, month);
    let (next_year, following) = next_month(year, month);
    let (after_year, after_month) = next_month(next_year, following);

    Ok((
        first_of_month(prev_year, prev_month)?,
        first_of_month(after_year, after_month)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Invalid Month");
    }

    #[test]
    fn test_normalize_year_month() {
        assert_eq!(normalize_year_month(2024, 0).unwrap(), (2023, 12));
        assert_eq!(normalize_year_month(2024, 13).unwrap(), (2025, 1));
        assert_eq!(normalize_year_month(2024, 6).unwrap(), (2024, 6));
        assert!(matches!(normalize_year_month(2024, 14), Err(DomainError::InvalidDate(_))));
        assert!(matches!(normalize_year_month(2024, -1), Err(DomainError::InvalidDate(_))));
        assert!(matches!(normalize_year_month(i32::MAX, 6), Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_check_storable_year() {
        assert!(check_storable_year(0).is_ok());
        assert!(check_storable_year(9999).is_ok());
        assert!(matches!(check_storable_year(10000), Err(DomainError::InvalidDate(_))));
        assert!(matches!(check_storable_year(-1), Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_navigation() {
        assert_eq!(previous_month(2025, 6), (2025, 5));
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(next_month(2025, 6), (2025, 7));
        assert_eq!(next_month(2025, 12), (2026, 1));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let start = date(2024, 1, 31);
        assert_eq!(add_months(start, 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months(start, 2).unwrap(), date(2024, 3, 31));
        assert_eq!(add_months(start, 3).unwrap(), date(2024, 4, 30));
        assert_eq!(add_months(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_add_months_wraps_years() {
        assert_eq!(add_months(date(2024, 11, 15), 3).unwrap(), date(2025, 2, 15));
        assert_eq!(add_months(date(2024, 12, 1), 12).unwrap(), date(2025, 12, 1));
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        let leap_day = date(2024, 2, 29);
        assert_eq!(add_years(leap_day, 1).unwrap(), date(2025, 2, 28));
        assert_eq!(add_years(leap_day, 4).unwrap(), date(2028, 2, 29));
    }

    #[test]
    fn test_add_days_overflow_is_an_error() {
        assert_eq!(add_days(date(2024, 12, 31), 1).unwrap(), date(2025, 1, 1));
        assert!(matches!(add_days(NaiveDate::MAX, 1), Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(window_bounds(2024, 6).unwrap(), (date(2024, 5, 1), date(2024, 8, 1)));
        assert_eq!(window_bounds(2024, 1).unwrap(), (date(2023, 12, 1), date(2024, 3, 1)));
        assert_eq!(window_bounds(2024, 12).unwrap(), (date(2024, 11, 1), date(2025, 2, 1)));
    }
}
