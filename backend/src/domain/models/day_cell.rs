//! Request-scoped calendar cell produced by the grid builder.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;

use super::event::EventOccurrence;

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    /// Day of month
    pub date: u32,
    pub month: u32,
    pub year: i32,
    pub day_of_week: Weekday,
    pub is_today: bool,
    pub is_today_or_later: bool,
    pub events: Vec<EventOccurrence>,
    pub total: Decimal,
}

impl DayCell {
    pub fn new(day: NaiveDate, today: NaiveDate) -> Self {
        use chrono::Datelike;

        Self {
            date: day.day(),
            month: day.month(),
            year: day.year(),
            day_of_week: day.weekday(),
            is_today: day == today,
            is_today_or_later: day >= today,
            events: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// The calendar date this cell stands for
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.date)
    }

    /// Full English name of the weekday
    pub fn day_name(&self) -> &'static str {
        match self.day_of_week {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}
