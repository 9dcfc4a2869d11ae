//! Calendar domain logic for the expense calendar.
//!
//! This module contains the grid builder: turning a (year, month) into day
//! cells, stitching the previous/current/next months into one sequence,
//! re-slicing that sequence into Sunday-anchored weeks, and overlaying stored
//! occurrences onto the cells. Everything here is pure given the injected
//! clock, so the UI and storage layers only handle their own concerns.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::domain::calendar_math::{self, days_in_month, next_month, normalize_year_month, previous_month};
use crate::domain::clock::Clock;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{DayCell, EventOccurrence};

/// Weekday on which every re-sliced week starts
pub const WEEK_ANCHOR: Weekday = Weekday::Sun;

/// Three-month view centred on `year`/`month`
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarWindow {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

/// Calendar service that builds calendar grids
#[derive(Clone)]
pub struct CalendarService {
    clock: Arc<dyn Clock>,
}

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Today's date according to the injected clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Build the Monday-first weeks of one month.
    ///
    /// Weeks only hold days of the requested month, so the first and last
    /// week are usually partial. Month 0 and 13 are read as December of the
    /// previous year and January of the next year.
    pub fn build_month(&self, year: i32, month: i32) -> DomainResult<Vec<Vec<DayCell>>> {
        let (year, month) = normalize_year_month(year, month)?;
        let today = self.clock.today();

        let mut weeks: Vec<Vec<DayCell>> = Vec::new();
        let mut week: Vec<DayCell> = Vec::new();

        for day in 1..=days_in_month(year, month) {
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                DomainError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day))
            })?;
            let cell = DayCell::new(date, today);

            if cell.day_of_week == Weekday::Mon && !week.is_empty() {
                weeks.push(std::mem::take(&mut week));
            }
            week.push(cell);
        }

        if !week.is_empty() {
            weeks.push(week);
        }

        Ok(weeks)
    }

    /// Previous, current and next month as one flat, ascending day sequence
    pub fn build_three_month_window(&self, year: i32, month: i32) -> DomainResult<Vec<DayCell>> {
        let (year, month) = normalize_year_month(year, month)?;
        let (prev_year, prev_month) = previous_month(year, month);
        let (next_year, following_month) = next_month(year, month);

        let mut days = Vec::new();
        for (y, m) in [(prev_year, prev_month), (year, month), (next_year, following_month)] {
            days.extend(self.build_month(y, m as i32)?.into_iter().flatten());
        }

        debug!("Built three month window around {}/{} with {} days", month, year, days.len());
        Ok(days)
    }

    /// Re-slice a flat day sequence into 7-day weeks starting on Sunday.
    ///
    /// Days before the first Sunday are dropped; a trailing partial week is
    /// kept.
    pub fn resegment(days: Vec<DayCell>) -> Vec<Vec<DayCell>> {
        let mut weeks = Vec::new();
        let mut week = Vec::with_capacity(7);

        for day in days.into_iter().skip_while(|d| d.day_of_week != WEEK_ANCHOR) {
            week.push(day);
            if week.len() == 7 {
                weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
            }
        }

        if !week.is_empty() {
            weeks.push(week);
        }

        weeks
    }

    /// Attach each event to the cell with the same date and compute the
    /// per-day total. Excluded events are listed but not counted. Events
    /// outside the grid are ignored.
    pub fn overlay_events(weeks: &mut [Vec<DayCell>], events: Vec<EventOccurrence>) {
        let mut by_date: HashMap<NaiveDate, Vec<EventOccurrence>> = HashMap::new();
        for event in events {
            by_date.entry(event.date).or_default().push(event);
        }

        for cell in weeks.iter_mut().flatten() {
            let Some(date) = cell.naive_date() else { continue };
            if let Some(day_events) = by_date.remove(&date) {
                cell.total = day_events
                    .iter()
                    .filter(|e| !e.excluded)
                    .map(|e| e.amount)
                    .sum::<Decimal>();
                cell.events = day_events;
            }
        }
    }

    /// Build the resegmented three-month view with `events` overlaid
    pub fn calendar_window(
        &self,
        year: i32,
        month: i32,
        events: Vec<EventOccurrence>,
    ) -> DomainResult<CalendarWindow> {
        let (year, month) = normalize_year_month(year, month)?;
        let days = self.build_three_month_window(year, month as i32)?;
        let mut weeks = Self::resegment(days);
        Self::overlay_events(&mut weeks, events);

        Ok(CalendarWindow { year, month, weeks })
    }

    /// Human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        calendar_math::month_name(month)
    }
}
