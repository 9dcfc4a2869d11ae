use super::event_mapper::EventMapper;
use crate::domain::commands::calendar::CalendarWindowResult;
use crate::domain::models::DayCell;
use shared::{CalendarDay, CalendarWindowResponse};

pub struct CalendarMapper;

impl CalendarMapper {
    pub fn to_window_response(result: CalendarWindowResult) -> CalendarWindowResponse {
        let CalendarWindowResult { window, month_name } = result;
        CalendarWindowResponse {
            year: window.year,
            month: window.month,
            month_name: month_name.to_string(),
            weeks: window
                .weeks
                .into_iter()
                .map(|week| week.into_iter().map(Self::to_day_dto).collect())
                .collect(),
        }
    }

    pub fn to_day_dto(cell: DayCell) -> CalendarDay {
        CalendarDay {
            day_of_week: cell.day_name().to_string(),
            date: cell.date,
            month: cell.month,
            year: cell.year,
            is_today: cell.is_today,
            is_today_or_later: cell.is_today_or_later,
            events: cell.events.into_iter().map(EventMapper::to_dto).collect(),
            total: cell.total,
        }
    }
}
