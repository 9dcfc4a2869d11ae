//! Read side of the calendar: the three-month window with stored occurrences
//! overlaid, single occurrence lookup, and the exclude toggle.
//!
//! The toggle takes the same per-user lock as a refresh, so a flag is never
//! written between a refresh's exclusion read and its commit.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::calendar::CalendarService;
use crate::domain::calendar_math::{check_storable_year, normalize_year_month};
use crate::domain::commands::calendar::{CalendarWindowQuery, CalendarWindowResult};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::EventOccurrence;
use crate::domain::user_locks::UserLocks;
use crate::storage::EventStorage;

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStorage>,
    calendar: CalendarService,
    locks: UserLocks,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStorage>, calendar: CalendarService, locks: UserLocks) -> Self {
        Self {
            events,
            calendar,
            locks,
        }
    }

    /// Resegmented three-month window around the queried month with the
    /// user's stored occurrences on their days
    pub async fn calendar_window(&self, user_id: &str, query: CalendarWindowQuery) -> DomainResult<CalendarWindowResult> {
        let (year, month) = normalize_year_month(query.year, query.month)?;
        check_storable_year(year)?;

        let events = self
            .events
            .list_events_in_window(user_id, year, month)
            .await
            .map_err(DomainError::from_storage)?;
        info!(
            "Building calendar window {}/{} for user {} with {} events",
            month,
            year,
            user_id,
            events.len()
        );

        let window = self.calendar.calendar_window(year, month as i32, events)?;
        Ok(CalendarWindowResult {
            month_name: self.calendar.month_name(window.month),
            window,
        })
    }

    pub async fn get_event(&self, user_id: &str, event_id: &str) -> DomainResult<EventOccurrence> {
        self.events
            .get_event(user_id, event_id)
            .await
            .map_err(DomainError::from_storage)?
            .ok_or_else(|| DomainError::NotFound(format!("Event {}", event_id)))
    }

    /// Mark an occurrence as excluded (or include it again) and return it.
    ///
    /// Waits for any running refresh of the user. An id replaced by that
    /// refresh is then `NotFound`.
    pub async fn set_event_excluded(&self, user_id: &str, event_id: &str, excluded: bool) -> DomainResult<EventOccurrence> {
        let _guard = self.locks.lock(user_id).await;
        info!("Setting excluded={} on event {} for user {}", excluded, event_id, user_id);

        let found = self
            .events
            .set_event_excluded(user_id, event_id, excluded)
            .await
            .map_err(DomainError::from_storage)?;
        if !found {
            warn!("Event {} not found for user {}", event_id, user_id);
            return Err(DomainError::NotFound(format!("Event {}", event_id)));
        }

        self.get_event(user_id, event_id).await
    }
}
