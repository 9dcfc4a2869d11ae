//! Calendar refresh: regenerate every stored occurrence of a user from their
//! recurring expenses.
//!
//! A refresh loads the expenses, expands them, carries over the excluded flag
//! of occurrences that still exist (same expense, same date) and swaps the
//! stored set in one transaction. A refresh holds the user's lock from the
//! exclusion read to the commit, so neither a second refresh nor an exclude
//! toggle can slip in between.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::commands::calendar::RefreshResult;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::recurrence::{apply_exclusions, RecurrenceExpander};
use crate::domain::user_locks::UserLocks;
use crate::storage::{EventStorage, ExpenseStorage};

#[derive(Clone)]
pub struct RefreshService {
    expenses: Arc<dyn ExpenseStorage>,
    events: Arc<dyn EventStorage>,
    expander: RecurrenceExpander,
    locks: UserLocks,
}

impl RefreshService {
    pub fn new(
        expenses: Arc<dyn ExpenseStorage>,
        events: Arc<dyn EventStorage>,
        expander: RecurrenceExpander,
        locks: UserLocks,
    ) -> Self {
        Self {
            expenses,
            events,
            expander,
            locks,
        }
    }

    /// Regenerate and store all occurrences for `user_id`.
    ///
    /// Nothing is written if loading or expansion fails. A failed write
    /// leaves the previous occurrences in place and reports `Transaction`.
    pub async fn refresh(&self, user_id: &str) -> DomainResult<RefreshResult> {
        let _guard = self.locks.lock(user_id).await;

        info!("Refreshing calendar for user {}", user_id);

        let expenses = self
            .expenses
            .list_expenses(user_id)
            .await
            .map_err(DomainError::from_storage)?;
        let mut occurrences = self.expander.expand(&expenses)?;

        let excluded: HashSet<_> = self
            .events
            .list_exclusions(user_id)
            .await
            .map_err(DomainError::from_storage)?
            .into_iter()
            .collect();
        let exclusions_preserved = apply_exclusions(&mut occurrences, &excluded);

        self.events
            .replace_events(user_id, &occurrences)
            .await
            .map_err(|e| {
                error!("Failed to store refreshed events for user {}: {:#}", user_id, e);
                DomainError::Transaction(format!("{:#}", e))
            })?;

        info!(
            "Refreshed calendar for user {}: {} expenses, {} events, {} exclusions kept",
            user_id,
            expenses.len(),
            occurrences.len(),
            exclusions_preserved
        );

        Ok(RefreshResult {
            events_generated: occurrences.len(),
            exclusions_preserved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarService;
    use crate::domain::clock::FixedClock;
    use crate::domain::event_service::EventService;
    use crate::domain::id_provider::SequentialIdProvider;
    use crate::domain::models::{EventOccurrence, Frequency, RecurringExpense};
    use crate::storage::{DbConnection, EventRepository, ExpenseRepository};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::Notify;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, start: NaiveDate, end: NaiveDate, frequency: Frequency) -> RecurringExpense {
        RecurringExpense {
            id: id.to_string(),
            summary: id.to_string(),
            amount: Decimal::new(1000, 2),
            start_date: start,
            end_date: end,
            frequency,
        }
    }

    struct Fixture {
        db: DbConnection,
        expenses: Arc<ExpenseRepository>,
        events: Arc<EventRepository>,
        locks: UserLocks,
        service: RefreshService,
        _dir: Option<TempDir>,
    }

    impl Fixture {
        fn build(db: DbConnection, dir: Option<TempDir>) -> Self {
            let expenses = Arc::new(ExpenseRepository::new(db.clone()));
            let events = Arc::new(EventRepository::new(db.clone()));
            let locks = UserLocks::new();
            let service = RefreshService::new(
                expenses.clone(),
                events.clone(),
                RecurrenceExpander::new(Arc::new(SequentialIdProvider::new("id"))),
                locks.clone(),
            );
            Fixture { db, expenses, events, locks, service, _dir: dir }
        }

        /// Refresh service sharing this fixture's locks over different event storage
        fn service_with(&self, events: Arc<dyn EventStorage>, prefix: &str) -> RefreshService {
            RefreshService::new(
                self.expenses.clone(),
                events,
                RecurrenceExpander::new(Arc::new(SequentialIdProvider::new(prefix))),
                self.locks.clone(),
            )
        }

        fn event_service(&self) -> EventService {
            EventService::new(
                self.events.clone(),
                CalendarService::new(Arc::new(FixedClock(date(2024, 1, 10)))),
                self.locks.clone(),
            )
        }

        async fn seed_january(&self) {
            self.expenses
                .store_expense("alice", &expense("rent", date(2024, 1, 1), date(2024, 1, 31), Frequency::Daily))
                .await
                .unwrap();
            self.expenses
                .store_expense("alice", &expense("gym", date(2024, 1, 1), date(2024, 1, 29), Frequency::Weekly))
                .await
                .unwrap();
        }
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        Fixture::build(db, None)
    }

    /// Fixture on a real database file with several pooled connections
    async fn setup_file_backed() -> Fixture {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.path().join("calendar.db").display());
        let db = DbConnection::new(&url, 4).await.expect("Failed to open test database");
        Fixture::build(db, Some(dir))
    }

    /// Delegates to the real repository, optionally failing every replace or
    /// stalling the first exclusion read until released
    struct ScriptedEvents {
        inner: Arc<EventRepository>,
        fail_replace: bool,
        reached: Arc<Notify>,
        release: Arc<Notify>,
        stall_once: AtomicBool,
    }

    impl ScriptedEvents {
        fn failing(inner: Arc<EventRepository>) -> Self {
            Self {
                inner,
                fail_replace: true,
                reached: Arc::new(Notify::new()),
                release: Arc::new(Notify::new()),
                stall_once: AtomicBool::new(false),
            }
        }

        fn stalling(inner: Arc<EventRepository>) -> Self {
            Self {
                stall_once: AtomicBool::new(true),
                fail_replace: false,
                ..Self::failing(inner)
            }
        }
    }

    #[async_trait]
    impl EventStorage for ScriptedEvents {
        async fn list_events_in_window(&self, user_id: &str, year: i32, month: u32) -> Result<Vec<EventOccurrence>> {
            self.inner.list_events_in_window(user_id, year, month).await
        }

        async fn list_events_between(&self, user_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<EventOccurrence>> {
            self.inner.list_events_between(user_id, start, end).await
        }

        async fn get_event(&self, user_id: &str, event_id: &str) -> Result<Option<EventOccurrence>> {
            self.inner.get_event(user_id, event_id).await
        }

        async fn list_exclusions(&self, user_id: &str) -> Result<Vec<(String, NaiveDate)>> {
            let exclusions = self.inner.list_exclusions(user_id).await;
            if self.stall_once.swap(false, Ordering::SeqCst) {
                self.reached.notify_one();
                self.release.notified().await;
            }
            exclusions
        }

        async fn replace_events(&self, user_id: &str, events: &[EventOccurrence]) -> Result<()> {
            if self.fail_replace {
                return Err(anyhow::anyhow!("database is locked"));
            }
            self.inner.replace_events(user_id, events).await
        }

        async fn set_event_excluded(&self, user_id: &str, event_id: &str, excluded: bool) -> Result<bool> {
            self.inner.set_event_excluded(user_id, event_id, excluded).await
        }
    }

    #[tokio::test]
    async fn test_refresh_stores_expanded_events() {
        let fixture = setup_test().await;
        fixture
            .expenses
            .store_expense("alice", &expense("rent", date(2024, 1, 1), date(2024, 1, 5), Frequency::Daily))
            .await
            .unwrap();

        let result = fixture.service.refresh("alice").await.unwrap();

        assert_eq!(result, RefreshResult { events_generated: 5, exclusions_preserved: 0 });
        let stored = fixture
            .events
            .list_events_between("alice", date(2024, 1, 1), date(2024, 2, 1))
            .await
            .unwrap();
        assert_eq!(stored.len(), 5);
        assert!(stored.iter().all(|e| e.recurrence_id == stored[0].recurrence_id));
    }

    #[tokio::test]
    async fn test_lock_entries_released_after_refresh() {
        let fixture = setup_test().await;
        fixture.seed_january().await;

        fixture.service.refresh("alice").await.unwrap();
        fixture.service.refresh("mallory-1").await.unwrap();
        fixture.service.refresh("mallory-2").await.unwrap();

        assert!(fixture.locks.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_with_no_expenses_clears_events() {
        let fixture = setup_test().await;
        fixture
            .expenses
            .store_expense("alice", &expense("gym", date(2024, 1, 1), date(2024, 3, 1), Frequency::Monthly))
            .await
            .unwrap();
        fixture.service.refresh("alice").await.unwrap();

        fixture.expenses.delete_expense("alice", "gym").await.unwrap();
        let result = fixture.service.refresh("alice").await.unwrap();

        assert_eq!(result.events_generated, 0);
        let stored = fixture.events.list_events_in_window("alice", 2024, 2).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_preserves_exclusions() {
        let fixture = setup_test().await;
        fixture
            .expenses
            .store_expense("alice", &expense("gym", date(2024, 1, 15), date(2024, 3, 15), Frequency::Monthly))
            .await
            .unwrap();
        fixture.service.refresh("alice").await.unwrap();

        let february = fixture
            .events
            .list_events_between("alice", date(2024, 2, 1), date(2024, 3, 1))
            .await
            .unwrap();
        assert_eq!(february.len(), 1);
        fixture
            .events
            .set_event_excluded("alice", &february[0].id, true)
            .await
            .unwrap();

        let result = fixture.service.refresh("alice").await.unwrap();

        assert_eq!(result.exclusions_preserved, 1);
        let stored = fixture.events.list_events_in_window("alice", 2024, 2).await.unwrap();
        let excluded: Vec<NaiveDate> = stored.iter().filter(|e| e.excluded).map(|e| e.date).collect();
        assert_eq!(excluded, vec![date(2024, 2, 15)]);
        // Regenerated, so the old id is gone
        assert!(fixture.events.get_event("alice", &february[0].id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_replace_is_transaction_error_and_keeps_events() {
        let fixture = setup_test().await;
        fixture
            .expenses
            .store_expense("alice", &expense("rent", date(2024, 1, 1), date(2024, 1, 3), Frequency::Daily))
            .await
            .unwrap();
        fixture.service.refresh("alice").await.unwrap();

        let failing = fixture.service_with(Arc::new(ScriptedEvents::failing(fixture.events.clone())), "other");
        let result = failing.refresh("alice").await;

        assert!(matches!(result, Err(DomainError::Transaction(_))));
        let stored = fixture.events.list_events_in_window("alice", 2024, 1).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|e| e.id.starts_with("id-")));
        assert!(fixture.locks.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_stored_frequency_aborts_before_writing() {
        let fixture = setup_test().await;
        fixture
            .expenses
            .store_expense("alice", &expense("rent", date(2024, 1, 1), date(2024, 1, 3), Frequency::Daily))
            .await
            .unwrap();
        fixture.service.refresh("alice").await.unwrap();

        sqlx::query("UPDATE expenses SET frequency = 'hourly' WHERE id = 'rent'")
            .execute(fixture.db.pool())
            .await
            .unwrap();
        let result = fixture.service.refresh("alice").await;

        assert!(matches!(result, Err(DomainError::InvalidFrequency(_))));
        let stored = fixture.events.list_events_in_window("alice", 2024, 1).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_overlapping_refreshes_are_serialized_and_keep_exclusions() {
        let fixture = setup_file_backed().await;
        fixture.seed_january().await;
        fixture.service.refresh("alice").await.unwrap();

        let mid_month = fixture
            .events
            .list_events_between("alice", date(2024, 1, 15), date(2024, 1, 16))
            .await
            .unwrap();
        let rent_15th = mid_month.iter().find(|e| e.expense_id == "rent").unwrap();
        fixture
            .events
            .set_event_excluded("alice", &rent_15th.id, true)
            .await
            .unwrap();

        let scripted = Arc::new(ScriptedEvents::stalling(fixture.events.clone()));
        let (reached, release) = (scripted.reached.clone(), scripted.release.clone());
        let stalled = fixture.service_with(scripted, "first");
        let first = tokio::spawn(async move { stalled.refresh("alice").await });
        reached.notified().await;

        let plain = fixture.service_with(fixture.events.clone(), "second");
        let second = tokio::spawn(async move { plain.refresh("alice").await });
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!second.is_finished(), "second refresh ran while the first held the user");

        release.notify_one();
        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert_eq!(first.exclusions_preserved, 1);
        assert_eq!(second.exclusions_preserved, 1);

        let stored = fixture.events.list_events_in_window("alice", 2024, 1).await.unwrap();
        assert_eq!(stored.len(), 36);
        assert!(stored.iter().all(|e| e.id.starts_with("second-")));
        let recurrences: HashSet<&str> = stored.iter().map(|e| e.recurrence_id.as_str()).collect();
        assert_eq!(recurrences.len(), 2);
        let excluded: Vec<(&str, NaiveDate)> = stored
            .iter()
            .filter(|e| e.excluded)
            .map(|e| (e.expense_id.as_str(), e.date))
            .collect();
        assert_eq!(excluded, vec![("rent", date(2024, 1, 15))]);
        assert!(fixture.locks.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_exclude_during_refresh_is_not_silently_lost() {
        let fixture = setup_file_backed().await;
        fixture.seed_january().await;
        fixture.service.refresh("alice").await.unwrap();
        let before = fixture.events.list_events_in_window("alice", 2024, 1).await.unwrap();
        let target = before[1].id.clone();

        let scripted = Arc::new(ScriptedEvents::stalling(fixture.events.clone()));
        let (reached, release) = (scripted.reached.clone(), scripted.release.clone());
        let stalled = fixture.service_with(scripted, "next");
        let refresh = tokio::spawn(async move { stalled.refresh("alice").await });
        reached.notified().await;

        let events = fixture.event_service();
        let exclude = tokio::spawn(async move { events.set_event_excluded("alice", &target, true).await });
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!exclude.is_finished(), "exclude went through in the middle of a refresh");

        release.notify_one();
        refresh.await.unwrap().unwrap();

        // The occurrence was regenerated under a new id before the toggle ran
        let outcome = exclude.await.unwrap();
        assert!(matches!(outcome, Err(DomainError::NotFound(_))));
        let stored = fixture.events.list_events_in_window("alice", 2024, 1).await.unwrap();
        assert!(stored.iter().all(|e| !e.excluded));
        assert!(fixture.locks.is_empty());
    }

    #[tokio::test]
    async fn test_users_refresh_independently() {
        let fixture = setup_test().await;
        fixture
            .expenses
            .store_expense("alice", &expense("rent", date(2024, 1, 1), date(2024, 1, 2), Frequency::Daily))
            .await
            .unwrap();
        fixture
            .expenses
            .store_expense("bob", &expense("rent", date(2024, 1, 1), date(2024, 1, 4), Frequency::Daily))
            .await
            .unwrap();

        fixture.service.refresh("alice").await.unwrap();
        fixture.service.refresh("bob").await.unwrap();

        assert_eq!(fixture.events.list_events_in_window("alice", 2024, 1).await.unwrap().len(), 2);
        assert_eq!(fixture.events.list_events_in_window("bob", 2024, 1).await.unwrap().len(), 4);
    }
}
