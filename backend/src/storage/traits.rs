//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::{Account, Debt, EventOccurrence, RecurringExpense};

/// Trait defining the interface for recurring expense storage operations
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense for a user
    async fn store_expense(&self, user_id: &str, expense: &RecurringExpense) -> Result<()>;

    /// Retrieve a specific expense by ID
    async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<RecurringExpense>>;

    /// List all expenses of a user in insertion order
    async fn list_expenses(&self, user_id: &str) -> Result<Vec<RecurringExpense>>;

    /// Update an existing expense
    /// Returns true if the expense was found and updated
    async fn update_expense(&self, user_id: &str, expense: &RecurringExpense) -> Result<bool>;

    /// Delete an expense
    /// Returns true if the expense was found and deleted
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;
}

/// Trait defining the interface for occurrence storage operations
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// List occurrences in the three-month window centred on the given month,
    /// ordered by date
    async fn list_events_in_window(&self, user_id: &str, center_year: i32, center_month: u32) -> Result<Vec<EventOccurrence>>;

    /// List occurrences with `start <= date < end`, ordered by date
    async fn list_events_between(&self, user_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<EventOccurrence>>;

    /// Retrieve a specific occurrence by ID
    async fn get_event(&self, user_id: &str, event_id: &str) -> Result<Option<EventOccurrence>>;

    /// `(expense_id, date)` of every occurrence currently marked excluded
    async fn list_exclusions(&self, user_id: &str) -> Result<Vec<(String, NaiveDate)>>;

    /// Replace every stored occurrence of a user with `events` atomically.
    /// On failure the previous occurrences are left untouched.
    async fn replace_events(&self, user_id: &str, events: &[EventOccurrence]) -> Result<()>;

    /// Set the excluded flag of one occurrence
    /// Returns true if the occurrence was found
    async fn set_event_excluded(&self, user_id: &str, event_id: &str, excluded: bool) -> Result<bool>;
}

/// Trait defining the interface for account and debt storage operations
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Retrieve the account details of a user, if any were saved
    async fn get_account(&self, user_id: &str) -> Result<Option<Account>>;

    /// Insert or replace the account details of a user
    async fn upsert_account(&self, user_id: &str, account: &Account) -> Result<()>;

    /// List all debts of a user in insertion order
    async fn list_debts(&self, user_id: &str) -> Result<Vec<Debt>>;

    /// Store a new debt for a user
    async fn store_debt(&self, user_id: &str, debt: &Debt) -> Result<()>;

    /// Delete a debt
    /// Returns true if the debt was found and deleted
    async fn delete_debt(&self, user_id: &str, debt_id: &str) -> Result<bool>;
}
