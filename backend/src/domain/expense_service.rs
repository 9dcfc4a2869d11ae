//! Expense service domain logic for the expense calendar.
//!
//! Owns CRUD for recurring expense definitions and the validation rules that
//! apply on write. Occurrences are not touched here; they are regenerated by
//! the refresh service.
//!
//! ## Business Rules
//!
//! - Summaries are at most 255 characters
//! - Dates are ISO `YYYY-MM-DD` and the start is not after the end
//! - The frequency is one of daily, weekly, biweekly, monthly, yearly
//! - A new expense defaults to summary "-", amount 0, monthly, today..today

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::calendar_math::check_storable_year;
use crate::domain::clock::Clock;
use crate::domain::commands::expenses::{CreateExpenseCommand, ExpenseResult, UpdateExpenseCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::id_provider::IdProvider;
use crate::domain::models::expense::MAX_SUMMARY_LENGTH;
use crate::domain::models::{Frequency, RecurringExpense};
use crate::storage::ExpenseStorage;

const DEFAULT_SUMMARY: &str = "-";

/// Service for managing recurring expense definitions
#[derive(Clone)]
pub struct ExpenseService {
    storage: Arc<dyn ExpenseStorage>,
    ids: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    pub fn new(storage: Arc<dyn ExpenseStorage>, ids: Arc<dyn IdProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, ids, clock }
    }

    /// All expenses of a user in insertion order
    pub async fn list_expenses(&self, user_id: &str) -> DomainResult<Vec<RecurringExpense>> {
        self.storage
            .list_expenses(user_id)
            .await
            .map_err(DomainError::from_storage)
    }

    pub async fn get_expense(&self, user_id: &str, expense_id: &str) -> DomainResult<RecurringExpense> {
        self.storage
            .get_expense(user_id, expense_id)
            .await
            .map_err(DomainError::from_storage)?
            .ok_or_else(|| DomainError::NotFound(format!("Expense {}", expense_id)))
    }

    /// Create an expense, filling any missing field with its default
    pub async fn create_expense(&self, user_id: &str, command: CreateExpenseCommand) -> DomainResult<ExpenseResult> {
        info!("Creating expense for user {}: {:?}", user_id, command);

        let today = self.clock.today();
        let expense = RecurringExpense {
            id: RecurringExpense::generate_id(&self.ids.next_id()),
            summary: command.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            amount: command.amount.unwrap_or(Decimal::ZERO),
            start_date: match command.start_date {
                Some(date) => parse_date(&date)?,
                None => today,
            },
            end_date: match command.end_date {
                Some(date) => parse_date(&date)?,
                None => today,
            },
            frequency: match command.frequency {
                Some(frequency) => Frequency::from_str(&frequency)?,
                None => Frequency::Monthly,
            },
        };
        validate(&expense)?;

        self.storage
            .store_expense(user_id, &expense)
            .await
            .map_err(DomainError::from_storage)?;

        info!("Created expense {} for user {}", expense.id, user_id);
        Ok(ExpenseResult {
            success_message: format!("Expense '{}' created", expense.summary),
            expense,
        })
    }

    /// Replace the editable fields of an existing expense
    pub async fn update_expense(&self, user_id: &str, command: UpdateExpenseCommand) -> DomainResult<ExpenseResult> {
        info!("Updating expense {} for user {}", command.expense_id, user_id);

        let expense = RecurringExpense {
            id: command.expense_id,
            summary: command.summary,
            amount: command.amount,
            start_date: parse_date(&command.start_date)?,
            end_date: parse_date(&command.end_date)?,
            frequency: Frequency::from_str(&command.frequency)?,
        };
        validate(&expense)?;

        let updated = self
            .storage
            .update_expense(user_id, &expense)
            .await
            .map_err(DomainError::from_storage)?;
        if !updated {
            warn!("Expense {} not found for user {}", expense.id, user_id);
            return Err(DomainError::NotFound(format!("Expense {}", expense.id)));
        }

        Ok(ExpenseResult {
            success_message: format!("Expense '{}' updated", expense.summary),
            expense,
        })
    }

    /// Delete an expense. Its occurrences disappear on the next refresh.
    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> DomainResult<String> {
        info!("Deleting expense {} for user {}", expense_id, user_id);

        let deleted = self
            .storage
            .delete_expense(user_id, expense_id)
            .await
            .map_err(DomainError::from_storage)?;
        if !deleted {
            return Err(DomainError::NotFound(format!("Expense {}", expense_id)));
        }

        Ok(format!("Expense {} deleted", expense_id))
    }
}

fn validate(expense: &RecurringExpense) -> DomainResult<()> {
    let length = expense.summary.chars().count();
    if length > MAX_SUMMARY_LENGTH {
        return Err(DomainError::Validation(format!(
            "Summary cannot exceed {} characters (got {})",
            MAX_SUMMARY_LENGTH, length
        )));
    }
    if !expense.has_valid_range() {
        return Err(DomainError::Validation(format!(
            "Start date {} is after end date {}",
            expense.start_date, expense.end_date
        )));
    }
    Ok(())
}

fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", value)))?;
    check_storable_year(date.year())?;
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::id_provider::SequentialIdProvider;
    use crate::storage::{DbConnection, ExpenseRepository};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup_test() -> ExpenseService {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        ExpenseService::new(
            Arc::new(ExpenseRepository::new(db)),
            Arc::new(SequentialIdProvider::new("id")),
            Arc::new(FixedClock(date(2024, 5, 17))),
        )
    }

    fn update(expense_id: &str) -> UpdateExpenseCommand {
        UpdateExpenseCommand {
            expense_id: expense_id.to_string(),
            summary: "Internet".to_string(),
            amount: Decimal::new(5990, 2),
            start_date: "2024-01-10".to_string(),
            end_date: "2024-12-10".to_string(),
            frequency: "monthly".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_expense_uses_defaults() {
        let service = setup_test().await;

        let result = service
            .create_expense("alice", CreateExpenseCommand::default())
            .await
            .expect("Failed to create expense");

        let expense = result.expense;
        assert_eq!(expense.id, "expense::id-1");
        assert_eq!(expense.summary, "-");
        assert_eq!(expense.amount, Decimal::ZERO);
        assert_eq!(expense.frequency, Frequency::Monthly);
        assert_eq!(expense.start_date, date(2024, 5, 17));
        assert_eq!(expense.end_date, date(2024, 5, 17));

        let listed = service.list_expenses("alice").await.unwrap();
        assert_eq!(listed, vec![expense]);
    }

    #[tokio::test]
    async fn test_create_expense_with_values() {
        let service = setup_test().await;
        let command = CreateExpenseCommand {
            summary: Some("Rent".to_string()),
            amount: Some(Decimal::new(125050, 2)),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-12-01".to_string()),
            frequency: Some("Bi-Weekly".to_string()),
        };

        let expense = service.create_expense("alice", command).await.unwrap().expense;

        assert_eq!(expense.amount.to_string(), "1250.50");
        assert_eq!(expense.frequency, Frequency::Biweekly);
        assert_eq!(expense.end_date, date(2024, 12, 1));
    }

    #[tokio::test]
    async fn test_create_expense_rejects_bad_input() {
        let service = setup_test().await;

        let bad_frequency = CreateExpenseCommand {
            frequency: Some("hourly".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.create_expense("alice", bad_frequency).await,
            Err(DomainError::InvalidFrequency(_))
        ));

        let bad_date = CreateExpenseCommand {
            start_date: Some("2024-02-30".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.create_expense("alice", bad_date).await,
            Err(DomainError::InvalidDate(_))
        ));

        assert!(service.list_expenses("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_years_that_do_not_store_as_text() {
        let service = setup_test().await;

        for (start, end) in [("2024-01-01", "+10000-01-01"), ("-0001-06-01", "2024-01-01")] {
            let command = CreateExpenseCommand {
                start_date: Some(start.to_string()),
                end_date: Some(end.to_string()),
                ..Default::default()
            };
            assert!(matches!(
                service.create_expense("alice", command).await,
                Err(DomainError::InvalidDate(_))
            ));
        }

        let last_year = CreateExpenseCommand {
            start_date: Some("9999-01-01".to_string()),
            end_date: Some("9999-12-31".to_string()),
            ..Default::default()
        };
        assert!(service.create_expense("alice", last_year).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_start_after_default_end() {
        let service = setup_test().await;
        // End defaults to today, which is before this start
        let command = CreateExpenseCommand {
            start_date: Some("2024-06-01".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            service.create_expense("alice", command).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_expense() {
        let service = setup_test().await;
        let created = service
            .create_expense("alice", CreateExpenseCommand::default())
            .await
            .unwrap()
            .expense;

        let result = service.update_expense("alice", update(&created.id)).await.unwrap();

        assert_eq!(result.expense.summary, "Internet");
        let stored = service.get_expense("alice", &created.id).await.unwrap();
        assert_eq!(stored, result.expense);
        assert_eq!(stored.start_date, date(2024, 1, 10));
    }

    #[tokio::test]
    async fn test_update_validation() {
        let service = setup_test().await;
        let id = service
            .create_expense("alice", CreateExpenseCommand::default())
            .await
            .unwrap()
            .expense
            .id;

        let mut too_long = update(&id);
        too_long.summary = "x".repeat(MAX_SUMMARY_LENGTH + 1);
        assert!(matches!(
            service.update_expense("alice", too_long).await,
            Err(DomainError::Validation(_))
        ));

        let mut exactly_max = update(&id);
        exactly_max.summary = "x".repeat(MAX_SUMMARY_LENGTH);
        assert!(service.update_expense("alice", exactly_max).await.is_ok());

        let mut reversed = update(&id);
        reversed.start_date = "2025-01-01".to_string();
        assert!(matches!(
            service.update_expense("alice", reversed).await,
            Err(DomainError::Validation(_))
        ));

        let mut unknown = update(&id);
        unknown.frequency = "quarterly".to_string();
        assert!(matches!(
            service.update_expense("alice", unknown).await,
            Err(DomainError::InvalidFrequency(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_expense_is_not_found() {
        let service = setup_test().await;

        let result = service.update_expense("alice", update("expense::missing")).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let service = setup_test().await;
        let id = service
            .create_expense("alice", CreateExpenseCommand::default())
            .await
            .unwrap()
            .expense
            .id;

        assert!(service.delete_expense("bob", &id).await.is_err());
        service.delete_expense("alice", &id).await.unwrap();

        assert!(matches!(
            service.get_expense("alice", &id).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_expense("alice", &id).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
