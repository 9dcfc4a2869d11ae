use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::{format_date, parse_date, parse_decimal};
use crate::domain::models::{Frequency, RecurringExpense};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ExpenseStorage;

/// Repository for recurring expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_expense(row: &SqliteRow) -> Result<RecurringExpense> {
        let frequency: String = row.get("frequency");
        let start_date: String = row.get("start_date");
        let end_date: String = row.get("end_date");
        let amount: String = row.get("amount");

        Ok(RecurringExpense {
            id: row.get("id"),
            summary: row.get("summary"),
            amount: parse_decimal(&amount)?,
            start_date: parse_date(&start_date)?,
            end_date: parse_date(&end_date)?,
            // An unknown tag surfaces as DomainError::InvalidFrequency
            frequency: frequency.parse::<Frequency>()?,
        })
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, user_id: &str, expense: &RecurringExpense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, summary, amount, start_date, end_date, frequency)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(user_id)
        .bind(&expense.summary)
        .bind(expense.amount.to_string())
        .bind(format_date(expense.start_date))
        .bind(format_date(expense.end_date))
        .bind(expense.frequency.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<RecurringExpense>> {
        let row = sqlx::query(
            r#"
            SELECT id, summary, amount, start_date, end_date, frequency
            FROM expenses
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(expense_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_expense).transpose()
    }

    async fn list_expenses(&self, user_id: &str) -> Result<Vec<RecurringExpense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, summary, amount, start_date, end_date, frequency
            FROM expenses
            WHERE user_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        debug!("Loaded {} expense rows for user {}", rows.len(), user_id);
        rows.iter().map(Self::row_to_expense).collect()
    }

    async fn update_expense(&self, user_id: &str, expense: &RecurringExpense) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET summary = ?, amount = ?, start_date = ?, end_date = ?, frequency = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&expense.summary)
        .bind(expense.amount.to_string())
        .bind(format_date(expense.start_date))
        .bind(format_date(expense.end_date))
        .bind(expense.frequency.as_str())
        .bind(user_id)
        .bind(&expense.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(expense_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
