use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::parse_decimal;
use crate::domain::models::{Account, Debt};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AccountStorage;

/// Repository for account details and debts
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_debt(row: &SqliteRow) -> Result<Debt> {
        let balance: String = row.get("balance");

        Ok(Debt {
            id: row.get("id"),
            name: row.get("name"),
            balance: parse_decimal(&balance)?,
        })
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn get_account(&self, user_id: &str) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT name, checking_balance FROM accounts WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.map(|row| {
            let balance: String = row.get("checking_balance");
            Ok(Account {
                name: row.get("name"),
                checking_balance: parse_decimal(&balance)?,
            })
        })
        .transpose()
    }

    async fn upsert_account(&self, user_id: &str, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (user_id, name, checking_balance)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                name = excluded.name,
                checking_balance = excluded.checking_balance,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(user_id)
        .bind(&account.name)
        .bind(account.checking_balance.to_string())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_debts(&self, user_id: &str) -> Result<Vec<Debt>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, balance
            FROM debts
            WHERE user_id = ?
            ORDER BY ROWID ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        debug!("Loaded {} debt rows for user {}", rows.len(), user_id);
        rows.iter().map(Self::row_to_debt).collect()
    }

    async fn store_debt(&self, user_id: &str, debt: &Debt) -> Result<()> {
        sqlx::query("INSERT INTO debts (id, user_id, name, balance) VALUES (?, ?, ?, ?)")
            .bind(&debt.id)
            .bind(user_id)
            .bind(&debt.name)
            .bind(debt.balance.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_debt(&self, user_id: &str, debt_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM debts WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(debt_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
