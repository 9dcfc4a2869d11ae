//! Account details and debts of a user.
//!
//! The summary bundles the account, the debts and the recurring expenses so
//! a client can render everything beside the calendar from one request.
//!
//! ## Business Rules
//!
//! - Account and debt names are at most 255 characters
//! - A user with no saved account reads as an empty name and zero balance
//! - A new debt defaults to name "-" and balance 0

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::accounts::{AccountSummary, CreateDebtCommand, UpdateAccountCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::id_provider::IdProvider;
use crate::domain::models::account::MAX_NAME_LENGTH;
use crate::domain::models::{Account, Debt};
use crate::storage::{AccountStorage, ExpenseStorage};

const DEFAULT_DEBT_NAME: &str = "-";

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStorage>,
    expenses: Arc<dyn ExpenseStorage>,
    ids: Arc<dyn IdProvider>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStorage>, expenses: Arc<dyn ExpenseStorage>, ids: Arc<dyn IdProvider>) -> Self {
        Self { accounts, expenses, ids }
    }

    /// Account details, debts and expenses of a user
    pub async fn get_summary(&self, user_id: &str) -> DomainResult<AccountSummary> {
        let account = self
            .accounts
            .get_account(user_id)
            .await
            .map_err(DomainError::from_storage)?
            .unwrap_or_default();
        let debts = self
            .accounts
            .list_debts(user_id)
            .await
            .map_err(DomainError::from_storage)?;
        let expenses = self
            .expenses
            .list_expenses(user_id)
            .await
            .map_err(DomainError::from_storage)?;

        info!(
            "Loaded account summary for user {}: {} debts, {} expenses",
            user_id,
            debts.len(),
            expenses.len()
        );
        Ok(AccountSummary {
            account,
            debts,
            expenses,
        })
    }

    pub async fn update_account(&self, user_id: &str, command: UpdateAccountCommand) -> DomainResult<Account> {
        info!("Updating account for user {}", user_id);

        let account = Account {
            name: command.name,
            checking_balance: command.checking_balance,
        };
        validate_name("Account name", &account.name)?;

        self.accounts
            .upsert_account(user_id, &account)
            .await
            .map_err(DomainError::from_storage)?;
        Ok(account)
    }

    pub async fn add_debt(&self, user_id: &str, command: CreateDebtCommand) -> DomainResult<Debt> {
        let debt = Debt {
            id: Debt::generate_id(&self.ids.next_id()),
            name: command.name.unwrap_or_else(|| DEFAULT_DEBT_NAME.to_string()),
            balance: command.balance.unwrap_or(Decimal::ZERO),
        };
        validate_name("Debt name", &debt.name)?;

        self.accounts
            .store_debt(user_id, &debt)
            .await
            .map_err(DomainError::from_storage)?;

        info!("Added debt {} for user {}", debt.id, user_id);
        Ok(debt)
    }

    pub async fn delete_debt(&self, user_id: &str, debt_id: &str) -> DomainResult<String> {
        let deleted = self
            .accounts
            .delete_debt(user_id, debt_id)
            .await
            .map_err(DomainError::from_storage)?;
        if !deleted {
            warn!("Debt {} not found for user {}", debt_id, user_id);
            return Err(DomainError::NotFound(format!("Debt {}", debt_id)));
        }

        Ok(format!("Debt {} deleted", debt_id))
    }
}

fn validate_name(field: &str, name: &str) -> DomainResult<()> {
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(DomainError::Validation(format!(
            "{} cannot exceed {} characters (got {})",
            field, MAX_NAME_LENGTH, length
        )));
    }
    Ok(())
}
