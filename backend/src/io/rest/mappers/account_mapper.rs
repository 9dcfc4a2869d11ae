use crate::domain::commands::accounts::{AccountSummary, CreateDebtCommand, UpdateAccountCommand};
use crate::domain::models::{Account as DomainAccount, Debt as DomainDebt};
use crate::io::rest::mappers::ExpenseMapper;
use shared::{
    Account as SharedAccount, AccountSummaryResponse, CreateDebtRequest, Debt as SharedDebt, UpdateAccountRequest,
};

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: DomainAccount) -> SharedAccount {
        SharedAccount {
            name: domain.name,
            checking_balance: domain.checking_balance,
        }
    }

    pub fn debt_to_dto(domain: DomainDebt) -> SharedDebt {
        SharedDebt {
            id: domain.id,
            name: domain.name,
            balance: domain.balance,
        }
    }

    pub fn summary_to_dto(summary: AccountSummary) -> AccountSummaryResponse {
        AccountSummaryResponse {
            account: Self::to_dto(summary.account),
            debts: summary.debts.into_iter().map(Self::debt_to_dto).collect(),
            expenses: summary.expenses.into_iter().map(ExpenseMapper::to_dto).collect(),
        }
    }

    pub fn to_update_command(request: UpdateAccountRequest) -> UpdateAccountCommand {
        UpdateAccountCommand {
            name: request.name,
            checking_balance: request.checking_balance,
        }
    }

    pub fn to_create_debt_command(request: CreateDebtRequest) -> CreateDebtCommand {
        CreateDebtCommand {
            name: request.name,
            balance: request.balance,
        }
    }
}
