use crate::domain::commands::expenses::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::models::RecurringExpense as DomainExpense;
use shared::{CreateExpenseRequest, RecurringExpense as SharedExpense, UpdateExpenseRequest};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: domain.id,
            summary: domain.summary,
            amount: domain.amount,
            start_date: domain.start_date.format("%Y-%m-%d").to_string(),
            end_date: domain.end_date.format("%Y-%m-%d").to_string(),
            frequency: domain.frequency.as_str().to_string(),
        }
    }

    pub fn to_create_command(request: CreateExpenseRequest) -> CreateExpenseCommand {
        CreateExpenseCommand {
            summary: request.summary,
            amount: request.amount,
            start_date: request.start_date,
            end_date: request.end_date,
            frequency: request.frequency,
        }
    }

    pub fn to_update_command(expense_id: String, request: UpdateExpenseRequest) -> UpdateExpenseCommand {
        UpdateExpenseCommand {
            expense_id,
            summary: request.summary,
            amount: request.amount,
            start_date: request.start_date,
            end_date: request.end_date,
            frequency: request.frequency,
        }
    }
}
