//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod expenses {
    use crate::domain::models::RecurringExpense;
    use rust_decimal::Decimal;

    /// Input for creating a new recurring expense. Missing fields fall back
    /// to the service defaults.
    #[derive(Debug, Clone, Default)]
    pub struct CreateExpenseCommand {
        pub summary: Option<String>,
        pub amount: Option<Decimal>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub frequency: Option<String>,
    }

    /// Input for replacing the editable fields of an expense.
    #[derive(Debug, Clone)]
    pub struct UpdateExpenseCommand {
        pub expense_id: String,
        pub summary: String,
        pub amount: Decimal,
        pub start_date: String,
        pub end_date: String,
        pub frequency: String,
    }

    /// Result of creating or updating an expense.
    #[derive(Debug, Clone)]
    pub struct ExpenseResult {
        pub expense: RecurringExpense,
        pub success_message: String,
    }
}

pub mod calendar {
    use crate::domain::calendar::CalendarWindow;

    /// Query for the three-month calendar window around a month.
    #[derive(Debug, Clone, Copy)]
    pub struct CalendarWindowQuery {
        pub year: i32,
        /// 0 and 13 roll over into the neighbouring year
        pub month: i32,
    }

    /// Outcome of regenerating a user's occurrences.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RefreshResult {
        pub events_generated: usize,
        pub exclusions_preserved: usize,
    }

    /// Calendar window together with the display name of its month.
    #[derive(Debug, Clone)]
    pub struct CalendarWindowResult {
        pub window: CalendarWindow,
        pub month_name: &'static str,
    }
}

pub mod accounts {
    use crate::domain::models::{Account, Debt, RecurringExpense};
    use rust_decimal::Decimal;

    /// Input for replacing a user's account details.
    #[derive(Debug, Clone)]
    pub struct UpdateAccountCommand {
        pub name: String,
        pub checking_balance: Decimal,
    }

    /// Input for recording a debt. Missing fields fall back to defaults.
    #[derive(Debug, Clone, Default)]
    pub struct CreateDebtCommand {
        pub name: Option<String>,
        pub balance: Option<Decimal>,
    }

    /// Everything shown beside the calendar for one user.
    #[derive(Debug, Clone)]
    pub struct AccountSummary {
        pub account: Account,
        pub debts: Vec<Debt>,
        pub expenses: Vec<RecurringExpense>,
    }
}
