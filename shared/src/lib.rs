use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recurring expense as exposed over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: String,
    /// Short label shown on the calendar (max 255 characters)
    pub summary: String,
    /// Amount charged on every occurrence
    pub amount: Decimal,
    /// First occurrence date (YYYY-MM-DD)
    pub start_date: String,
    /// Last possible occurrence date, inclusive (YYYY-MM-DD)
    pub end_date: String,
    /// One of: daily, weekly, biweekly, monthly, yearly
    pub frequency: String,
}

/// A single dated occurrence generated from a recurring expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOccurrence {
    pub id: String,
    /// Shared by every occurrence generated from the same expense in one refresh
    pub recurrence_id: String,
    /// ID of the expense this occurrence was generated from
    pub expense_id: String,
    pub summary: String,
    /// Occurrence date (YYYY-MM-DD)
    pub date: String,
    pub amount: Decimal,
    pub frequency: String,
    pub total: Decimal,
    /// Skipped by the user without deleting the recurrence
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<RecurringExpense>,
}

/// Request to add an expense. Every field is optional; missing fields get
/// placeholder values so the row can be edited afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub summary: Option<String>,
    pub amount: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub summary: String,
    pub amount: Decimal,
    pub start_date: String,
    pub end_date: String,
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub expense: RecurringExpense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub success_message: String,
}

/// Result of regenerating a user's occurrences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshCalendarResponse {
    pub events_generated: usize,
    /// Occurrences that kept their excluded flag from before the refresh
    pub exclusions_preserved: usize,
    pub success_message: String,
}

/// Query parameters for the calendar window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWindowQuery {
    pub year: i32,
    pub month: i32,
}

/// One cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Day of month
    pub date: u32,
    pub month: u32,
    pub year: i32,
    /// Full English day name, e.g. "Sunday"
    pub day_of_week: String,
    pub is_today: bool,
    pub is_today_or_later: bool,
    pub events: Vec<EventOccurrence>,
    /// Sum of the amounts of the non-excluded events on this day
    pub total: Decimal,
}

/// Three-month calendar view centred on `year`/`month`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWindowResponse {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub weeks: Vec<Vec<CalendarDay>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEventExcludedRequest {
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: EventOccurrence,
}

/// Display name and checking balance of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub checking_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub name: String,
    /// Outstanding amount
    pub balance: Decimal,
}

/// Account details, debts and recurring expenses of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummaryResponse {
    pub account: Account,
    pub debts: Vec<Debt>,
    pub expenses: Vec<RecurringExpense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: String,
    pub checking_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account: Account,
    pub success_message: String,
}

/// Request to record a debt. Missing fields get placeholder values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDebtRequest {
    pub name: Option<String>,
    pub balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtResponse {
    pub debt: Debt,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDebtResponse {
    pub success_message: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
