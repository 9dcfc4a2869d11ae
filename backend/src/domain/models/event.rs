//! Domain model for a concrete dated occurrence of a recurring expense.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::frequency::Frequency;

#[derive(Debug, Clone, PartialEq)]
pub struct EventOccurrence {
    pub id: String,
    /// Shared by all occurrences produced from one expense in one expansion
    pub recurrence_id: String,
    /// Source expense; stable across refreshes unlike `recurrence_id`
    pub expense_id: String,
    pub summary: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub total: Decimal,
    pub excluded: bool,
}

impl EventOccurrence {
    /// Key used to carry the excluded flag over a refresh
    pub fn exclusion_key(&self) -> (String, NaiveDate) {
        (self.expense_id.clone(), self.date)
    }
}
