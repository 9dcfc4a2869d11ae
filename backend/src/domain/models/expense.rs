//! Domain model for a recurring expense definition.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::frequency::Frequency;

/// Longest summary accepted on write
pub const MAX_SUMMARY_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct RecurringExpense {
    pub id: String,
    pub summary: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    /// Inclusive; every recurrence has a concrete end
    pub end_date: NaiveDate,
    pub frequency: Frequency,
}

impl RecurringExpense {
    /// Generate an expense ID from a unique suffix
    pub fn generate_id(unique: &str) -> String {
        format!("expense::{}", unique)
    }

    /// Whether the date range can produce any occurrence at all
    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }
}
