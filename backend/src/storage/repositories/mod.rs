// Repository modules
pub mod account_repository;
pub mod event_repository;
pub mod expense_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use event_repository::EventRepository;
pub use expense_repository::ExpenseRepository;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Dates are stored as ISO `YYYY-MM-DD` text so range filters compare lexically
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("stored date '{}' is not YYYY-MM-DD", value))
}

pub(crate) fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).with_context(|| format!("stored amount '{}' is not a decimal", value))
}
