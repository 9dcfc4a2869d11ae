//! Domain models for a user's account details and outstanding debts.

use rust_decimal::Decimal;

/// Longest account or debt name accepted on write
pub const MAX_NAME_LENGTH: usize = 255;

/// Display name and checking balance of a user.
///
/// A user who never saved account details reads as the default: an empty
/// name and a zero balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub name: String,
    pub checking_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: String,
    pub name: String,
    /// Outstanding amount
    pub balance: Decimal,
}

impl Debt {
    /// Generate a debt ID from a unique suffix
    pub fn generate_id(unique: &str) -> String {
        format!("debt::{}", unique)
    }
}
