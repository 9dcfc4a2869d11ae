//! Domain model for how often a recurring expense repeats.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::domain::calendar_math;
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// Tag used for storage and the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Date of the `index`-th occurrence (0 = `start`).
    ///
    /// Month and year steps are measured from `start` so that a clamped
    /// occurrence (Jan 31 -> Feb 29) does not drag later ones to the 29th.
    pub fn occurrence(&self, start: NaiveDate, index: u32) -> DomainResult<NaiveDate> {
        match self {
            Frequency::Daily => calendar_math::add_days(start, index as u64),
            Frequency::Weekly => calendar_math::add_days(start, 7 * index as u64),
            Frequency::Biweekly => calendar_math::add_days(start, 14 * index as u64),
            Frequency::Monthly => calendar_math::add_months(start, index),
            Frequency::Yearly => calendar_math::add_years(start, index),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" | "bi-weekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(DomainError::InvalidFrequency(format!(
                "'{}' is not one of daily, weekly, biweekly, monthly, yearly",
                s
            ))),
        }
    }
}
