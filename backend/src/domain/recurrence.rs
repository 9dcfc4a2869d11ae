//! Recurrence expansion.
//!
//! Turns recurring expense definitions into the flat list of dated
//! occurrences that gets stored for a user. Expansion is pure apart from id
//! generation, which goes through the injected [`IdProvider`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::id_provider::IdProvider;
use crate::domain::models::{EventOccurrence, RecurringExpense};

#[derive(Clone)]
pub struct RecurrenceExpander {
    ids: Arc<dyn IdProvider>,
}

impl RecurrenceExpander {
    pub fn new(ids: Arc<dyn IdProvider>) -> Self {
        Self { ids }
    }

    /// Expand every expense into its occurrences.
    ///
    /// Output follows input order expense by expense; within one expense the
    /// occurrences are in ascending date order. An expense whose start date
    /// is after its end date contributes nothing.
    pub fn expand(&self, expenses: &[RecurringExpense]) -> DomainResult<Vec<EventOccurrence>> {
        let mut occurrences = Vec::new();

        for expense in expenses {
            let before = occurrences.len();
            self.expand_one(expense, &mut occurrences)?;
            debug!(
                "Expanded expense {} ({}) into {} occurrences",
                expense.id,
                expense.frequency,
                occurrences.len() - before
            );
        }

        Ok(occurrences)
    }

    fn expand_one(
        &self,
        expense: &RecurringExpense,
        occurrences: &mut Vec<EventOccurrence>,
    ) -> DomainResult<()> {
        if !expense.has_valid_range() {
            debug!(
                "Expense {} starts {} after it ends {}, skipping",
                expense.id, expense.start_date, expense.end_date
            );
            return Ok(());
        }

        let recurrence_id = self.ids.next_id();
        let mut index: u32 = 0;

        loop {
            let date = match expense.frequency.occurrence(expense.start_date, index) {
                Ok(date) => date,
                // Past the last representable date, so past end_date too
                Err(DomainError::InvalidDate(_)) => break,
                Err(e) => return Err(e),
            };
            if date > expense.end_date {
                break;
            }

            occurrences.push(EventOccurrence {
                id: self.ids.next_id(),
                recurrence_id: recurrence_id.clone(),
                expense_id: expense.id.clone(),
                summary: expense.summary.clone(),
                date,
                amount: expense.amount,
                frequency: expense.frequency,
                total: Decimal::ZERO,
                excluded: false,
            });

            index = index.checked_add(1).ok_or_else(|| {
                DomainError::InvalidDate(format!("expense {} has too many occurrences", expense.id))
            })?;
        }

        Ok(())
    }
}

/// Re-mark occurrences whose `(expense_id, date)` was excluded before a
/// refresh. Returns how many occurrences were marked.
pub fn apply_exclusions(
    occurrences: &mut [EventOccurrence],
    excluded: &HashSet<(String, NaiveDate)>,
) -> usize {
    if excluded.is_empty() {
        return 0;
    }

    let mut marked = 0;
    for occurrence in occurrences.iter_mut() {
        if excluded.contains(&occurrence.exclusion_key()) {
            occurrence.excluded = true;
            marked += 1;
        }
    }
    marked
}
