pub mod account;
pub mod day_cell;
pub mod event;
pub mod expense;
pub mod frequency;

pub use account::{Account, Debt};
pub use day_cell::DayCell;
pub use event::EventOccurrence;
pub use expense::RecurringExpense;
pub use frequency::Frequency;
