//! # Domain Module
//!
//! Contains all business logic for the expense calendar.
//!
//! Recurring expenses are expanded into dated occurrences, the occurrences are
//! stored per user, and the calendar view lays them out on a three-month grid
//! of Sunday-anchored weeks. Nothing here depends on HTTP; storage is reached
//! only through the traits in `crate::storage`.
//!
//! ## Module Organization
//!
//! - **calendar_math**: month/year arithmetic with explicit clamp rules
//! - **calendar**: grid builder, window resegmentation and event overlay
//! - **recurrence**: expansion of expenses into occurrences
//! - **expense_service**: CRUD and validation for expense definitions
//! - **refresh_service**: per-user regeneration of stored occurrences
//! - **event_service**: calendar window loading and the exclude toggle
//! - **account_service**: account details, debts and the per-user summary
//! - **user_locks**: per-user lock shared by refresh and the exclude toggle
//!
//! ## Business Rules
//!
//! - An expense with a start date after its end date produces no occurrences
//! - Monthly and yearly steps clamp to the last day of shorter months
//! - Excluded occurrences stay visible but do not count toward day totals
//! - An excluded occurrence stays excluded across refreshes while its
//!   expense still produces that date

pub mod account_service;
pub mod calendar;
pub mod calendar_math;
pub mod clock;
pub mod commands;
pub mod error;
pub mod event_service;
pub mod expense_service;
pub mod id_provider;
pub mod models;
pub mod recurrence;
pub mod refresh_service;
pub mod user_locks;

pub use account_service::AccountService;
pub use calendar::{CalendarService, CalendarWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use event_service::EventService;
pub use expense_service::ExpenseService;
pub use id_provider::{IdProvider, SequentialIdProvider, UuidIdProvider};
pub use recurrence::RecurrenceExpander;
pub use refresh_service::RefreshService;
pub use user_locks::UserLocks;
