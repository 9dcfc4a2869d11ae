//! # Storage Module
//!
//! Handles persistence of recurring expenses and their materialized
//! occurrences.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! repositories in [`repositories`] implement them on top of a shared
//! [`DbConnection`] pool.
//!
//! ## Storage Layout
//!
//! - **expenses**: one row per recurring expense definition, keyed by user
//! - **events**: the occurrences produced by the last refresh, replaced
//!   wholesale inside a single transaction
//! - **accounts**, **debts**: the user's name, checking balance and
//!   outstanding debts shown next to the calendar
//!
//! Dates are stored as `YYYY-MM-DD` text and amounts as decimal text so that
//! no precision is lost between the API and the database.

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{AccountRepository, EventRepository, ExpenseRepository};
pub use traits::{AccountStorage, EventStorage, ExpenseStorage};
