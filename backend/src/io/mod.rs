//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Handlers translate the JSON DTOs of the `shared` crate into domain
//! commands, call the services held in [`crate::AppState`], and translate
//! results and [`crate::domain::DomainError`]s back into HTTP responses.
//!
//! ## Supported Operations
//!
//! - **/api/users/:user_id/expenses**: list, add, update and delete expenses
//! - **/api/users/:user_id/calendar**: refresh occurrences, three-month view
//! - **/api/users/:user_id/events**: occurrence lookup and exclude toggle

pub mod rest;

pub use rest::*;
