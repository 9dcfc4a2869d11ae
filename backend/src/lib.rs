//! # Expense Calendar Backend
//!
//! Contains all non-UI logic for the expense calendar.
//!
//! The backend brings together:
//! - **Domain**: recurrence expansion, calendar grid building and the services
//!   that orchestrate them
//! - **Storage**: SQLite persistence of expenses, generated occurrences,
//!   account details and debts
//! - **IO**: the REST API exposing both to a frontend
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AccountService, CalendarService, Clock, EventService, ExpenseService, IdProvider, RecurrenceExpander, RefreshService,
    SystemClock, UserLocks, UuidIdProvider,
};
use crate::storage::{AccountRepository, DbConnection, EventRepository, ExpenseRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub expense_service: ExpenseService,
    pub refresh_service: RefreshService,
    pub event_service: EventService,
}

impl AppState {
    /// Wire every service onto one database connection
    pub fn new(db: DbConnection, ids: Arc<dyn IdProvider>, clock: Arc<dyn Clock>) -> Self {
        let expenses = Arc::new(ExpenseRepository::new(db.clone()));
        let events = Arc::new(EventRepository::new(db.clone()));
        let accounts = Arc::new(AccountRepository::new(db));
        let locks = UserLocks::new();

        Self {
            account_service: AccountService::new(accounts, expenses.clone(), ids.clone()),
            expense_service: ExpenseService::new(expenses.clone(), ids.clone(), clock.clone()),
            refresh_service: RefreshService::new(expenses, events.clone(), RecurrenceExpander::new(ids), locks.clone()),
            event_service: EventService::new(events, CalendarService::new(clock), locks),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url, config.max_connections).await?;

    info!("Setting up domain model");
    Ok(AppState::new(db, Arc::new(UuidIdProvider), Arc::new(SystemClock)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    // CORS setup to allow frontend to make requests
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin '{}'", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::api_routes())
        .layer(cors)
        .with_state(app_state))
}
