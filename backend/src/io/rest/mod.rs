//! # REST API Interface Layer
//!
//! Axum routers for every resource, plus the shared translation of domain
//! errors into status codes and `{ "error": ... }` bodies.

pub mod account_apis;
pub mod calendar_apis;
pub mod debt_apis;
pub mod event_apis;
pub mod expense_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::AppState;
use shared::ErrorResponse;

/// All API routes, relative to `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users/:user_id/expenses", expense_apis::router())
        .nest("/users/:user_id/calendar", calendar_apis::router())
        .nest("/users/:user_id/events", event_apis::router())
        .nest("/users/:user_id/account", account_apis::router())
        .nest("/users/:user_id/debts", debt_apis::router())
}

/// HTTP status for a domain error
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidDate(_) | DomainError::InvalidFrequency(_) | DomainError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Transaction(_) | DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed operation and turn the error into a JSON response
pub fn error_response(operation: &str, err: DomainError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Failed to {}: {:#}", operation, err);
    } else {
        warn!("Rejected {}: {}", operation, err);
    }

    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}
