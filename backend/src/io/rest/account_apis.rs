//! # REST API for Account Details
//!
//! The per-user summary (account, debts, expenses) and editing of the
//! account's name and checking balance.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::AccountMapper;
use crate::AppState;
use shared::{AccountResponse, UpdateAccountRequest};

/// Create a router for account related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_summary).put(update_account))
}

/// Account details, debts and expenses of the user in one response
pub async fn get_summary(State(state): State<AppState>, Path(user_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/users/{}/account", user_id);

    match state.account_service.get_summary(&user_id).await {
        Ok(summary) => (StatusCode::OK, Json(AccountMapper::summary_to_dto(summary))).into_response(),
        Err(e) => error_response("get account summary", e),
    }
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    info!("PUT /api/users/{}/account - request: {:?}", user_id, request);

    let command = AccountMapper::to_update_command(request);
    match state.account_service.update_account(&user_id, command).await {
        Ok(account) => {
            let response = AccountResponse {
                account: AccountMapper::to_dto(account),
                success_message: "Account updated".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update account", e),
    }
}
