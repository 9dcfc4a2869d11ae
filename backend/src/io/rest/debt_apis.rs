//! # REST API for Debts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, post},
    Router,
};
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::AccountMapper;
use crate::AppState;
use shared::{CreateDebtRequest, DebtResponse, DeleteDebtResponse};

/// Create a router for debt related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_debt))
        .route("/:debt_id", delete(delete_debt))
}

pub async fn create_debt(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateDebtRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/debts - request: {:?}", user_id, request);

    let command = AccountMapper::to_create_debt_command(request);
    match state.account_service.add_debt(&user_id, command).await {
        Ok(debt) => {
            let response = DebtResponse {
                success_message: format!("Debt '{}' added", debt.name),
                debt: AccountMapper::debt_to_dto(debt),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("create debt", e),
    }
}

pub async fn delete_debt(
    State(state): State<AppState>,
    Path((user_id, debt_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/users/{}/debts/{}", user_id, debt_id);

    match state.account_service.delete_debt(&user_id, &debt_id).await {
        Ok(success_message) => (StatusCode::OK, Json(DeleteDebtResponse { success_message })).into_response(),
        Err(e) => error_response("delete debt", e),
    }
}
