//! # REST API for Recurring Expenses
//!
//! Endpoints for listing, adding, editing and deleting a user's expenses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::ExpenseMapper;
use crate::AppState;
use shared::{
    CreateExpenseRequest, DeleteExpenseResponse, ExpenseListResponse, ExpenseResponse, UpdateExpenseRequest,
};

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:expense_id", put(update_expense).delete(delete_expense))
}

/// List every expense of the user
pub async fn list_expenses(State(state): State<AppState>, Path(user_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/users/{}/expenses", user_id);

    match state.expense_service.list_expenses(&user_id).await {
        Ok(expenses) => {
            let response = ExpenseListResponse {
                expenses: expenses.into_iter().map(ExpenseMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list expenses", e),
    }
}

/// Add an expense; omitted fields get placeholder values
pub async fn create_expense(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/expenses - request: {:?}", user_id, request);

    let command = ExpenseMapper::to_create_command(request);
    match state.expense_service.create_expense(&user_id, command).await {
        Ok(result) => {
            let response = ExpenseResponse {
                expense: ExpenseMapper::to_dto(result.expense),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("create expense", e),
    }
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path((user_id, expense_id)): Path<(String, String)>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/users/{}/expenses/{} - request: {:?}", user_id, expense_id, request);

    let command = ExpenseMapper::to_update_command(expense_id, request);
    match state.expense_service.update_expense(&user_id, command).await {
        Ok(result) => {
            let response = ExpenseResponse {
                expense: ExpenseMapper::to_dto(result.expense),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update expense", e),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path((user_id, expense_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/users/{}/expenses/{}", user_id, expense_id);

    match state.expense_service.delete_expense(&user_id, &expense_id).await {
        Ok(success_message) => (StatusCode::OK, Json(DeleteExpenseResponse { success_message })).into_response(),
        Err(e) => error_response("delete expense", e),
    }
}
