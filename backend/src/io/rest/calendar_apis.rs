use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::domain::commands::calendar::CalendarWindowQuery as WindowQuery;
use crate::io::rest::error_response;
use crate::io::rest::mappers::CalendarMapper;
use crate::AppState;
use shared::{CalendarWindowQuery, RefreshCalendarResponse};

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_calendar_window))
        .route("/refresh", post(refresh_calendar))
}

/// Three-month calendar window around `?year=&month=`
pub async fn get_calendar_window(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<CalendarWindowQuery>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/calendar - query: {:?}", user_id, query);

    let query = WindowQuery {
        year: query.year,
        month: query.month,
    };
    match state.event_service.calendar_window(&user_id, query).await {
        Ok(result) => (StatusCode::OK, Json(CalendarMapper::to_window_response(result))).into_response(),
        Err(e) => error_response("build calendar window", e),
    }
}

/// Regenerate every occurrence of the user from their expenses
pub async fn refresh_calendar(State(state): State<AppState>, Path(user_id): Path<String>) -> impl IntoResponse {
    info!("POST /api/users/{}/calendar/refresh", user_id);

    match state.refresh_service.refresh(&user_id).await {
        Ok(result) => {
            let response = RefreshCalendarResponse {
                events_generated: result.events_generated,
                exclusions_preserved: result.exclusions_preserved,
                success_message: format!("Generated {} events", result.events_generated),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("refresh calendar", e),
    }
}
