use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::EventMapper;
use crate::AppState;
use shared::{EventResponse, SetEventExcludedRequest};

/// Create a router for occurrence related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:event_id", get(get_event))
        .route("/:event_id/exclude", post(set_event_excluded))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/events/{}", user_id, event_id);

    match state.event_service.get_event(&user_id, &event_id).await {
        Ok(event) => (StatusCode::OK, Json(EventResponse { event: EventMapper::to_dto(event) })).into_response(),
        Err(e) => error_response("get event", e),
    }
}

/// Exclude an occurrence from day totals, or include it again
pub async fn set_event_excluded(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(String, String)>,
    Json(request): Json<SetEventExcludedRequest>,
) -> impl IntoResponse {
    info!("POST /api/users/{}/events/{}/exclude - request: {:?}", user_id, event_id, request);

    match state
        .event_service
        .set_event_excluded(&user_id, &event_id, request.excluded)
        .await
    {
        Ok(event) => (StatusCode::OK, Json(EventResponse { event: EventMapper::to_dto(event) })).into_response(),
        Err(e) => error_response("set event excluded", e),
    }
}
