use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::CreateHistoryEventRequest;

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::HistoryMapper;
use crate::backend::AppState;

/// Create a router for history related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_history).post(create_history_event))
}

/// The whole farm timeline, most recent first
pub async fn list_history(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/history");

    match state.history_service.list_events(None).await {
        Ok(events) => (StatusCode::OK, Json(HistoryMapper::to_dto_list(events))).into_response(),
        Err(e) => error_response("list history", e),
    }
}

pub async fn create_history_event(
    State(state): State<AppState>,
    Json(request): Json<CreateHistoryEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/history - request: {:?}", request);

    match state.history_service.create_event(request).await {
        Ok(event) => (StatusCode::CREATED, Json(HistoryMapper::to_dto(event))).into_response(),
        Err(e) => error_response("create history event", e),
    }
}
