use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use log::info;

use crate::backend::io::rest::error_response;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

/// Dashboard figures over the active herd
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/stats");

    match state.stats_service.compute_stats(Utc::now()).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => error_response("compute statistics", e),
    }
}
