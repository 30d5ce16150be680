//! # REST API Interface Layer
//!
//! HTTP endpoints of the farm backend, all nested under `/api`. Each
//! `*_apis` module exposes a `router()` for its resource; handlers log the
//! request, call a domain service, and map the result through the DTO
//! mappers.
//!
//! Domain failures are translated to status codes by [`error_response`]:
//! not found → 404, validation → 400, conflict → 409, anything else → 500.

pub mod animal_apis;
pub mod category_apis;
pub mod finance_apis;
pub mod history_apis;
pub mod logging_apis;
pub mod mappers;
pub mod medical_apis;
pub mod reproduction_apis;
pub mod stats_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::error;
use shared::ApiMessage;

use crate::backend::domain::DomainError;
use crate::backend::AppState;

/// Routes served under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/animals", animal_apis::router())
        .nest("/categories", category_apis::router())
        .nest("/medical", medical_apis::router())
        .nest("/reproduction", reproduction_apis::router())
        .nest("/transactions", finance_apis::router())
        .nest("/history", history_apis::router())
        .nest("/stats", stats_apis::router())
        .nest("/logs", logging_apis::router())
}

async fn root() -> Json<ApiMessage> {
    Json(ApiMessage {
        message: "Élevage la Providence API".to_string(),
    })
}

/// HTTP status for an error raised by a service
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<DomainError>() {
        Some(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(DomainError::Conflict(_)) => StatusCode::CONFLICT,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed operation and turn it into a response. Internal errors
/// are not echoed back to the client.
pub fn error_response(action: &str, err: anyhow::Error) -> Response {
    let status = status_for(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Failed to {}: {:#}", action, err);
        (status, format!("Error while trying to {}", action)).into_response()
    } else {
        error!("Failed to {}: {}", action, err);
        (status, err.to_string()).into_response()
    }
}
