//! # REST API for Veterinary Records

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use log::info;
use shared::CreateMedicalRecordRequest;

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::MedicalMapper;
use crate::backend::AppState;

/// Create a router for medical related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_medical_record))
        .route("/upcoming", get(list_upcoming_visits))
        .route("/:id", delete(delete_medical_record))
}

pub async fn create_medical_record(
    State(state): State<AppState>,
    Json(request): Json<CreateMedicalRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/medical - request: {:?}", request);

    match state.medical_service.create_medical_record(request).await {
        Ok(record) => (StatusCode::CREATED, Json(MedicalMapper::to_dto(record))).into_response(),
        Err(e) => error_response("create medical record", e),
    }
}

/// Visits scheduled from today on, soonest first
pub async fn list_upcoming_visits(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/medical/upcoming");

    match state.medical_service.upcoming_visits(Utc::now().date_naive()).await {
        Ok(records) => (StatusCode::OK, Json(MedicalMapper::to_dto_list(records))).into_response(),
        Err(e) => error_response("list upcoming visits", e),
    }
}

pub async fn delete_medical_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/medical/{}", record_id);

    match state.medical_service.delete_medical_record(&record_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete medical record", e),
    }
}
