//! # REST API for Reproduction Tracking

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{CreateReproductionRequest, RecordBirthRequest, ReproductionListQuery};

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::ReproductionMapper;
use crate::backend::AppState;

/// Create a router for reproduction related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reproduction_records).post(create_reproduction_record))
        .route("/:id/birth", post(record_birth))
}

pub async fn list_reproduction_records(
    State(state): State<AppState>,
    Query(query): Query<ReproductionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/reproduction - query: {:?}", query);
    let animal_id = query.animal_id.as_deref().map(str::trim).filter(|id| !id.is_empty());

    match state.reproduction_service.list_records(animal_id).await {
        Ok(records) => (StatusCode::OK, Json(ReproductionMapper::to_dto_list(records))).into_response(),
        Err(e) => error_response("list reproduction records", e),
    }
}

pub async fn create_reproduction_record(
    State(state): State<AppState>,
    Json(request): Json<CreateReproductionRequest>,
) -> impl IntoResponse {
    info!("POST /api/reproduction - request: {:?}", request);

    match state.reproduction_service.create_record(request).await {
        Ok(record) => (StatusCode::CREATED, Json(ReproductionMapper::to_dto(record))).into_response(),
        Err(e) => error_response("create reproduction record", e),
    }
}

pub async fn record_birth(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(request): Json<RecordBirthRequest>,
) -> impl IntoResponse {
    info!("POST /api/reproduction/{}/birth - request: {:?}", record_id, request);

    match state.reproduction_service.record_birth(&record_id, request).await {
        Ok(record) => (StatusCode::OK, Json(ReproductionMapper::to_dto(record))).into_response(),
        Err(e) => error_response("record birth", e),
    }
}
