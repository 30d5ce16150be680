//! # REST API for Animal Management
//!
//! Endpoints for creating, listing, updating, selling and deleting animals,
//! plus the classified herd view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::info;
use shared::{AnimalListQuery, CreateAnimalRequest, HerdViewQuery, SellAnimalRequest, UpdateAnimalRequest};

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::{AnimalMapper, HistoryMapper, MedicalMapper};
use crate::backend::AppState;

/// Create a router for animal related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_animals).post(create_animal))
        .route("/view", get(get_herd_view))
        .route("/:id", get(get_animal).put(update_animal).delete(delete_animal))
        .route("/:id/sell", post(sell_animal))
        .route("/:id/medical", get(list_animal_medical_records))
        .route("/:id/history", get(list_animal_history))
}

/// List animals, optionally filtered by type and status
pub async fn list_animals(
    State(state): State<AppState>,
    Query(query): Query<AnimalListQuery>,
) -> impl IntoResponse {
    info!("GET /api/animals - query: {:?}", query);

    match state.animal_service.list_animals(&query).await {
        Ok(animals) => {
            let dtos: Vec<_> = animals.into_iter().map(AnimalMapper::to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => error_response("list animals", e),
    }
}

/// Create a new animal
pub async fn create_animal(
    State(state): State<AppState>,
    Json(request): Json<CreateAnimalRequest>,
) -> impl IntoResponse {
    info!("POST /api/animals - request: {:?}", request);

    match state.animal_service.create_animal(request).await {
        Ok(animal) => (StatusCode::CREATED, Json(AnimalMapper::to_dto(animal))).into_response(),
        Err(e) => error_response("create animal", e),
    }
}

/// Filtered, sorted and classified herd
pub async fn get_herd_view(
    State(state): State<AppState>,
    Query(query): Query<HerdViewQuery>,
) -> impl IntoResponse {
    info!("GET /api/animals/view - query: {:?}", query);

    match state.animal_service.all_animals().await {
        Ok(animals) => {
            let view = state.classification_service.build_view(&animals, &query, Utc::now());
            (StatusCode::OK, Json(AnimalMapper::to_herd_view_dto(view))).into_response()
        }
        Err(e) => error_response("build herd view", e),
    }
}

/// Get an animal by ID
pub async fn get_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/animals/{}", animal_id);

    match state.animal_service.get_animal(&animal_id).await {
        Ok(animal) => (StatusCode::OK, Json(AnimalMapper::to_dto(animal))).into_response(),
        Err(e) => error_response("get animal", e),
    }
}

/// Update an animal
pub async fn update_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    Json(request): Json<UpdateAnimalRequest>,
) -> impl IntoResponse {
    info!("PUT /api/animals/{} - request: {:?}", animal_id, request);

    match state.animal_service.update_animal(&animal_id, request).await {
        Ok(animal) => {
            let response = AnimalMapper::to_response_dto(animal, "Animal updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update animal", e),
    }
}

/// Mark an animal as sold
pub async fn sell_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    request: Option<Json<SellAnimalRequest>>,
) -> impl IntoResponse {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    info!("POST /api/animals/{}/sell - request: {:?}", animal_id, request);

    match state.animal_service.sell_animal(&animal_id, request).await {
        Ok(animal) => {
            let response = AnimalMapper::to_response_dto(animal, "Animal sold successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("sell animal", e),
    }
}

/// Delete an animal and everything recorded about it
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/animals/{}", animal_id);

    match state.animal_service.delete_animal(&animal_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete animal", e),
    }
}

pub async fn list_animal_medical_records(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/animals/{}/medical", animal_id);

    match state.medical_service.list_for_animal(&animal_id).await {
        Ok(records) => (StatusCode::OK, Json(MedicalMapper::to_dto_list(records))).into_response(),
        Err(e) => error_response("list medical records", e),
    }
}

pub async fn list_animal_history(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/animals/{}/history", animal_id);

    if let Err(e) = state.animal_service.get_animal(&animal_id).await {
        return error_response("list animal history", e);
    }

    match state.history_service.list_events(Some(&animal_id)).await {
        Ok(events) => (StatusCode::OK, Json(HistoryMapper::to_dto_list(events))).into_response(),
        Err(e) => error_response("list animal history", e),
    }
}
