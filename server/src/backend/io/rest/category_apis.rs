use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use log::info;
use shared::{AnimalType, AvailableCategoriesQuery};

use crate::backend::io::rest::error_response;
use crate::backend::AppState;

/// Create a router for category related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_category_labels))
        .route("/available", get(list_available_categories))
}

/// Label dictionary of every lifecycle category
pub async fn list_category_labels(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");
    Json(state.classification_service.category_labels())
}

/// Categories present in the herd for the given type (all types when
/// the type is absent or unknown)
pub async fn list_available_categories(
    State(state): State<AppState>,
    Query(query): Query<AvailableCategoriesQuery>,
) -> impl IntoResponse {
    info!("GET /api/categories/available - query: {:?}", query);
    let animal_type = query.animal_type.as_deref().and_then(AnimalType::parse);

    match state.animal_service.all_animals().await {
        Ok(animals) => {
            let categories =
                state.classification_service.available_categories(&animals, animal_type, Utc::now());
            (StatusCode::OK, Json(categories)).into_response()
        }
        Err(e) => error_response("list available categories", e),
    }
}
