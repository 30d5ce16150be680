//! # Backend Module
//!
//! Non-UI logic of the farm backend, organised in three layers:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (classifier, services)
//!     ↓
//! Storage Layer (CSV files)
//! ```
//!
//! This module wires the layers together: it builds the services over a
//! CSV connection and exposes the axum router.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::domain::{
    AnimalService, ClassificationService, FinanceService, HistoryService, MedicalService,
    ReproductionService, StatsService,
};
use crate::backend::storage::CsvConnection;
use crate::config::ServerConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub animal_service: AnimalService,
    pub classification_service: ClassificationService,
    pub medical_service: MedicalService,
    pub reproduction_service: ReproductionService,
    pub finance_service: FinanceService,
    pub history_service: HistoryService,
    pub stats_service: StatsService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up CSV storage in {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;

    info!("Setting up domain model");
    let app_state = build_state(connection, config);

    if config.seed_sample_data {
        let seeded = app_state.animal_service.seed_sample_animals().await?;
        if seeded > 0 {
            info!("Seeded {} sample animals", seeded);
        }
    }

    Ok(app_state)
}

/// Build every service over an existing connection
pub fn build_state(connection: CsvConnection, config: &ServerConfig) -> AppState {
    let connection = Arc::new(connection);

    let history_service = HistoryService::new(connection.clone());
    let finance_service = FinanceService::new(connection.clone());
    let classification_service = ClassificationService::new(config.classification);
    let medical_service =
        MedicalService::new(connection.clone(), finance_service.clone(), history_service.clone());
    let reproduction_service =
        ReproductionService::new(connection.clone(), history_service.clone(), config.gestation);
    let stats_service = StatsService::new(
        connection.clone(),
        finance_service.clone(),
        classification_service.clone(),
        config.market_prices,
    );
    let animal_service = AnimalService::new(
        connection,
        medical_service.clone(),
        reproduction_service.clone(),
        finance_service.clone(),
        history_service.clone(),
    );

    AppState {
        animal_service,
        classification_service,
        medical_service,
        reproduction_service,
        finance_service,
        history_service,
        stats_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: Option<&str>) -> Router {
    let allow_origin = match cors_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Invalid CORS origin '{}' ({}), allowing any origin", origin, e);
                AllowOrigin::any()
            }
        },
        None => AllowOrigin::any(),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::rest::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
