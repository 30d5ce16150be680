//! # REST API for Farm Finances
//!
//! Endpoints for recording income and expenses and for the financial
//! summary used by the dashboard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use log::info;
use shared::{CreateTransactionRequest, TransactionListQuery};

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::TransactionMapper;
use crate::backend::AppState;

/// Create a router for transaction related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/summary", get(get_financial_summary))
        .route("/:id", delete(delete_transaction))
}

/// List transactions in an optional date range
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    match state.finance_service.list_transactions(&query).await {
        Ok(transactions) => {
            (StatusCode::OK, Json(TransactionMapper::to_dto_list(transactions))).into_response()
        }
        Err(e) => error_response("list transactions", e),
    }
}

/// Record a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    match state.finance_service.create_transaction(request).await {
        Ok(transaction) => {
            (StatusCode::CREATED, Json(TransactionMapper::to_dto(transaction))).into_response()
        }
        Err(e) => error_response("create transaction", e),
    }
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", transaction_id);

    match state.finance_service.delete_transaction(&transaction_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete transaction", e),
    }
}

pub async fn get_financial_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/transactions/summary");

    match state.finance_service.summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response("compute financial summary", e),
    }
}
