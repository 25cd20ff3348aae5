use crate::errors::ServiceError;
use crate::handlers::common::validate_input;
use crate::services::stock_in::{NewStockIn, StockInLine};
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StockInRequest {
    pub employee_id: i64,
    pub supplier_id: i64,
    /// Client-proposed reference of the form REF-######
    pub reference_number: String,
    /// Explicit movement timestamp for the whole batch
    pub stock_in_date: DateTime<Utc>,
    #[validate(length(min = 1, message = "at least one line item is required"))]
    pub stock_in_products: Vec<StockInProductRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockInProductRequest {
    pub variation_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockInResponse {
    pub message: String,
    pub stock_in_id: i64,
    pub reference_number: String,
    pub stock_in_date: DateTime<Utc>,
}

pub fn stock_in_router() -> Router<AppState> {
    Router::new().route("/", post(record_stock_in))
}

/// Record an inbound stock movement batch
#[utoipa::path(
    post,
    path = "/api/v1/stock-ins",
    request_body = StockInRequest,
    responses(
        (status = 201, description = "Stock-in batch recorded", body = StockInResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown variation", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate reference number or concurrent update", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock-movements"
)]
pub async fn record_stock_in(
    State(state): State<AppState>,
    Json(payload): Json<StockInRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let batch = NewStockIn {
        employee_id: payload.employee_id,
        supplier_id: payload.supplier_id,
        reference_number: payload.reference_number,
        stock_in_date: payload.stock_in_date,
    };
    let items = payload
        .stock_in_products
        .into_iter()
        .map(|p| StockInLine {
            variation_id: p.variation_id,
            quantity: p.quantity,
        })
        .collect();

    let recorded = state.services.stock_in.record(batch, items).await?;

    let response = StockInResponse {
        message: "Stock-in batch recorded".to_string(),
        stock_in_id: recorded.stock_in_id,
        reference_number: recorded.reference_number,
        stock_in_date: recorded.stock_in_date,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
