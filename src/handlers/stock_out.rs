use crate::errors::ServiceError;
use crate::handlers::common::validate_input;
use crate::services::stock_out::{NewStockOut, StockOutLine};
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
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StockOutRequest {
    /// Originating order, when the stock-out fulfils one. Its id becomes the
    /// reference number; adjustments get a generated ADJ reference instead.
    pub order_transaction_id: Option<Uuid>,
    /// Movement timestamp; defaults to the server clock
    pub stock_out_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "at least one line item is required"))]
    pub stock_out_products: Vec<StockOutProductRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockOutProductRequest {
    pub variation_id: i64,
    pub quantity: i32,
    pub reason: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockOutResponse {
    pub message: String,
    pub stock_out_id: i64,
    pub reference_number: String,
    pub stock_out_date: DateTime<Utc>,
}

pub fn stock_out_router() -> Router<AppState> {
    Router::new().route("/", post(record_stock_out))
}

/// Record an outbound stock movement batch
#[utoipa::path(
    post,
    path = "/api/v1/stock-outs",
    request_body = StockOutRequest,
    responses(
        (status = 201, description = "Stock-out batch recorded", body = StockOutResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown variation", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate reference number or concurrent update", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock-movements"
)]
pub async fn record_stock_out(
    State(state): State<AppState>,
    Json(payload): Json<StockOutRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let batch = NewStockOut {
        order_transaction_id: payload.order_transaction_id,
        stock_out_date: payload.stock_out_date,
    };
    let items = payload
        .stock_out_products
        .into_iter()
        .map(|p| StockOutLine {
            variation_id: p.variation_id,
            quantity: p.quantity,
            reason: p.reason,
        })
        .collect();

    let recorded = state.services.stock_out.record(batch, items).await?;

    let response = StockOutResponse {
        message: "Stock-out batch recorded".to_string(),
        stock_out_id: recorded.stock_out_id,
        reference_number: recorded.reference_number,
        stock_out_date: recorded.stock_out_date,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
