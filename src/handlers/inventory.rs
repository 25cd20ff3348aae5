use crate::errors::ServiceError;
use crate::handlers::common::{PaginationMeta, PaginationParams};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

pub fn inventory_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/:variation_id", get(get_inventory))
}

/// List inventory projection rows with variation and product metadata
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(PaginationParams),
    responses(
        (status = 200, description = "Inventory list returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (rows, total) = state
        .services
        .inventory
        .list(pagination.page, pagination.per_page)
        .await?;

    let response = json!({
        "inventory": rows,
        "meta": PaginationMeta::new(pagination.page, pagination.per_page, total),
    });

    Ok((StatusCode::OK, Json(response)))
}

/// Get the inventory projection row for one variation
#[utoipa::path(
    get,
    path = "/api/v1/inventory/{variation_id}",
    params(
        ("variation_id" = i64, Path, description = "Product variation id")
    ),
    responses(
        (status = 200, description = "Inventory row returned", body = crate::services::inventory::InventoryRow),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(variation_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.inventory.get(variation_id).await?;
    Ok((StatusCode::OK, Json(row)))
}
