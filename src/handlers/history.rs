use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

pub fn history_router() -> Router<AppState> {
    Router::new()
        .route("/", get(global_history))
        .route("/:variation_id", get(variation_history))
}

/// Unified movement feed across all variations, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/stock-history",
    responses(
        (status = 200, description = "Movement feed returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock-history"
)]
pub async fn global_history(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.services.history.history_all().await?;
    let total = entries.len();
    let response = json!({
        "movements": entries,
        "total": total,
    });
    Ok((StatusCode::OK, Json(response)))
}

/// Movement history for one variation, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/stock-history/{variation_id}",
    params(
        ("variation_id" = i64, Path, description = "Product variation id")
    ),
    responses(
        (status = 200, description = "Movement history returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock-history"
)]
pub async fn variation_history(
    State(state): State<AppState>,
    Path(variation_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.services.history.history_for(variation_id).await?;
    let total = entries.len();
    let response = json!({
        "variation_id": variation_id,
        "movements": entries,
        "total": total,
    });
    Ok((StatusCode::OK, Json(response)))
}
