use crate::errors::ServiceError;
use crate::handlers::common::validate_input;
use crate::services::catalog::NewVariation;
use crate::services::BatchFailurePolicy;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVariationsRequest {
    pub product_id: i64,
    #[validate(length(min = 1, message = "at least one variation is required"))]
    pub variations: Vec<VariationSpecRequest>,
    /// "all_or_nothing" aborts the whole batch on the first failure;
    /// the default "best_effort" skips failing variations and keeps going.
    #[serde(default)]
    pub all_or_nothing: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VariationSpecRequest {
    pub variation_type: Option<String>,
    pub variation_value: Option<String>,
    pub sku: Option<String>,
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedVariationResponse {
    pub variation_id: i64,
    pub sku: String,
}

pub fn variations_router() -> Router<AppState> {
    Router::new().route("/", post(create_variations))
}

/// Create a batch of product variations (catalog collaborator contract).
/// Skipped items are only visible by comparing requested and created counts.
#[utoipa::path(
    post,
    path = "/api/v1/variations",
    request_body = CreateVariationsRequest,
    responses(
        (status = 201, description = "Variations created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate SKU", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn create_variations(
    State(state): State<AppState>,
    Json(payload): Json<CreateVariationsRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let policy = if payload.all_or_nothing {
        BatchFailurePolicy::AllOrNothing
    } else {
        BatchFailurePolicy::BestEffort
    };

    let requested = payload.variations.len();
    let specs = payload
        .variations
        .into_iter()
        .map(|v| NewVariation {
            variation_type: v.variation_type,
            variation_value: v.variation_value,
            sku: v.sku,
            unit_price: v.unit_price,
        })
        .collect();

    let created = state
        .services
        .catalog
        .create_variations(payload.product_id, specs, policy)
        .await?;

    let body = serde_json::json!({
        "message": "Variations created",
        "requested": requested,
        "created": created
            .iter()
            .map(|v| CreatedVariationResponse {
                variation_id: v.variation_id,
                sku: v.sku.clone(),
            })
            .collect::<Vec<_>>(),
    });

    Ok((StatusCode::CREATED, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_variation_list_fails_validation() {
        let req = CreateVariationsRequest {
            product_id: 1,
            variations: vec![],
            all_or_nothing: false,
        };
        assert!(validate_input(&req).is_err());

        let req = CreateVariationsRequest {
            product_id: 1,
            variations: vec![VariationSpecRequest {
                variation_type: Some("Size".to_string()),
                variation_value: Some("30mL".to_string()),
                sku: None,
                unit_price: Decimal::new(1250, 2),
            }],
            all_or_nothing: false,
        };
        assert!(validate_input(&req).is_ok());
    }
}
