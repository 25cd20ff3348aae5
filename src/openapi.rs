use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the stock ledger endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::stock_in::record_stock_in,
        crate::handlers::stock_out::record_stock_out,
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::get_inventory,
        crate::handlers::history::global_history,
        crate::handlers::history::variation_history,
        crate::handlers::variations::create_variations,
    ),
    components(schemas(
        crate::handlers::stock_in::StockInRequest,
        crate::handlers::stock_in::StockInProductRequest,
        crate::handlers::stock_in::StockInResponse,
        crate::handlers::stock_out::StockOutRequest,
        crate::handlers::stock_out::StockOutProductRequest,
        crate::handlers::stock_out::StockOutResponse,
        crate::handlers::variations::CreateVariationsRequest,
        crate::handlers::variations::VariationSpecRequest,
        crate::handlers::variations::CreatedVariationResponse,
        crate::services::inventory::InventoryRow,
        crate::services::history::StockMovementEntry,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "stock-movements", description = "Stock-in and stock-out batch recording"),
        (name = "inventory", description = "Inventory projection reads"),
        (name = "stock-history", description = "Reconstructed movement history"),
        (name = "catalog", description = "Variation creation and SKU assignment"),
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at /docs, serving the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
