use crate::{
    db::DbPool,
    entities::inventory_level::{self, Entity as InventoryLevel},
    entities::product::{self, Entity as Product},
    entities::product_variation,
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// One inventory row joined with its variation and product metadata, the
/// shape every inventory read returns. Quantities come straight from the
/// projection; they are not recomputed from the ledger.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryRow {
    pub variation_id: i64,
    pub product_name: String,
    pub variation_type: Option<String>,
    pub variation_value: Option<String>,
    pub sku: String,
    pub stock_quantity: i32,
    pub status: String,
    pub last_updated_date: DateTime<Utc>,
}

/// Read-only access to the inventory projection. Safe for concurrent use;
/// never mutates state.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists projection rows with variation and product metadata, paginated.
    /// Filtering happens client-side.
    #[instrument(skip(self))]
    pub async fn list(&self, page: u64, limit: u64) -> Result<(Vec<InventoryRow>, u64), ServiceError> {
        let db = self.db_pool.as_ref();

        let paginator = InventoryLevel::find()
            .find_also_related(product_variation::Entity)
            .paginate(db, limit);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        let product_names = self
            .product_names(rows.iter().filter_map(|(_, v)| v.as_ref().map(|v| v.product_id)))
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for (level, variation) in rows {
            let variation = variation.ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Inventory row {} has no variation",
                    level.variation_id
                ))
            })?;
            result.push(join_row(level, variation, &product_names));
        }

        Ok((result, total))
    }

    /// Fetches the projection row for one variation.
    #[instrument(skip(self))]
    pub async fn get(&self, variation_id: i64) -> Result<InventoryRow, ServiceError> {
        let db = self.db_pool.as_ref();

        let (level, variation) = InventoryLevel::find_by_id(variation_id)
            .find_also_related(product_variation::Entity)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No inventory record for variation {}",
                    variation_id
                ))
            })?;

        let variation = variation.ok_or_else(|| {
            ServiceError::InternalError(format!(
                "Inventory row {} has no variation",
                variation_id
            ))
        })?;

        let product_names = self.product_names(std::iter::once(variation.product_id)).await?;
        Ok(join_row(level, variation, &product_names))
    }

    async fn product_names(
        &self,
        product_ids: impl Iterator<Item = i64>,
    ) -> Result<HashMap<i64, String>, ServiceError> {
        let mut ids: Vec<i64> = product_ids.collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let products = Product::find()
            .filter(product::Column::ProductId.is_in(ids))
            .all(self.db_pool.as_ref())
            .await?;

        Ok(products
            .into_iter()
            .map(|p| (p.product_id, p.name))
            .collect())
    }
}

fn join_row(
    level: inventory_level::Model,
    variation: product_variation::Model,
    product_names: &HashMap<i64, String>,
) -> InventoryRow {
    InventoryRow {
        variation_id: level.variation_id,
        product_name: product_names
            .get(&variation.product_id)
            .cloned()
            .unwrap_or_default(),
        variation_type: variation.variation_type,
        variation_value: variation.variation_value,
        sku: variation.sku,
        stock_quantity: level.stock_quantity,
        status: status_description(variation.status_id).to_string(),
        last_updated_date: level.last_updated_date,
    }
}

fn status_description(status_id: i32) -> &'static str {
    match status_id {
        1 => "Active",
        2 => "Inactive",
        _ => "Unknown",
    }
}
