use crate::{
    db::DbPool,
    entities::inventory_level,
    entities::product::{self, Entity as Product},
    entities::product_variation::{self, Entity as ProductVariation},
    errors::ServiceError,
    events::{Event, EventSender},
    services::BatchFailurePolicy,
    sku,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::error::SqlErr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Requested attributes for one new variation. A missing SKU is generated
/// from the product name, variation attributes, and a per-product counter.
#[derive(Debug, Clone)]
pub struct NewVariation {
    pub variation_type: Option<String>,
    pub variation_value: Option<String>,
    pub sku: Option<String>,
    pub unit_price: Decimal,
}

/// Creates product variations together with their zero-quantity projection
/// rows. This is the catalog collaborator's contract with the ledger: every
/// variation gets an inventory record at creation so movement recorders can
/// assume one exists.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl CatalogService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a batch of variations under one product.
    ///
    /// Under `BestEffort` each variation runs inside a savepoint: a failing
    /// one is rolled back and skipped while the rest commit, and the caller
    /// learns about skips only by comparing counts. Under `AllOrNothing`
    /// the first failure aborts the whole request.
    #[instrument(skip(self, specs))]
    pub async fn create_variations(
        &self,
        product_id: i64,
        specs: Vec<NewVariation>,
        policy: BatchFailurePolicy,
    ) -> Result<Vec<product_variation::Model>, ServiceError> {
        if specs.is_empty() {
            return Err(ServiceError::ValidationError(
                "Variation batch must contain at least one item".into(),
            ));
        }
        if let Some(spec) = specs.iter().find(|s| s.unit_price < Decimal::ZERO) {
            return Err(ServiceError::ValidationError(format!(
                "Unit price must not be negative (got {})",
                spec.unit_price
            )));
        }

        let db = self.db_pool.as_ref();
        let txn = db.begin().await?;

        let product = Product::find_by_id(product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let existing = ProductVariation::find()
            .filter(product_variation::Column::ProductId.eq(product_id))
            .count(&txn)
            .await?;

        let mut created = Vec::with_capacity(specs.len());

        for (idx, spec) in specs.into_iter().enumerate() {
            let counter = existing as u32 + idx as u32 + 1;

            match policy {
                BatchFailurePolicy::AllOrNothing => {
                    created.push(create_one(&txn, &product, spec, counter).await?);
                }
                BatchFailurePolicy::BestEffort => {
                    let savepoint = txn.begin().await?;
                    match create_one(&savepoint, &product, spec, counter).await {
                        Ok(model) => {
                            savepoint.commit().await?;
                            created.push(model);
                        }
                        Err(err) => {
                            savepoint.rollback().await?;
                            warn!(
                                product_id = %product_id,
                                error = %err,
                                "Skipping variation that failed to create"
                            );
                        }
                    }
                }
            }
        }

        txn.commit().await?;

        for variation in &created {
            self.event_sender
                .send(Event::VariationCreated {
                    variation_id: variation.variation_id,
                    sku: variation.sku.clone(),
                })
                .await
                .map_err(ServiceError::EventError)?;
        }

        info!(product_id = %product_id, created = %created.len(), "Created variation batch");
        Ok(created)
    }
}

async fn create_one(
    txn: &DatabaseTransaction,
    product: &product::Model,
    spec: NewVariation,
    counter: u32,
) -> Result<product_variation::Model, ServiceError> {
    let sku_value = match spec.sku {
        Some(sku) if !sku.trim().is_empty() => sku,
        _ => sku::generate(
            &product.name,
            spec.variation_type.as_deref(),
            spec.variation_value.as_deref(),
            counter,
        ),
    };

    let variation = product_variation::ActiveModel {
        product_id: Set(product.product_id),
        variation_type: Set(spec.variation_type),
        variation_value: Set(spec.variation_value),
        sku: Set(sku_value.clone()),
        unit_price: Set(spec.unit_price),
        status_id: Set(1),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(|e| map_variation_insert_err(e, &sku_value))?;

    inventory_level::ActiveModel {
        variation_id: Set(variation.variation_id),
        stock_quantity: Set(0),
        version: Set(0),
        last_updated_date: Set(Utc::now()),
    }
    .insert(txn)
    .await?;

    Ok(variation)
}

fn map_variation_insert_err(err: DbErr, sku: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateSku(sku.to_string()),
        _ => ServiceError::DatabaseError(err),
    }
}
