use crate::{
    db::DbPool,
    entities::employee::Entity as Employee,
    entities::stock_in,
    entities::stock_in_item,
    entities::supplier::Entity as Supplier,
    errors::ServiceError,
    events::{Event, EventSender},
    reference,
    services::apply_projection_delta,
};
use chrono::{DateTime, Utc};
use sea_orm::error::SqlErr;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set, TransactionError, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};

/// Metadata for one inbound movement batch. The reference number is proposed
/// by the caller and persisted verbatim.
#[derive(Debug, Clone)]
pub struct NewStockIn {
    pub employee_id: i64,
    pub supplier_id: i64,
    pub reference_number: String,
    pub stock_in_date: DateTime<Utc>,
}

/// One inbound line item.
#[derive(Debug, Clone)]
pub struct StockInLine {
    pub variation_id: i64,
    pub quantity: i32,
}

/// Identity of a committed inbound batch.
#[derive(Debug, Clone)]
pub struct RecordedStockIn {
    pub stock_in_id: i64,
    pub reference_number: String,
    pub stock_in_date: DateTime<Utc>,
}

/// Records inbound stock movement batches: one header, one immutable ledger
/// row per line item, and the matching projection increments, all inside a
/// single transaction.
#[derive(Clone)]
pub struct StockInService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StockInService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records a whole inbound batch atomically. Any failing line item aborts
    /// the header, every ledger row, and every projection delta together.
    #[instrument(skip(self, items), fields(reference = %batch.reference_number))]
    pub async fn record(
        &self,
        batch: NewStockIn,
        items: Vec<StockInLine>,
    ) -> Result<RecordedStockIn, ServiceError> {
        validate_batch(&batch, &items)?;

        let line_count = items.len();
        let reference_number = batch.reference_number.clone();

        let recorded = self
            .db_pool
            .transaction::<_, RecordedStockIn, ServiceError>(move |txn| {
                Box::pin(async move {
                    if Supplier::find_by_id(batch.supplier_id).one(txn).await?.is_none() {
                        return Err(ServiceError::NotFound(format!(
                            "Supplier {} not found",
                            batch.supplier_id
                        )));
                    }
                    if Employee::find_by_id(batch.employee_id).one(txn).await?.is_none() {
                        return Err(ServiceError::NotFound(format!(
                            "Employee {} not found",
                            batch.employee_id
                        )));
                    }

                    let header = stock_in::ActiveModel {
                        reference_number: Set(batch.reference_number.clone()),
                        supplier_id: Set(batch.supplier_id),
                        employee_id: Set(batch.employee_id),
                        stock_in_date: Set(batch.stock_in_date),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| map_header_insert_err(e, &batch.reference_number))?;

                    // Line items are applied strictly in submission order;
                    // repeated variations accumulate one delta at a time.
                    for item in &items {
                        stock_in_item::ActiveModel {
                            stock_in_id: Set(header.stock_in_id),
                            variation_id: Set(item.variation_id),
                            quantity: Set(item.quantity),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;

                        apply_projection_delta(
                            txn,
                            item.variation_id,
                            item.quantity,
                            batch.stock_in_date,
                        )
                        .await?;
                    }

                    Ok(RecordedStockIn {
                        stock_in_id: header.stock_in_id,
                        reference_number: header.reference_number,
                        stock_in_date: header.stock_in_date,
                    })
                })
            })
            .await
            .map_err(unwrap_txn_err)?;

        info!(
            stock_in_id = %recorded.stock_in_id,
            lines = %line_count,
            "Recorded stock-in batch"
        );

        self.event_sender
            .send(Event::StockInRecorded {
                stock_in_id: recorded.stock_in_id,
                reference_number: reference_number.clone(),
                stock_in_date: recorded.stock_in_date,
                line_count,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(recorded)
    }
}

fn validate_batch(batch: &NewStockIn, items: &[StockInLine]) -> Result<(), ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::ValidationError(
            "Stock-in batch must contain at least one line item".into(),
        ));
    }
    if let Some(item) = items.iter().find(|i| i.quantity <= 0) {
        return Err(ServiceError::ValidationError(format!(
            "Quantity must be positive for variation {}",
            item.variation_id
        )));
    }
    if !reference::is_valid_inbound(&batch.reference_number) {
        return Err(ServiceError::ValidationError(format!(
            "Reference number '{}' is not of the form REF-######",
            batch.reference_number
        )));
    }
    Ok(())
}

fn map_header_insert_err(err: DbErr, reference: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::DuplicateReference(reference.to_string())
        }
        _ => ServiceError::DatabaseError(err),
    }
}

pub(crate) fn unwrap_txn_err(err: TransactionError<ServiceError>) -> ServiceError {
    match err {
        TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
        TransactionError::Transaction(service_err) => service_err,
    }
}
