use crate::{
    db::DbPool,
    entities::stock_out::{self, Entity as StockOut},
    entities::stock_out_item,
    errors::ServiceError,
    events::{Event, EventSender},
    reference::AdjustmentSequence,
    services::apply_projection_delta,
    services::stock_in::unwrap_txn_err,
};
use chrono::{DateTime, Utc};
use sea_orm::error::SqlErr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Metadata for one outbound movement batch. When the batch originates from
/// an order, the order id doubles as the reference number; otherwise an
/// adjustment reference is drawn from the sequence.
#[derive(Debug, Clone, Default)]
pub struct NewStockOut {
    pub order_transaction_id: Option<Uuid>,
    /// Explicit movement timestamp; defaults to now when absent.
    pub stock_out_date: Option<DateTime<Utc>>,
}

/// One outbound line item.
#[derive(Debug, Clone)]
pub struct StockOutLine {
    pub variation_id: i64,
    pub quantity: i32,
    pub reason: String,
}

/// Identity of a committed outbound batch.
#[derive(Debug, Clone)]
pub struct RecordedStockOut {
    pub stock_out_id: i64,
    pub reference_number: String,
    pub stock_out_date: DateTime<Utc>,
}

/// Records outbound stock movement batches with the same whole-batch
/// atomicity as stock-in, plus the insufficient-stock guard: a decrement
/// that would drive a projection negative rejects the entire batch.
#[derive(Clone)]
pub struct StockOutService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    adjustment_sequence: Arc<AdjustmentSequence>,
}

impl StockOutService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        adjustment_sequence: Arc<AdjustmentSequence>,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            adjustment_sequence,
        }
    }

    /// Records a whole outbound batch atomically.
    #[instrument(skip(self, items))]
    pub async fn record(
        &self,
        batch: NewStockOut,
        items: Vec<StockOutLine>,
    ) -> Result<RecordedStockOut, ServiceError> {
        validate_items(&items)?;

        let stock_out_date = batch.stock_out_date.unwrap_or_else(Utc::now);
        let reference_number = match batch.order_transaction_id {
            Some(order_id) => order_id.to_string(),
            None => self.adjustment_sequence.next(stock_out_date),
        };

        let line_count = items.len();
        let order_transaction_id = batch.order_transaction_id;
        let reference_for_txn = reference_number.clone();

        let recorded = self
            .db_pool
            .transaction::<_, RecordedStockOut, ServiceError>(move |txn| {
                Box::pin(async move {
                    let header = stock_out::ActiveModel {
                        reference_number: Set(reference_for_txn.clone()),
                        order_transaction_id: Set(order_transaction_id),
                        stock_out_date: Set(stock_out_date),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| map_header_insert_err(e, &reference_for_txn))?;

                    for item in &items {
                        stock_out_item::ActiveModel {
                            stock_out_id: Set(header.stock_out_id),
                            variation_id: Set(item.variation_id),
                            quantity: Set(item.quantity),
                            reason: Set(item.reason.clone()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;

                        apply_projection_delta(
                            txn,
                            item.variation_id,
                            -item.quantity,
                            stock_out_date,
                        )
                        .await?;
                    }

                    Ok(RecordedStockOut {
                        stock_out_id: header.stock_out_id,
                        reference_number: header.reference_number,
                        stock_out_date: header.stock_out_date,
                    })
                })
            })
            .await
            .map_err(unwrap_txn_err)?;

        info!(
            stock_out_id = %recorded.stock_out_id,
            reference = %recorded.reference_number,
            lines = %line_count,
            "Recorded stock-out batch"
        );

        self.event_sender
            .send(Event::StockOutRecorded {
                stock_out_id: recorded.stock_out_id,
                reference_number: recorded.reference_number.clone(),
                stock_out_date: recorded.stock_out_date,
                line_count,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(recorded)
    }
}

/// Seeds the adjustment sequence from the highest persisted `ADJ-` reference
/// so a restart never reissues a number.
pub async fn seed_adjustment_sequence(db: &DbPool) -> Result<AdjustmentSequence, ServiceError> {
    let adjustment_headers = StockOut::find()
        .filter(stock_out::Column::ReferenceNumber.starts_with("ADJ-"))
        .all(db)
        .await?;

    let last_issued = adjustment_headers
        .iter()
        .filter_map(|h| AdjustmentSequence::parse_sequence(&h.reference_number))
        .max()
        .unwrap_or(0);

    Ok(AdjustmentSequence::new(last_issued))
}

fn validate_items(items: &[StockOutLine]) -> Result<(), ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::ValidationError(
            "Stock-out batch must contain at least one line item".into(),
        ));
    }
    if let Some(item) = items.iter().find(|i| i.quantity <= 0) {
        return Err(ServiceError::ValidationError(format!(
            "Quantity must be positive for variation {}",
            item.variation_id
        )));
    }
    if let Some(item) = items.iter().find(|i| i.reason.trim().is_empty()) {
        return Err(ServiceError::ValidationError(format!(
            "Reason is required for variation {}",
            item.variation_id
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
