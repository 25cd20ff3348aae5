pub mod catalog;
pub mod history;
pub mod inventory;
pub mod stock_in;
pub mod stock_out;

use crate::{
    entities::inventory_level::{self, Entity as InventoryLevel},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};

/// Failure-atomicity policy for a batch-processing operation.
///
/// Movement recording is hard-wired `AllOrNothing`; variation creation
/// defaults to `BestEffort`, where each item runs inside a savepoint and a
/// failing item is skipped while the rest commit. The two policies are kept
/// explicit so neither path silently inherits the other's semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFailurePolicy {
    AllOrNothing,
    BestEffort,
}

/// Applies one signed delta to a variation's stock projection inside an open
/// transaction.
///
/// The update is guarded by the projection's `version` column: if another
/// batch committed between our read and our write, zero rows match and the
/// caller's whole batch aborts with `ConcurrentModification`. Negative
/// deltas additionally reject when they would drive the projection below
/// zero.
pub(crate) async fn apply_projection_delta(
    txn: &DatabaseTransaction,
    variation_id: i64,
    delta: i32,
    moved_at: DateTime<Utc>,
) -> Result<i32, ServiceError> {
    let level = InventoryLevel::find_by_id(variation_id)
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No inventory record for variation {}",
                variation_id
            ))
        })?;

    let new_quantity = level.stock_quantity + delta;
    if new_quantity < 0 {
        return Err(ServiceError::InsufficientStock(format!(
            "variation {} has {} on hand, requested {}",
            variation_id, level.stock_quantity, -delta
        )));
    }

    let update = InventoryLevel::update_many()
        .col_expr(
            inventory_level::Column::StockQuantity,
            Expr::value(new_quantity),
        )
        .col_expr(
            inventory_level::Column::Version,
            Expr::value(level.version + 1),
        )
        .col_expr(
            inventory_level::Column::LastUpdatedDate,
            Expr::value(moved_at),
        )
        .filter(inventory_level::Column::VariationId.eq(variation_id))
        .filter(inventory_level::Column::Version.eq(level.version))
        .exec(txn)
        .await?;

    if update.rows_affected == 0 {
        return Err(ServiceError::ConcurrentModification(variation_id));
    }

    Ok(new_quantity)
}
