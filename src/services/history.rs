use crate::{
    db::DbPool,
    entities::employee::{self, Entity as Employee},
    entities::stock_in,
    entities::stock_in_item::{self, Entity as StockInItem},
    entities::stock_out,
    entities::stock_out_item::{self, Entity as StockOutItem},
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{instrument, warn};
use utoipa::ToSchema;

/// One signed entry in the reconstructed movement history. Inbound entries
/// carry a positive quantity and the authorizing employee; outbound entries
/// carry a negative quantity and the removal reason.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockMovementEntry {
    pub reference_number: String,
    pub variation_id: i64,
    pub quantity: i32,
    pub reason: Option<String>,
    pub date: DateTime<Utc>,
    pub employee_name: Option<String>,
}

/// Read-only merge of the two append-only ledgers into one chronological
/// view. Both sources are immutable once committed, so no locking is needed;
/// an uncommitted batch is simply invisible here.
#[derive(Clone)]
pub struct StockHistoryService {
    db_pool: Arc<DbPool>,
}

impl StockHistoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Movement history for one variation, oldest first.
    #[instrument(skip(self))]
    pub async fn history_for(
        &self,
        variation_id: i64,
    ) -> Result<Vec<StockMovementEntry>, ServiceError> {
        let mut entries = self.collect(Some(variation_id)).await?;
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    /// Movement history across all variations, newest first.
    #[instrument(skip(self))]
    pub async fn history_all(&self) -> Result<Vec<StockMovementEntry>, ServiceError> {
        let mut entries = self.collect(None).await?;
        entries.sort_by_key(|e| std::cmp::Reverse(e.date));
        Ok(entries)
    }

    /// Selects both ledgers independently, tags outbound quantities negative,
    /// and concatenates them (inbound first, so a stable sort keeps inbound
    /// entries ahead on timestamp ties).
    async fn collect(
        &self,
        variation_id: Option<i64>,
    ) -> Result<Vec<StockMovementEntry>, ServiceError> {
        let db = self.db_pool.as_ref();

        let mut in_query = StockInItem::find().find_also_related(stock_in::Entity);
        if let Some(id) = variation_id {
            in_query = in_query.filter(stock_in_item::Column::VariationId.eq(id));
        }
        let in_rows = in_query.all(db).await?;

        let employee_names = self
            .employee_names(
                in_rows
                    .iter()
                    .filter_map(|(_, header)| header.as_ref().map(|h| h.employee_id)),
            )
            .await?;

        let mut out_query = StockOutItem::find().find_also_related(stock_out::Entity);
        if let Some(id) = variation_id {
            out_query = out_query.filter(stock_out_item::Column::VariationId.eq(id));
        }
        let out_rows = out_query.all(db).await?;

        let mut entries = Vec::with_capacity(in_rows.len() + out_rows.len());

        for (item, header) in in_rows {
            let Some(header) = header else {
                warn!(stock_in_item_id = %item.stock_in_item_id, "Orphaned stock-in item");
                continue;
            };
            entries.push(StockMovementEntry {
                reference_number: header.reference_number,
                variation_id: item.variation_id,
                quantity: item.quantity,
                reason: None,
                date: header.stock_in_date,
                employee_name: employee_names.get(&header.employee_id).cloned(),
            });
        }

        for (item, header) in out_rows {
            let Some(header) = header else {
                warn!(stock_out_item_id = %item.stock_out_item_id, "Orphaned stock-out item");
                continue;
            };
            entries.push(StockMovementEntry {
                reference_number: header.reference_number,
                variation_id: item.variation_id,
                quantity: -item.quantity,
                reason: Some(item.reason),
                date: header.stock_out_date,
                employee_name: None,
            });
        }

        Ok(entries)
    }

    async fn employee_names(
        &self,
        employee_ids: impl Iterator<Item = i64>,
    ) -> Result<HashMap<i64, String>, ServiceError> {
        let mut ids: Vec<i64> = employee_ids.collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let employees = Employee::find()
            .filter(employee::Column::EmployeeId.is_in(ids))
            .all(self.db_pool.as_ref())
            .await?;

        Ok(employees
            .into_iter()
            .map(|e| (e.employee_id, e.full_name()))
            .collect())
    }
}
