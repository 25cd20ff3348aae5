pub mod common;
pub mod history;
pub mod inventory;
pub mod stock_in;
pub mod stock_out;
pub mod variations;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub stock_in: Arc<crate::services::stock_in::StockInService>,
    pub stock_out: Arc<crate::services::stock_out::StockOutService>,
    pub inventory: Arc<crate::services::inventory::InventoryService>,
    pub history: Arc<crate::services::history::StockHistoryService>,
    pub catalog: Arc<crate::services::catalog::CatalogService>,
}

impl AppServices {
    /// Builds the service container. Seeds the adjustment reference sequence
    /// from the store, so it must run after migrations.
    pub async fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self, ServiceError> {
        let adjustment_sequence = Arc::new(
            crate::services::stock_out::seed_adjustment_sequence(db_pool.as_ref()).await?,
        );

        Ok(Self {
            stock_in: Arc::new(crate::services::stock_in::StockInService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            stock_out: Arc::new(crate::services::stock_out::StockOutService::new(
                db_pool.clone(),
                event_sender.clone(),
                adjustment_sequence,
            )),
            inventory: Arc::new(crate::services::inventory::InventoryService::new(
                db_pool.clone(),
            )),
            history: Arc::new(crate::services::history::StockHistoryService::new(
                db_pool.clone(),
            )),
            catalog: Arc::new(crate::services::catalog::CatalogService::new(
                db_pool,
                event_sender,
            )),
        })
    }
}
