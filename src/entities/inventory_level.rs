use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-variation stock projection, one row per product variation.
///
/// This is a cache of the movement ledger, not independent truth: for every
/// variation `stock_quantity` must equal the sum of committed stock-in item
/// quantities minus committed stock-out item quantities. Only the movement
/// recorders mutate it, always inside the same transaction as the ledger
/// rows, and always through the `version` optimistic-concurrency check.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_levels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub variation_id: i64,
    pub stock_quantity: i32,
    pub version: i32,
    pub last_updated_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_variation::Entity",
        from = "Column::VariationId",
        to = "super::product_variation::Column::VariationId"
    )]
    ProductVariation,
}

impl Related<super::product_variation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
