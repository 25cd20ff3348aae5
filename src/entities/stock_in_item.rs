use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One inbound ledger entry. Quantity is a positive count; direction is
/// implied by the table. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_in_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub stock_in_item_id: i64,
    pub stock_in_id: i64,
    pub variation_id: i64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_in::Entity",
        from = "Column::StockInId",
        to = "super::stock_in::Column::StockInId"
    )]
    StockIn,
    #[sea_orm(
        belongs_to = "super::product_variation::Entity",
        from = "Column::VariationId",
        to = "super::product_variation::Column::VariationId"
    )]
    ProductVariation,
}

impl Related<super::stock_in::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockIn.def()
    }
}

impl Related<super::product_variation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
