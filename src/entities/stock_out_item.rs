use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One outbound ledger entry. Carries the free-text reason the stock left
/// (e.g. "damaged", "sold"). Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_out_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub stock_out_item_id: i64,
    pub stock_out_id: i64,
    pub variation_id: i64,
    pub quantity: i32,
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_out::Entity",
        from = "Column::StockOutId",
        to = "super::stock_out::Column::StockOutId"
    )]
    StockOut,
    #[sea_orm(
        belongs_to = "super::product_variation::Entity",
        from = "Column::VariationId",
        to = "super::product_variation::Column::VariationId"
    )]
    ProductVariation,
}

impl Related<super::stock_out::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockOut.def()
    }
}

impl Related<super::product_variation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
