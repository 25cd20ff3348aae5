use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Header of one outbound stock movement batch. The reference number is
/// copied from the originating order when there is one, otherwise derived
/// from the adjustment sequence.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_outs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub stock_out_id: i64,
    #[sea_orm(unique)]
    pub reference_number: String,
    pub order_transaction_id: Option<Uuid>,
    pub stock_out_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_out_item::Entity")]
    StockOutItem,
}

impl Related<super::stock_out_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockOutItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
