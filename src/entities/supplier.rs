use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock-in provenance. Owned by an external collaborator.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub supplier_id: i64,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_in::Entity")]
    StockIn,
}

impl Related<super::stock_in::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockIn.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
