use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Authorizing actor on stock-in batches. Owned by an external collaborator;
/// joined into history reads for display.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
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
