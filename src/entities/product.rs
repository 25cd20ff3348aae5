use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product. Owned by the catalog collaborator; the ledger only joins
/// against it for display names.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i64,
    pub name: String,
    pub status_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_variation::Entity")]
    ProductVariation,
}

impl Related<super::product_variation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductVariation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
