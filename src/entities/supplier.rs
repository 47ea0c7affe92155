//! Supplier entity - Catalog of material suppliers. Soft-deletable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier offers many materials
    #[sea_orm(has_many = "super::supplier_material::Entity")]
    Offers,
}

impl Related<super::supplier_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
