//! Material entity - Catalog of consumable materials.
//!
//! Soft-deletable via `is_active` instead of physical deletion.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the material
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, e.g. `"A4 90g paper"`
    pub name: String,
    /// Unit of measure, e.g. `"ream"` or `"m2"`
    pub unit: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Soft delete flag; inactive materials are hidden from default listings
    pub is_active: bool,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One material has many supplier offers
    #[sea_orm(has_many = "super::supplier_material::Entity")]
    SupplierOffers,
    /// One material appears in many service declarations
    #[sea_orm(has_many = "super::service_material::Entity")]
    ServiceUses,
}

impl Related<super::supplier_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierOffers.def()
    }
}

impl Related<super::service_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceUses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
