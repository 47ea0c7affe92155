//! Supplier/material join entity - The price a supplier currently offers
//! for a material. One row per (supplier, material) pair, upserted when the
//! offer changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier offer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_materials")]
pub struct Model {
    /// Unique identifier for the offer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Offering supplier
    pub supplier_id: i64,
    /// Offered material
    pub material_id: i64,
    /// Current offer price
    pub price: f64,
    /// When the offer was last refreshed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between offers and catalog entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each offer belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// Each offer belongs to one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
