//! Service/material join entity - Declares which materials a service type
//! typically consumes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service material declaration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_materials")]
pub struct Model {
    /// Unique identifier for the declaration
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Declaring service
    pub service_id: i64,
    /// Consumed material
    pub material_id: i64,
}

/// Defines relationships between declarations and catalog entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each declaration belongs to one service
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
    /// Each declaration belongs to one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
