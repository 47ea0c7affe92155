//! Service entity - User-editable catalog of work types.
//!
//! Replaces what was originally a fixed enumeration; each service has a
//! display name, an internal key, and a soft-delete flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    /// Unique identifier for the service
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, e.g. `"Large format printing"`
    pub name: String,
    /// Internal slug key, unique among active services
    pub key: String,
    /// Soft delete flag
    pub is_active: bool,
}

/// Defines relationships between Service and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One service declares many typical materials
    #[sea_orm(has_many = "super::service_material::Entity")]
    Materials,
}

impl Related<super::service_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
