//! Activity log entity - Append-only audit trail keyed by
//! (entity type, entity id). Written on create/update/delete/payment/status
//! events; never mutated or deleted by the application.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ActivityAction;

/// Activity log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Kind of entity the event refers to, e.g. `"order"` or `"client"`
    pub entity_type: String,
    /// Primary key of the entity within its kind
    pub entity_id: i64,
    /// What happened
    pub action: ActivityAction,
    /// Human-readable event detail
    pub detail: String,
    /// When the event was recorded
    pub created_at: DateTimeUtc,
}

/// Activity logs have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
