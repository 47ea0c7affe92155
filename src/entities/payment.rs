//! Payment entity - One row per payment registration against an order.
//!
//! The order's `payment_amount` accumulates these amounts; the rows stay as
//! an audit of the individual registrations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment registration database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the registration
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order the payment applies to
    pub order_id: i64,
    /// Amount paid in this registration
    pub amount: f64,
    /// Public URL of the stored receipt PDF, if one was uploaded
    pub receipt_url: Option<String>,
    /// When the payment was registered
    pub registered_at: DateTimeUtc,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
