//! Quote entity - A pre-order cost/price estimate.
//!
//! A quote holds either a flat outsourced cost or itemized lines, and
//! computes its total from the base cost plus a fixed or percentage margin.
//! `order_id` is the back-reference set when the quote is promoted; a quote
//! may be promoted to exactly one order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::MarginKind;

/// Quote database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    /// Unique identifier for the quote
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Optional client the quote is prepared for; required before promotion
    pub client_id: Option<i64>,
    /// Optional work type from the service catalog
    pub service_id: Option<i64>,
    /// What is being quoted
    pub description: String,
    /// Flat supplier price for outsourced work; lines are used when unset
    pub outsourced_cost: Option<f64>,
    /// How the margin is applied
    pub margin_kind: MarginKind,
    /// Margin amount or percentage, depending on `margin_kind`
    pub margin_value: f64,
    /// Base cost plus margin, recomputed on every mutation
    pub total: f64,
    /// Back-reference to the order this quote was promoted into
    pub order_id: Option<i64>,
    /// When the quote was created
    pub created_at: DateTimeUtc,
    /// When the quote was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Quote and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each quote optionally belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// One quote has many line items
    #[sea_orm(has_many = "super::quote_item::Entity")]
    Items,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::quote_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
