//! Quote line item - A material or service entry within a quote.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ItemKind;

/// Quote line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quote_items")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning quote
    pub quote_id: i64,
    /// Whether the line refers to a material or a service
    pub kind: ItemKind,
    /// Catalog id of the referenced material/service, if any
    pub reference_id: Option<i64>,
    /// Free-form line description
    pub detail: String,
    /// Quantity
    pub quantity: f64,
    /// Unit price
    pub unit_price: f64,
    /// `quantity * unit_price`, computed at write time
    pub subtotal: f64,
}

/// Defines relationships between quote items and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one quote
    #[sea_orm(
        belongs_to = "super::quote::Entity",
        from = "Column::QuoteId",
        to = "super::quote::Column::Id"
    )]
    Quote,
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
