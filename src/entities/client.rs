//! Client entity - An individual or company in the shop directory.
//!
//! Companies may have zero or more linked individuals through the
//! `relationship` entity. Clients are hard-deletable only while nothing
//! references them (orders, quotes, relationships).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ClientKind;

/// Client database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Unique identifier for the client
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (person or company name)
    pub name: String,
    /// Whether this is an individual or a company
    pub kind: ClientKind,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone, digits used for WhatsApp deep links
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Fiscal identifier (CUIT/CUIL)
    pub tax_id: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the client was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One client has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One client has many quotes
    #[sea_orm(has_many = "super::quote::Entity")]
    Quotes,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
