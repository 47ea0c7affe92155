//! Relationship entity - Links an individual client to a company client.
//!
//! A relationship is unique per `(person_id, company_id)` pair; the core
//! layer rejects duplicates before insert.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Relationship database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relationships")]
pub struct Model {
    /// Unique identifier for the relationship
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Individual client on the person side
    pub person_id: i64,
    /// Company client on the company side
    pub company_id: i64,
    /// Role label, e.g. `"purchasing"` or `"owner"`
    pub role: String,
    /// When the link was created
    pub created_at: DateTimeUtc,
}

/// Both ends point at the client table, so no `Related` impl is provided;
/// lookups go through explicit column filters.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Person side of the link
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::PersonId",
        to = "super::client::Column::Id"
    )]
    Person,
    /// Company side of the link
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::CompanyId",
        to = "super::client::Column::Id"
    )]
    Company,
}

impl ActiveModelBehavior for ActiveModel {}
