//! Settings entity - Typed single-row notification toggles.
//!
//! Replaces a string-keyed key/value table with named boolean fields; the
//! core layer always reads and writes the row with `id = 1`, creating it
//! with defaults on first access.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settings database model (single row, `id = 1`)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    /// Always 1; the table holds exactly one row
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Notify the client when an order becomes quoted
    pub notify_quoted: bool,
    /// Notify the client when work starts
    pub notify_in_progress: bool,
    /// Notify the client when the order is ready
    pub notify_ready: bool,
    /// Notify the client when the order becomes fully paid
    pub notify_payment: bool,
    /// Recipient for the daily digest job; digest is skipped when unset
    pub digest_email: Option<String>,
    /// When the settings were last modified
    pub updated_at: DateTimeUtc,
}

/// Settings have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
