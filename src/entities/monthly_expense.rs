//! Monthly expense entity - Manually entered expense records used purely
//! for reporting. No relation to orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: i32,
    /// Expense category, e.g. `"rent"` or `"toner"`
    pub category: String,
    /// Expense amount
    pub amount: f64,
    /// Optional detail
    pub detail: Option<String>,
}

/// Monthly expenses have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
