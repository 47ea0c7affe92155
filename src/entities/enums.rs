//! Shared database enumerations.
//!
//! One canonical order status set is defined here and used everywhere
//! (schema, validation, API serialization). All enums are stored as short
//! strings and serialize as `snake_case` in JSON.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a client is a person or a company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    /// An individual person
    #[sea_orm(string_value = "individual")]
    Individual,
    /// A company, which may have linked individuals
    #[sea_orm(string_value = "company")]
    Company,
}

/// Order workflow status. Assignment is unconstrained: any status may be set
/// from any other, there is no enforced transition graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for a quote to be prepared
    #[sea_orm(string_value = "pending_quote")]
    PendingQuote,
    /// Quote sent to the client
    #[sea_orm(string_value = "quoted")]
    Quoted,
    /// Client approved the quote
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Work in progress
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Ready for pickup or delivery
    #[sea_orm(string_value = "ready")]
    Ready,
    /// Handed over to the client
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Cancelled at any point
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Payment state of an order, derived from accumulated payments vs. price.
/// Independent of [`OrderStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Some amount paid, less than the price
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Accumulated payments cover the price
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Invoice type; type `a` carries the 21% IVA subtotal/tax split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(4))")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    /// Type A invoice, IVA discriminated
    #[sea_orm(string_value = "a")]
    A,
    /// Type B invoice, final consumer
    #[sea_orm(string_value = "b")]
    B,
    /// Internal receipt, no fiscal invoice
    #[sea_orm(string_value = "x")]
    X,
}

/// How a quote margin is applied on top of the base cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum MarginKind {
    /// Fixed amount added to the base cost
    #[sea_orm(string_value = "fixed")]
    Fixed,
    /// Percentage of the base cost
    #[sea_orm(string_value = "percent")]
    Percent,
}

/// What a quote/order line item refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Line refers to a catalog material
    #[sea_orm(string_value = "material")]
    Material,
    /// Line refers to a service work type
    #[sea_orm(string_value = "service")]
    Service,
}

/// Kind of event recorded in the activity log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// Entity created
    #[sea_orm(string_value = "created")]
    Created,
    /// Entity fields changed
    #[sea_orm(string_value = "updated")]
    Updated,
    /// Entity removed
    #[sea_orm(string_value = "deleted")]
    Deleted,
    /// Payment registered against an order
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Order status changed
    #[sea_orm(string_value = "status")]
    Status,
}
