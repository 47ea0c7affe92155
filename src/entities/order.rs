//! Order entity - A unit of work for a client.
//!
//! Tracks workflow status, an independent payment state, optional invoice
//! fields, and the accumulated `payment_amount` across registrations.
//! Archived orders are excluded from default listings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{InvoiceType, OrderStatus, PaymentStatus};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning client
    pub client_id: i64,
    /// Optional linked individual when the client is a company
    pub contact_id: Option<i64>,
    /// Optional work type from the service catalog
    pub service_id: Option<i64>,
    /// What the order is for
    pub description: String,
    /// Workflow status (unconstrained assignment)
    pub status: OrderStatus,
    /// Payment state derived from `payment_amount` vs `price`
    pub payment_status: PaymentStatus,
    /// Agreed price
    pub price: f64,
    /// Sum of all registered payments; overpayment is not blocked
    pub payment_amount: f64,
    /// Invoice type, when invoiced
    pub invoice_type: Option<InvoiceType>,
    /// Fiscal invoice number
    pub invoice_number: Option<String>,
    /// IVA-exclusive subtotal (type A invoices)
    pub invoice_subtotal: Option<f64>,
    /// IVA amount (type A invoices)
    pub invoice_tax: Option<f64>,
    /// Public URL of the uploaded PDF attachment, if any
    pub attachment_url: Option<String>,
    /// Archived orders are hidden from default listings
    pub is_archived: bool,
    /// When the order was created
    pub created_at: DateTimeUtc,
    /// When the order was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// One order has many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
    /// One order has many payment registrations
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
