//! Payment registration and reconciliation business logic.
//!
//! Payments accumulate onto the order's `payment_amount`; the payment status
//! is always derived by comparing that total to the price. Overpayment is
//! not blocked, the status simply reads `paid`. Registration is deliberately
//! not wrapped in a database transaction: the order update is the operation,
//! the payment row and the activity entry are best-effort companions written
//! in sequence (matching the system's single-transaction policy, which is
//! reserved for quote promotion).

use crate::{
    core::invoice,
    entities::{
        Order, Payment,
        enums::{ActivityAction, InvoiceType, PaymentStatus},
        order, payment,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Result of a payment registration.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// The order after the accumulation
    pub order: order::Model,
    /// The recorded payment row
    pub payment: payment::Model,
    /// True when this registration moved the order into `paid`
    pub newly_paid: bool,
}

/// Derives the payment status from the accumulated total and the price.
///
/// `paid` iff total >= price and price > 0; `partial` iff 0 < total < price;
/// otherwise `pending`.
#[must_use]
pub fn derive_payment_status(total_paid: f64, price: f64) -> PaymentStatus {
    if price > 0.0 && total_paid >= price {
        PaymentStatus::Paid
    } else if total_paid > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

/// Outstanding balance of an order, never negative.
#[must_use]
pub fn outstanding(order: &order::Model) -> f64 {
    invoice::round2((order.price - order.payment_amount).max(0.0))
}

/// Registers a payment against an order.
///
/// Validates the amount, records the payment row, accumulates the order's
/// `payment_amount`, re-derives `payment_status`, fills the type-A IVA split
/// when it is still missing, and appends an activity entry.
pub async fn register_payment(
    db: &DatabaseConnection,
    order_id: i64,
    amount: f64,
    receipt_url: Option<String>,
) -> Result<PaymentOutcome> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation("payment amount must be positive"));
    }

    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    let payment_row = payment::ActiveModel {
        order_id: Set(order_id),
        amount: Set(amount),
        receipt_url: Set(receipt_url),
        registered_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let payment_row = payment_row.insert(db).await?;

    let was_paid = order.payment_status == PaymentStatus::Paid;
    let new_total = invoice::round2(order.payment_amount + amount);
    let new_status = derive_payment_status(new_total, order.price);

    let mut changes: order::ActiveModel = order.clone().into();
    changes.payment_amount = Set(new_total);
    changes.payment_status = Set(new_status);
    changes.updated_at = Set(chrono::Utc::now());

    // Fill the IVA split once for type A invoices
    if order.invoice_type == Some(InvoiceType::A) && order.invoice_subtotal.is_none() {
        let (subtotal, tax) = invoice::iva_breakdown(order.price);
        changes.invoice_subtotal = Set(Some(subtotal));
        changes.invoice_tax = Set(Some(tax));
    }

    let updated = changes.update(db).await?;

    crate::core::activity::record(
        db,
        "order",
        order_id,
        ActivityAction::Payment,
        format!(
            "payment of {amount:.2} registered, total {new_total:.2} of {:.2}",
            updated.price
        ),
    )
    .await?;

    Ok(PaymentOutcome {
        newly_paid: !was_paid && new_status == PaymentStatus::Paid,
        order: updated,
        payment: payment_row,
    })
}

/// Lists payment registrations for an order, newest first.
pub async fn list_payments_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::OrderId.eq(order_id))
        .order_by_desc(payment::Column::RegisteredAt)
        .all(db)
        .await
        .map_err(Into::into)
}
