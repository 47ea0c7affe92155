//! Order lifecycle business logic.
//!
//! Status is an unconstrained assignment: any status may be set from any
//! other via an update; there is no enforced transition graph. The payment
//! state lives in `core::payment` and is re-derived here only when the price
//! changes. Archiving is the one guarded transition: it requires a
//! delivered, fully paid order.

use crate::{
    core::{invoice, payment as payment_logic},
    entities::{
        Client, Order, OrderItem, Payment, Service,
        enums::{ActivityAction, InvoiceType, OrderStatus, PaymentStatus},
        order, order_item, payment,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Payload for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Owning client, must exist
    pub client_id: i64,
    /// Optional linked individual
    pub contact_id: Option<i64>,
    /// Optional work type
    pub service_id: Option<i64>,
    /// What the order is for
    pub description: String,
    /// Agreed price, finite and non-negative
    pub price: f64,
    /// Initial status; defaults to `pending_quote`
    pub status: Option<OrderStatus>,
    /// Invoice type, when already known
    pub invoice_type: Option<InvoiceType>,
    /// Fiscal invoice number
    pub invoice_number: Option<String>,
}

/// Field changes for an existing order; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    /// New linked individual
    pub contact_id: Option<Option<i64>>,
    /// New work type
    pub service_id: Option<Option<i64>>,
    /// New description
    pub description: Option<String>,
    /// New workflow status (unconstrained)
    pub status: Option<OrderStatus>,
    /// New price; re-derives the payment status
    pub price: Option<f64>,
    /// New invoice type
    pub invoice_type: Option<Option<InvoiceType>>,
    /// New invoice number
    pub invoice_number: Option<Option<String>>,
}

/// Listing filters; defaults list everything except archived orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to one workflow status
    pub status: Option<OrderStatus>,
    /// Restrict to one payment status
    pub payment_status: Option<PaymentStatus>,
    /// Restrict to one client
    pub client_id: Option<i64>,
    /// Include archived orders
    pub include_archived: bool,
}

async fn ensure_client_exists(db: &DatabaseConnection, client_id: i64) -> Result<()> {
    Client::find_by_id(client_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::NotFound {
            entity: "client",
            id: client_id,
        })
}

async fn ensure_contact_exists(db: &DatabaseConnection, contact_id: i64) -> Result<()> {
    Client::find_by_id(contact_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::NotFound {
            entity: "client",
            id: contact_id,
        })
}

async fn ensure_service_exists(db: &DatabaseConnection, service_id: i64) -> Result<()> {
    Service::find_by_id(service_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::NotFound {
            entity: "service",
            id: service_id,
        })
}

/// Creates a new order after validating its references and price.
pub async fn create_order(db: &DatabaseConnection, new: NewOrder) -> Result<order::Model> {
    if new.description.trim().is_empty() {
        return Err(Error::validation("order description cannot be empty"));
    }
    if !new.price.is_finite() || new.price < 0.0 {
        return Err(Error::validation("order price must be non-negative"));
    }

    ensure_client_exists(db, new.client_id).await?;
    if let Some(contact_id) = new.contact_id {
        ensure_contact_exists(db, contact_id).await?;
    }
    if let Some(service_id) = new.service_id {
        ensure_service_exists(db, service_id).await?;
    }

    let now = chrono::Utc::now();
    let row = order::ActiveModel {
        client_id: Set(new.client_id),
        contact_id: Set(new.contact_id),
        service_id: Set(new.service_id),
        description: Set(new.description.trim().to_string()),
        status: Set(new.status.unwrap_or(OrderStatus::PendingQuote)),
        payment_status: Set(PaymentStatus::Pending),
        price: Set(invoice::round2(new.price)),
        payment_amount: Set(0.0),
        invoice_type: Set(new.invoice_type),
        invoice_number: Set(new.invoice_number),
        invoice_subtotal: Set(None),
        invoice_tax: Set(None),
        attachment_url: Set(None),
        is_archived: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "order",
        created.id,
        ActivityAction::Created,
        format!("order created for client {}", created.client_id),
    )
    .await?;

    Ok(created)
}

/// Finds an order by its unique ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Lists orders, newest first. Archived orders are excluded unless
/// explicitly requested.
pub async fn list_orders(
    db: &DatabaseConnection,
    filter: OrderFilter,
) -> Result<Vec<order::Model>> {
    let mut query = Order::find();

    if !filter.include_archived {
        query = query.filter(order::Column::IsArchived.eq(false));
    }
    if let Some(status) = filter.status {
        query = query.filter(order::Column::Status.eq(status));
    }
    if let Some(payment_status) = filter.payment_status {
        query = query.filter(order::Column::PaymentStatus.eq(payment_status));
    }
    if let Some(client_id) = filter.client_id {
        query = query.filter(order::Column::ClientId.eq(client_id));
    }

    query
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies field changes to an order and returns `(before, after)`.
///
/// A price change re-derives the payment status against the accumulated
/// payments. A status change is logged as a `status` event so the caller
/// can decide whether to trigger a notification.
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i64,
    changes: OrderChanges,
) -> Result<(order::Model, order::Model)> {
    let before = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    if let Some(Some(contact_id)) = changes.contact_id {
        ensure_contact_exists(db, contact_id).await?;
    }
    if let Some(Some(service_id)) = changes.service_id {
        ensure_service_exists(db, service_id).await?;
    }

    let mut active: order::ActiveModel = before.clone().into();

    if let Some(contact_id) = changes.contact_id {
        active.contact_id = Set(contact_id);
    }
    if let Some(service_id) = changes.service_id {
        active.service_id = Set(service_id);
    }
    if let Some(description) = changes.description {
        if description.trim().is_empty() {
            return Err(Error::validation("order description cannot be empty"));
        }
        active.description = Set(description.trim().to_string());
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    if let Some(price) = changes.price {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::validation("order price must be non-negative"));
        }
        let price = invoice::round2(price);
        active.price = Set(price);
        active.payment_status = Set(payment_logic::derive_payment_status(
            before.payment_amount,
            price,
        ));
    }
    if let Some(invoice_type) = changes.invoice_type {
        active.invoice_type = Set(invoice_type);
    }
    if let Some(invoice_number) = changes.invoice_number {
        active.invoice_number = Set(invoice_number);
    }
    active.updated_at = Set(chrono::Utc::now());

    let after = active.update(db).await?;

    if after.status == before.status {
        crate::core::activity::record(
            db,
            "order",
            order_id,
            ActivityAction::Updated,
            "order updated",
        )
        .await?;
    } else {
        crate::core::activity::record(
            db,
            "order",
            order_id,
            ActivityAction::Status,
            format!("status changed to {:?}", after.status),
        )
        .await?;
    }

    Ok((before, after))
}

/// Records the public URL of an uploaded order attachment.
pub async fn set_attachment(
    db: &DatabaseConnection,
    order_id: i64,
    url: String,
) -> Result<order::Model> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    let mut active: order::ActiveModel = existing.into();
    active.attachment_url = Set(Some(url));
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await.map_err(Into::into)
}

/// Archives an order. Allowed only when the order is delivered and fully
/// paid; anything else is a conflict.
pub async fn archive_order(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    if existing.status != OrderStatus::Delivered || existing.payment_status != PaymentStatus::Paid
    {
        return Err(Error::conflict(
            "only delivered and fully paid orders can be archived",
        ));
    }

    let mut active: order::ActiveModel = existing.into();
    active.is_archived = Set(true);
    active.updated_at = Set(chrono::Utc::now());
    let archived = active.update(db).await?;

    crate::core::activity::record(
        db,
        "order",
        order_id,
        ActivityAction::Updated,
        "order archived",
    )
    .await?;

    Ok(archived)
}

/// Deletes an order together with its line items and payment rows.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    OrderItem::delete_many()
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(db)
        .await?;
    Payment::delete_many()
        .filter(payment::Column::OrderId.eq(order_id))
        .exec(db)
        .await?;
    existing.delete(db).await?;

    crate::core::activity::record(
        db,
        "order",
        order_id,
        ActivityAction::Deleted,
        "order deleted",
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_client, create_test_order, setup_test_db};

    #[tokio::test]
    async fn test_create_order_validations() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;

        let result = create_order(
            &db,
            NewOrder {
                client_id: client.id,
                contact_id: None,
                service_id: None,
                description: "  ".to_string(),
                price: 100.0,
                status: None,
                invoice_type: None,
                invoice_number: None,
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = create_order(
            &db,
            NewOrder {
                client_id: client.id,
                contact_id: None,
                service_id: None,
                description: "flyers".to_string(),
                price: -1.0,
                status: None,
                invoice_type: None,
                invoice_number: None,
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Unknown client
        let result = create_order(
            &db,
            NewOrder {
                client_id: 999,
                contact_id: None,
                service_id: None,
                description: "flyers".to_string(),
                price: 100.0,
                status: None,
                invoice_type: None,
                invoice_number: None,
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_status_assignment_is_unconstrained() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let order = create_test_order(&db, client.id, 100.0).await?;

        // Forward to delivered, then straight back to pending_quote
        let (_, after) = update_order(
            &db,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(after.status, OrderStatus::Delivered);

        let (before, after) = update_order(
            &db,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::PendingQuote),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(before.status, OrderStatus::Delivered);
        assert_eq!(after.status, OrderStatus::PendingQuote);

        Ok(())
    }

    #[tokio::test]
    async fn test_price_change_rederives_payment_status() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let order = create_test_order(&db, client.id, 100.0).await?;

        crate::core::payment::register_payment(&db, order.id, 100.0, None).await?;

        // Raising the price drops the order back to partial
        let (_, after) = update_order(
            &db,
            order.id,
            OrderChanges {
                price: Some(200.0),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(after.payment_status, PaymentStatus::Partial);

        Ok(())
    }

    #[tokio::test]
    async fn test_archive_guard() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let order = create_test_order(&db, client.id, 100.0).await?;

        // Neither delivered nor paid
        let result = archive_order(&db, order.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));

        // Delivered but unpaid
        update_order(
            &db,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .await?;
        let result = archive_order(&db, order.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));

        // Delivered and paid
        crate::core::payment::register_payment(&db, order.id, 100.0, None).await?;
        let archived = archive_order(&db, order.id).await?;
        assert!(archived.is_archived);

        Ok(())
    }

    #[tokio::test]
    async fn test_archived_orders_hidden_by_default() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let order = create_test_order(&db, client.id, 100.0).await?;
        create_test_order(&db, client.id, 50.0).await?;

        update_order(
            &db,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .await?;
        crate::core::payment::register_payment(&db, order.id, 100.0, None).await?;
        archive_order(&db, order.id).await?;

        let visible = list_orders(&db, OrderFilter::default()).await?;
        assert_eq!(visible.len(), 1);

        let all = list_orders(
            &db,
            OrderFilter {
                include_archived: true,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_client(&db, "Alice").await?;
        let bob = create_test_client(&db, "Bob").await?;
        let order = create_test_order(&db, alice.id, 100.0).await?;
        create_test_order(&db, bob.id, 50.0).await?;

        update_order(
            &db,
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            },
        )
        .await?;

        let ready = list_orders(
            &db,
            OrderFilter {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].client_id, alice.id);

        let bobs = list_orders(
            &db,
            OrderFilter {
                client_id: Some(bob.id),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(bobs.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_order_removes_children() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let order = create_test_order(&db, client.id, 100.0).await?;
        crate::core::payment::register_payment(&db, order.id, 40.0, None).await?;

        delete_order(&db, order.id).await?;

        assert!(get_order_by_id(&db, order.id).await?.is_none());
        let payments = crate::core::payment::list_payments_for_order(&db, order.id).await?;
        assert!(payments.is_empty());

        Ok(())
    }
}
