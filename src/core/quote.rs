//! Quote business logic - Estimates and their promotion into orders.
//!
//! A quote's total is the base cost (flat outsourced cost when set,
//! otherwise the sum of line item subtotals) plus a fixed or percentage
//! margin, recomputed and persisted on every mutation. Promotion into an
//! order is the one multi-statement operation in the system that runs
//! inside a database transaction: order insert, item copy, and the quote
//! back-reference all persist or none do.

use crate::{
    core::invoice,
    entities::{
        Client, Quote, QuoteItem,
        enums::{ActivityAction, ItemKind, MarginKind, OrderStatus, PaymentStatus},
        order, order_item, quote, quote_item,
    },
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// Payload for creating a quote.
#[derive(Debug, Clone)]
pub struct NewQuote {
    /// Client the quote is for; required before promotion, not creation
    pub client_id: Option<i64>,
    /// Optional work type
    pub service_id: Option<i64>,
    /// What is being quoted
    pub description: String,
    /// Flat supplier cost for outsourced work
    pub outsourced_cost: Option<f64>,
    /// How the margin applies
    pub margin_kind: MarginKind,
    /// Margin amount or percentage
    pub margin_value: f64,
}

/// Field changes for an existing quote; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct QuoteChanges {
    /// New client
    pub client_id: Option<Option<i64>>,
    /// New work type
    pub service_id: Option<Option<i64>>,
    /// New description
    pub description: Option<String>,
    /// New outsourced cost
    pub outsourced_cost: Option<Option<f64>>,
    /// New margin kind
    pub margin_kind: Option<MarginKind>,
    /// New margin value
    pub margin_value: Option<f64>,
}

/// Payload for adding a line item to a quote.
#[derive(Debug, Clone)]
pub struct NewQuoteItem {
    /// Material or service line
    pub kind: ItemKind,
    /// Catalog reference, if any
    pub reference_id: Option<i64>,
    /// Line description
    pub detail: String,
    /// Quantity, must be positive
    pub quantity: f64,
    /// Unit price, must be non-negative
    pub unit_price: f64,
}

/// Computes a quote total from its base cost and margin.
#[must_use]
pub fn compute_total(base_cost: f64, margin_kind: MarginKind, margin_value: f64) -> f64 {
    let total = match margin_kind {
        MarginKind::Fixed => base_cost + margin_value,
        MarginKind::Percent => base_cost * (1.0 + margin_value / 100.0),
    };
    invoice::round2(total)
}

fn validate_margin(margin_value: f64) -> Result<()> {
    if !margin_value.is_finite() || margin_value < 0.0 {
        return Err(Error::validation("margin value must be non-negative"));
    }
    Ok(())
}

async fn recompute_total<C>(db: &C, quote: quote::Model) -> Result<quote::Model>
where
    C: ConnectionTrait,
{
    let items = QuoteItem::find()
        .filter(quote_item::Column::QuoteId.eq(quote.id))
        .all(db)
        .await?;
    let base = quote
        .outsourced_cost
        .unwrap_or_else(|| items.iter().map(|i| i.subtotal).sum());
    let total = compute_total(base, quote.margin_kind, quote.margin_value);

    let mut active: quote::ActiveModel = quote.into();
    active.total = Set(total);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Creates a new quote with its total computed from the (empty) base.
pub async fn create_quote(db: &DatabaseConnection, new: NewQuote) -> Result<quote::Model> {
    if new.description.trim().is_empty() {
        return Err(Error::validation("quote description cannot be empty"));
    }
    validate_margin(new.margin_value)?;
    if let Some(cost) = new.outsourced_cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::validation("outsourced cost must be non-negative"));
        }
    }
    if let Some(client_id) = new.client_id {
        Client::find_by_id(client_id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "client",
                id: client_id,
            })?;
    }

    let now = chrono::Utc::now();
    let base = new.outsourced_cost.unwrap_or(0.0);
    let row = quote::ActiveModel {
        client_id: Set(new.client_id),
        service_id: Set(new.service_id),
        description: Set(new.description.trim().to_string()),
        outsourced_cost: Set(new.outsourced_cost),
        margin_kind: Set(new.margin_kind),
        margin_value: Set(new.margin_value),
        total: Set(compute_total(base, new.margin_kind, new.margin_value)),
        order_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = row.insert(db).await?;

    crate::core::activity::record(
        db,
        "quote",
        created.id,
        ActivityAction::Created,
        "quote created",
    )
    .await?;

    Ok(created)
}

/// Finds a quote by its unique ID.
pub async fn get_quote_by_id(
    db: &DatabaseConnection,
    quote_id: i64,
) -> Result<Option<quote::Model>> {
    Quote::find_by_id(quote_id).one(db).await.map_err(Into::into)
}

/// Lists quotes, newest first.
pub async fn list_quotes(db: &DatabaseConnection) -> Result<Vec<quote::Model>> {
    Quote::find()
        .order_by_desc(quote::Column::CreatedAt)
        .order_by_desc(quote::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the line items of a quote.
pub async fn list_items(db: &DatabaseConnection, quote_id: i64) -> Result<Vec<quote_item::Model>> {
    QuoteItem::find()
        .filter(quote_item::Column::QuoteId.eq(quote_id))
        .order_by_asc(quote_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies field changes to a quote and recomputes its total.
pub async fn update_quote(
    db: &DatabaseConnection,
    quote_id: i64,
    changes: QuoteChanges,
) -> Result<quote::Model> {
    let existing = Quote::find_by_id(quote_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "quote",
            id: quote_id,
        })?;

    if let Some(Some(client_id)) = changes.client_id {
        Client::find_by_id(client_id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "client",
                id: client_id,
            })?;
    }
    if let Some(margin_value) = changes.margin_value {
        validate_margin(margin_value)?;
    }
    if let Some(Some(cost)) = changes.outsourced_cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::validation("outsourced cost must be non-negative"));
        }
    }

    let mut active: quote::ActiveModel = existing.into();
    if let Some(client_id) = changes.client_id {
        active.client_id = Set(client_id);
    }
    if let Some(service_id) = changes.service_id {
        active.service_id = Set(service_id);
    }
    if let Some(description) = changes.description {
        if description.trim().is_empty() {
            return Err(Error::validation("quote description cannot be empty"));
        }
        active.description = Set(description.trim().to_string());
    }
    if let Some(outsourced_cost) = changes.outsourced_cost {
        active.outsourced_cost = Set(outsourced_cost);
    }
    if let Some(margin_kind) = changes.margin_kind {
        active.margin_kind = Set(margin_kind);
    }
    if let Some(margin_value) = changes.margin_value {
        active.margin_value = Set(margin_value);
    }
    let updated = active.update(db).await?;

    let recomputed = recompute_total(db, updated).await?;

    crate::core::activity::record(
        db,
        "quote",
        quote_id,
        ActivityAction::Updated,
        "quote updated",
    )
    .await?;

    Ok(recomputed)
}

/// Adds a line item and recomputes the quote total.
pub async fn add_item(
    db: &DatabaseConnection,
    quote_id: i64,
    item: NewQuoteItem,
) -> Result<(quote::Model, quote_item::Model)> {
    if !item.quantity.is_finite() || item.quantity <= 0.0 {
        return Err(Error::validation("item quantity must be positive"));
    }
    if !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return Err(Error::validation("item unit price must be non-negative"));
    }

    let quote = Quote::find_by_id(quote_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "quote",
            id: quote_id,
        })?;

    let row = quote_item::ActiveModel {
        quote_id: Set(quote_id),
        kind: Set(item.kind),
        reference_id: Set(item.reference_id),
        detail: Set(item.detail),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        subtotal: Set(invoice::round2(item.quantity * item.unit_price)),
        ..Default::default()
    };
    let inserted = row.insert(db).await?;

    let quote = recompute_total(db, quote).await?;
    Ok((quote, inserted))
}

/// Removes a line item and recomputes the quote total.
pub async fn remove_item(
    db: &DatabaseConnection,
    quote_id: i64,
    item_id: i64,
) -> Result<quote::Model> {
    let quote = Quote::find_by_id(quote_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "quote",
            id: quote_id,
        })?;

    let item = QuoteItem::find_by_id(item_id)
        .one(db)
        .await?
        .filter(|i| i.quote_id == quote_id)
        .ok_or(Error::NotFound {
            entity: "quote item",
            id: item_id,
        })?;

    item.delete(db).await?;
    recompute_total(db, quote).await
}

/// Deletes a quote and its items. Promoted quotes are kept as the record
/// behind their order and cannot be deleted.
pub async fn delete_quote(db: &DatabaseConnection, quote_id: i64) -> Result<()> {
    let existing = Quote::find_by_id(quote_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "quote",
            id: quote_id,
        })?;

    if existing.order_id.is_some() {
        return Err(Error::conflict("quote is linked to an order"));
    }

    QuoteItem::delete_many()
        .filter(quote_item::Column::QuoteId.eq(quote_id))
        .exec(db)
        .await?;
    existing.delete(db).await?;

    crate::core::activity::record(
        db,
        "quote",
        quote_id,
        ActivityAction::Deleted,
        "quote deleted",
    )
    .await?;

    Ok(())
}

/// Promotes a quote into a new order.
///
/// Guards run first: the quote must exist, must have a client, and must not
/// already be linked to an order. The promotion itself is a single database
/// transaction: (a) insert the order copying client/service/total/
/// description, (b) copy the quote's line items into order items, (c) set
/// the quote's back-reference. Any failure rolls the whole thing back.
pub async fn promote_quote(
    db: &DatabaseConnection,
    quote_id: i64,
) -> Result<(quote::Model, order::Model)> {
    let quote = Quote::find_by_id(quote_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "quote",
            id: quote_id,
        })?;

    let client_id = quote
        .client_id
        .ok_or_else(|| Error::validation("quote has no client and cannot be promoted"))?;
    if quote.order_id.is_some() {
        return Err(Error::conflict("quote is already linked to an order"));
    }

    let items = QuoteItem::find()
        .filter(quote_item::Column::QuoteId.eq(quote_id))
        .all(db)
        .await?;

    let txn = db.begin().await?;

    let now = chrono::Utc::now();
    let new_order = order::ActiveModel {
        client_id: Set(client_id),
        contact_id: Set(None),
        service_id: Set(quote.service_id),
        description: Set(quote.description.clone()),
        status: Set(OrderStatus::Quoted),
        payment_status: Set(PaymentStatus::Pending),
        price: Set(quote.total),
        payment_amount: Set(0.0),
        invoice_type: Set(None),
        invoice_number: Set(None),
        invoice_subtotal: Set(None),
        invoice_tax: Set(None),
        attachment_url: Set(None),
        is_archived: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let new_order = new_order.insert(&txn).await?;

    for item in items {
        let copy = order_item::ActiveModel {
            order_id: Set(new_order.id),
            kind: Set(item.kind),
            reference_id: Set(item.reference_id),
            detail: Set(item.detail),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            subtotal: Set(item.subtotal),
            ..Default::default()
        };
        copy.insert(&txn).await?;
    }

    let mut back_reference: quote::ActiveModel = quote.into();
    back_reference.order_id = Set(Some(new_order.id));
    back_reference.updated_at = Set(now);
    let quote = back_reference.update(&txn).await?;

    txn.commit().await?;

    crate::core::activity::record(
        db,
        "quote",
        quote_id,
        ActivityAction::Updated,
        format!("quote promoted to order {}", new_order.id),
    )
    .await?;
    crate::core::activity::record(
        db,
        "order",
        new_order.id,
        ActivityAction::Created,
        format!("order created from quote {quote_id}"),
    )
    .await?;

    Ok((quote, new_order))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{Order, OrderItem as OrderItemEntity, order_item};
    use crate::test_utils::{create_test_client, create_test_quote, setup_test_db};
    use sea_orm::PaginatorTrait;

    #[test]
    fn test_compute_total_fixed_margin() {
        assert_eq!(compute_total(100.0, MarginKind::Fixed, 25.0), 125.0);
        assert_eq!(compute_total(0.0, MarginKind::Fixed, 0.0), 0.0);
    }

    #[test]
    fn test_compute_total_percent_margin() {
        assert_eq!(compute_total(100.0, MarginKind::Percent, 30.0), 130.0);
        assert_eq!(compute_total(333.33, MarginKind::Percent, 10.0), 366.66);
    }

    #[tokio::test]
    async fn test_item_mutations_recompute_total() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let quote = create_test_quote(&db, Some(client.id)).await?;
        assert_eq!(quote.total, 0.0);

        let (quote, _) = add_item(
            &db,
            quote.id,
            NewQuoteItem {
                kind: ItemKind::Material,
                reference_id: None,
                detail: "A4 paper".to_string(),
                quantity: 10.0,
                unit_price: 5.0,
            },
        )
        .await?;
        // Base 50 plus the default 10% margin
        assert_eq!(quote.total, 55.0);

        let (quote, item) = add_item(
            &db,
            quote.id,
            NewQuoteItem {
                kind: ItemKind::Service,
                reference_id: None,
                detail: "binding".to_string(),
                quantity: 1.0,
                unit_price: 50.0,
            },
        )
        .await?;
        assert_eq!(quote.total, 110.0);

        let quote = remove_item(&db, quote.id, item.id).await?;
        assert_eq!(quote.total, 55.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_outsourced_cost_overrides_items() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let quote = create_test_quote(&db, Some(client.id)).await?;

        add_item(
            &db,
            quote.id,
            NewQuoteItem {
                kind: ItemKind::Material,
                reference_id: None,
                detail: "ignored by flat cost".to_string(),
                quantity: 1.0,
                unit_price: 999.0,
            },
        )
        .await?;

        let quote = update_quote(
            &db,
            quote.id,
            QuoteChanges {
                outsourced_cost: Some(Some(200.0)),
                ..Default::default()
            },
        )
        .await?;
        // Flat cost 200 plus 10% margin, items ignored
        assert_eq!(quote.total, 220.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_promote_quote_copies_everything() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let quote = create_test_quote(&db, Some(client.id)).await?;
        add_item(
            &db,
            quote.id,
            NewQuoteItem {
                kind: ItemKind::Material,
                reference_id: None,
                detail: "A4 paper".to_string(),
                quantity: 10.0,
                unit_price: 5.0,
            },
        )
        .await?;

        let (quote, new_order) = promote_quote(&db, quote.id).await?;

        assert_eq!(quote.order_id, Some(new_order.id));
        assert_eq!(new_order.client_id, client.id);
        assert_eq!(new_order.price, 55.0);
        assert_eq!(new_order.status, OrderStatus::Quoted);
        assert_eq!(new_order.payment_status, PaymentStatus::Pending);

        let copied = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(new_order.id))
            .all(&db)
            .await?;
        assert_eq!(copied.len(), 1);
        assert_eq!(copied[0].detail, "A4 paper");
        assert_eq!(copied[0].subtotal, 50.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_promote_without_client_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let quote = create_test_quote(&db, None).await?;

        let result = promote_quote(&db, quote.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Nothing was created
        assert_eq!(Order::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_promotion_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let quote = create_test_quote(&db, Some(client.id)).await?;

        promote_quote(&db, quote.id).await?;
        let result = promote_quote(&db, quote.id).await;

        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));
        // Still exactly one order
        assert_eq!(Order::find().count(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_promotion_is_all_or_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let quote = create_test_quote(&db, Some(client.id)).await?;
        add_item(
            &db,
            quote.id,
            NewQuoteItem {
                kind: ItemKind::Material,
                reference_id: None,
                detail: "A4 paper".to_string(),
                quantity: 10.0,
                unit_price: 5.0,
            },
        )
        .await?;

        // Force the item copy step to fail mid-transaction
        db.execute_unprepared("DROP TABLE order_items").await?;

        let result = promote_quote(&db, quote.id).await;
        assert!(result.is_err());

        // The order insert must have been rolled back and the quote's
        // back-reference must still be unset
        assert_eq!(Order::find().count(&db).await?, 0);
        let quote = get_quote_by_id(&db, quote.id).await?.unwrap();
        assert_eq!(quote.order_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_promoted_quote_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let quote = create_test_quote(&db, Some(client.id)).await?;

        promote_quote(&db, quote.id).await?;
        let result = delete_quote(&db, quote.id).await;

        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));
        Ok(())
    }
}
