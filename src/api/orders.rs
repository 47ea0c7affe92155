//! Order endpoints: CRUD, archive, and gateway checkout.
//!
//! Status-change notifications are decided here, after the update has
//! persisted, and dispatched fire-and-forget.

use crate::{
    api::AppState,
    core::{
        notify::NotifyEvent,
        order::{self, NewOrder, OrderChanges, OrderFilter},
    },
    entities::{
        enums::{InvoiceType, OrderStatus, PaymentStatus},
        order as order_entity,
    },
    errors::{Error, Result},
    integrations::gateway,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub client_id: i64,
    pub contact_id: Option<i64>,
    pub service_id: Option<i64>,
    pub description: String,
    pub price: f64,
    pub status: Option<OrderStatus>,
    pub invoice_type: Option<InvoiceType>,
    pub invoice_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default, with = "serde_with::rust::double_option")]
    pub contact_id: Option<Option<i64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub service_id: Option<Option<i64>>,
    pub description: Option<String>,
    pub status: Option<OrderStatus>,
    pub price: Option<f64>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub invoice_type: Option<Option<InvoiceType>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub invoice_number: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub client_id: Option<i64>,
    #[serde(default)]
    pub include_archived: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

fn status_event(status: OrderStatus) -> Option<NotifyEvent> {
    match status {
        OrderStatus::Quoted => Some(NotifyEvent::Quoted),
        OrderStatus::InProgress => Some(NotifyEvent::InProgress),
        OrderStatus::Ready => Some(NotifyEvent::Ready),
        _ => None,
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<order_entity::Model>> {
    let created = order::create_order(
        &state.db,
        NewOrder {
            client_id: body.client_id,
            contact_id: body.contact_id,
            service_id: body.service_id,
            description: body.description,
            price: body.price,
            status: body.status,
            invoice_type: body.invoice_type,
            invoice_number: body.invoice_number,
        },
    )
    .await?;
    Ok(Json(created))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<order_entity::Model>> {
    let found = order::get_order_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "order", id })?;
    Ok(Json(found))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<order_entity::Model>>> {
    let rows = order::list_orders(
        &state.db,
        OrderFilter {
            status: query.status,
            payment_status: query.payment_status,
            client_id: query.client_id,
            include_archived: query.include_archived,
        },
    )
    .await?;
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateOrderRequest>,
) -> Result<Json<order_entity::Model>> {
    let (before, after) = order::update_order(
        &state.db,
        id,
        OrderChanges {
            contact_id: body.contact_id,
            service_id: body.service_id,
            description: body.description,
            status: body.status,
            price: body.price,
            invoice_type: body.invoice_type,
            invoice_number: body.invoice_number,
        },
    )
    .await?;

    if after.status != before.status {
        if let Some(event) = status_event(after.status) {
            crate::api::maybe_notify(&state, &after, event).await;
        }
    }

    Ok(Json(after))
}

pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<order_entity::Model>> {
    let archived = order::archive_order(&state.db, id).await?;
    Ok(Json(archived))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<()>> {
    order::delete_order(&state.db, id).await?;
    Ok(Json(()))
}

/// Creates a gateway checkout for the order's outstanding balance.
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CheckoutResponse>> {
    let found = order::get_order_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "order", id })?;

    let checkout_url = gateway::create_checkout(&state.http, &state.config, &found).await?;
    Ok(Json(CheckoutResponse { checkout_url }))
}
