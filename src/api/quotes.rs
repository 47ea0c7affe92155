//! Quote endpoints: CRUD, line items, and promotion into orders.

use crate::{
    api::AppState,
    core::{
        notify::NotifyEvent,
        quote::{self, NewQuote, NewQuoteItem, QuoteChanges},
    },
    entities::{
        enums::{ItemKind, MarginKind},
        order as order_entity, quote as quote_entity, quote_item,
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub client_id: Option<i64>,
    pub service_id: Option<i64>,
    pub description: String,
    pub outsourced_cost: Option<f64>,
    pub margin_kind: MarginKind,
    pub margin_value: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuoteRequest {
    #[serde(default, with = "serde_with::rust::double_option")]
    pub client_id: Option<Option<i64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub service_id: Option<Option<i64>>,
    pub description: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub outsourced_cost: Option<Option<f64>>,
    pub margin_kind: Option<MarginKind>,
    pub margin_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub kind: ItemKind,
    pub reference_id: Option<i64>,
    pub detail: String,
    pub quantity: f64,
    pub unit_price: f64,
}

#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub quote: quote_entity::Model,
    pub item: quote_item::Model,
}

#[derive(Debug, Serialize)]
pub struct PromoteResponse {
    pub quote: quote_entity::Model,
    pub order: order_entity::Model,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateQuoteRequest>,
) -> Result<Json<quote_entity::Model>> {
    let created = quote::create_quote(
        &state.db,
        NewQuote {
            client_id: body.client_id,
            service_id: body.service_id,
            description: body.description,
            outsourced_cost: body.outsourced_cost,
            margin_kind: body.margin_kind,
            margin_value: body.margin_value,
        },
    )
    .await?;
    Ok(Json(created))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<quote_entity::Model>> {
    let found = quote::get_quote_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "quote", id })?;
    Ok(Json(found))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<quote_entity::Model>>> {
    let rows = quote::list_quotes(&state.db).await?;
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateQuoteRequest>,
) -> Result<Json<quote_entity::Model>> {
    let updated = quote::update_quote(
        &state.db,
        id,
        QuoteChanges {
            client_id: body.client_id,
            service_id: body.service_id,
            description: body.description,
            outsourced_cost: body.outsourced_cost,
            margin_kind: body.margin_kind,
            margin_value: body.margin_value,
        },
    )
    .await?;
    Ok(Json(updated))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<()>> {
    quote::delete_quote(&state.db, id).await?;
    Ok(Json(()))
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<quote_item::Model>>> {
    quote::get_quote_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "quote", id })?;
    let rows = quote::list_items(&state.db, id).await?;
    Ok(Json(rows))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<AddItemResponse>> {
    let (updated, item) = quote::add_item(
        &state.db,
        id,
        NewQuoteItem {
            kind: body.kind,
            reference_id: body.reference_id,
            detail: body.detail,
            quantity: body.quantity,
            unit_price: body.unit_price,
        },
    )
    .await?;
    Ok(Json(AddItemResponse {
        quote: updated,
        item,
    }))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(i64, i64)>,
) -> Result<Json<quote_entity::Model>> {
    let updated = quote::remove_item(&state.db, id, item_id).await?;
    Ok(Json(updated))
}

/// Promotes the quote into a new order and notifies the client that their
/// order has been quoted, when enabled.
pub async fn promote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PromoteResponse>> {
    let (promoted, new_order) = quote::promote_quote(&state.db, id).await?;

    crate::api::maybe_notify(&state, &new_order, NotifyEvent::Quoted).await;

    Ok(Json(PromoteResponse {
        quote: promoted,
        order: new_order,
    }))
}
