//! Supplier catalog endpoints, including the per-material offer book.

use crate::{
    api::AppState,
    core::supplier,
    entities::{supplier as supplier_entity, supplier_material},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetOfferRequest {
    pub price: f64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateSupplierRequest>,
) -> Result<Json<supplier_entity::Model>> {
    let created =
        supplier::create_supplier(&state.db, body.name, body.email, body.phone, body.notes)
            .await?;
    Ok(Json(created))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<supplier_entity::Model>> {
    let found = supplier::get_supplier_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound {
            entity: "supplier",
            id,
        })?;
    Ok(Json(found))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<supplier_entity::Model>>> {
    let rows = supplier::list_suppliers(&state.db, query.include_inactive).await?;
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateSupplierRequest>,
) -> Result<Json<supplier_entity::Model>> {
    let updated =
        supplier::update_supplier(&state.db, id, body.name, body.email, body.phone, body.notes)
            .await?;
    Ok(Json(updated))
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<supplier_entity::Model>> {
    let updated = supplier::deactivate_supplier(&state.db, id).await?;
    Ok(Json(updated))
}

pub async fn set_offer(
    State(state): State<AppState>,
    Path((id, material_id)): Path<(i64, i64)>,
    Json(body): Json<SetOfferRequest>,
) -> Result<Json<supplier_material::Model>> {
    let offer = supplier::set_offer(&state.db, id, material_id, body.price).await?;
    Ok(Json(offer))
}

pub async fn list_offers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<supplier_material::Model>>> {
    supplier::get_supplier_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound {
            entity: "supplier",
            id,
        })?;
    let rows = supplier::list_offers_for_supplier(&state.db, id).await?;
    Ok(Json(rows))
}
