//! Service catalog endpoints.

use crate::{
    api::AppState,
    core::service,
    entities::{service as service_entity, service_material},
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddMaterialRequest {
    pub material_id: i64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateServiceRequest>,
) -> Result<Json<service_entity::Model>> {
    let created = service::create_service(&state.db, body.name, body.key).await?;
    Ok(Json(created))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<service_entity::Model>>> {
    let rows = service::list_services(&state.db, query.include_inactive).await?;
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateServiceRequest>,
) -> Result<Json<service_entity::Model>> {
    let updated = service::update_service(&state.db, id, body.name).await?;
    Ok(Json(updated))
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<service_entity::Model>> {
    let updated = service::deactivate_service(&state.db, id).await?;
    Ok(Json(updated))
}

pub async fn add_material(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AddMaterialRequest>,
) -> Result<Json<service_material::Model>> {
    let link = service::add_material(&state.db, id, body.material_id).await?;
    Ok(Json(link))
}

pub async fn remove_material(
    State(state): State<AppState>,
    Path((id, material_id)): Path<(i64, i64)>,
) -> Result<Json<()>> {
    service::remove_material(&state.db, id, material_id).await?;
    Ok(Json(()))
}

pub async fn list_materials(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<service_material::Model>>> {
    let rows = service::list_materials_for_service(&state.db, id).await?;
    Ok(Json(rows))
}
