//! Material catalog endpoints.

use crate::{
    api::AppState,
    core::material,
    entities::material as material_entity,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMaterialRequest {
    pub name: String,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMaterialRequest {
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub unit: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateMaterialRequest>,
) -> Result<Json<material_entity::Model>> {
    let created = material::create_material(&state.db, body.name, body.unit, body.notes).await?;
    Ok(Json(created))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<material_entity::Model>> {
    let found = material::get_material_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound {
            entity: "material",
            id,
        })?;
    Ok(Json(found))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<material_entity::Model>>> {
    let rows = material::list_materials(&state.db, query.include_inactive).await?;
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMaterialRequest>,
) -> Result<Json<material_entity::Model>> {
    let updated =
        material::update_material(&state.db, id, body.name, body.unit, body.notes).await?;
    Ok(Json(updated))
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<material_entity::Model>> {
    let updated = material::deactivate_material(&state.db, id).await?;
    Ok(Json(updated))
}
