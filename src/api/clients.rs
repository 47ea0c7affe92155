//! Client directory endpoints.

use crate::{
    api::AppState,
    core::client::{self, ClientChanges, NewClient},
    entities::{client as client_entity, enums::ClientKind},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub kind: ClientKind,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub notes: Option<String>,
}

/// PUT body; absent fields stay untouched, explicit `null` clears.
#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub tax_id: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    pub kind: Option<ClientKind>,
    pub search: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateClientRequest>,
) -> Result<Json<client_entity::Model>> {
    let created = client::create_client(
        &state.db,
        NewClient {
            name: body.name,
            kind: body.kind,
            email: body.email,
            phone: body.phone,
            address: body.address,
            tax_id: body.tax_id,
            notes: body.notes,
        },
    )
    .await?;
    Ok(Json(created))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<client_entity::Model>> {
    let found = client::get_client_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id,
        })?;
    Ok(Json(found))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> Result<Json<Vec<client_entity::Model>>> {
    let rows = client::list_clients(&state.db, query.kind, query.search.as_deref()).await?;
    Ok(Json(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<Json<client_entity::Model>> {
    let updated = client::update_client(
        &state.db,
        id,
        ClientChanges {
            name: body.name,
            email: body.email,
            phone: body.phone,
            address: body.address,
            tax_id: body.tax_id,
            notes: body.notes,
        },
    )
    .await?;
    Ok(Json(updated))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<()>> {
    client::delete_client(&state.db, id).await?;
    Ok(Json(()))
}
