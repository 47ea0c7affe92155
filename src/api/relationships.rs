//! Person-company relationship endpoints.

use crate::{
    api::AppState,
    core::relationship,
    entities::relationship as relationship_entity,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRelationshipRequest {
    pub person_id: i64,
    pub company_id: i64,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ListRelationshipsQuery {
    pub person_id: Option<i64>,
    pub company_id: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRelationshipRequest>,
) -> Result<Json<relationship_entity::Model>> {
    let created = relationship::create_relationship(
        &state.db,
        body.person_id,
        body.company_id,
        body.role,
    )
    .await?;
    Ok(Json(created))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListRelationshipsQuery>,
) -> Result<Json<Vec<relationship_entity::Model>>> {
    let rows =
        relationship::list_relationships(&state.db, query.person_id, query.company_id).await?;
    Ok(Json(rows))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<()>> {
    relationship::delete_relationship(&state.db, id).await?;
    Ok(Json(()))
}
