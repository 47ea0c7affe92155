//! Activity log endpoint, read-only.

use crate::{api::AppState, core::activity, entities::activity_log, errors::Result};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

const DEFAULT_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub limit: Option<u64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListActivityQuery>,
) -> Result<Json<Vec<activity_log::Model>>> {
    let rows = activity::list(
        &state.db,
        query.entity_type.as_deref(),
        query.entity_id,
        query.limit.unwrap_or(DEFAULT_LIMIT),
    )
    .await?;
    Ok(Json(rows))
}
