//! Monthly expense endpoints.

use crate::{
    api::AppState,
    core::expense,
    entities::monthly_expense,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub year: i32,
    pub month: i32,
    pub category: String,
    pub amount: f64,
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<Json<monthly_expense::Model>> {
    let created = expense::create_expense(
        &state.db,
        body.year,
        body.month,
        body.category,
        body.amount,
        body.detail,
    )
    .await?;
    Ok(Json(created))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<monthly_expense::Model>>> {
    let rows = expense::list_expenses(&state.db, query.year, query.month).await?;
    Ok(Json(rows))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<()>> {
    expense::delete_expense(&state.db, id).await?;
    Ok(Json(()))
}
