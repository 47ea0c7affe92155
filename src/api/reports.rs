//! Monthly report endpoint.

use crate::{
    api::AppState,
    core::report::{self, MonthlyReport},
    errors::Result,
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: i32,
    pub month: i32,
}

pub async fn monthly(
    State(state): State<AppState>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<MonthlyReport>> {
    let report = report::generate_monthly_report(&state.db, query.year, query.month).await?;
    Ok(Json(report))
}
