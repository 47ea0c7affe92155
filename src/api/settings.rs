//! Notification settings endpoints.

use crate::{
    api::AppState,
    core::settings::{self, SettingsChanges},
    entities::settings as settings_entity,
    errors::Result,
};
use axum::{Json, extract::State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub notify_quoted: Option<bool>,
    pub notify_in_progress: Option<bool>,
    pub notify_ready: Option<bool>,
    pub notify_payment: Option<bool>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub digest_email: Option<Option<String>>,
}

pub async fn fetch(State(state): State<AppState>) -> Result<Json<settings_entity::Model>> {
    let row = settings::get_or_init(&state.db).await?;
    Ok(Json(row))
}

pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<settings_entity::Model>> {
    let updated = settings::update_settings(
        &state.db,
        SettingsChanges {
            notify_quoted: body.notify_quoted,
            notify_in_progress: body.notify_in_progress,
            notify_ready: body.notify_ready,
            notify_payment: body.notify_payment,
            digest_email: body.digest_email,
        },
    )
    .await?;
    Ok(Json(updated))
}
