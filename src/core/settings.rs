//! Notification settings business logic.
//!
//! The settings table holds exactly one row (`id = 1`). Reads create the
//! row with defaults when it is missing, so callers never see an absent
//! configuration.

use crate::{
    entities::{Settings, enums::ActivityAction, settings},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Row ID of the single settings record.
const SETTINGS_ROW_ID: i32 = 1;

/// Partial update to the settings row. `None` leaves a field untouched;
/// `digest_email` uses the nested option to distinguish "clear" from
/// "keep".
#[derive(Debug, Default, Clone)]
pub struct SettingsChanges {
    pub notify_quoted: Option<bool>,
    pub notify_in_progress: Option<bool>,
    pub notify_ready: Option<bool>,
    pub notify_payment: Option<bool>,
    pub digest_email: Option<Option<String>>,
}

/// Fetches the settings row, inserting defaults on first access.
pub async fn get_or_init(db: &DatabaseConnection) -> Result<settings::Model> {
    if let Some(existing) = Settings::find_by_id(SETTINGS_ROW_ID).one(db).await? {
        return Ok(existing);
    }

    let row = settings::ActiveModel {
        id: Set(SETTINGS_ROW_ID),
        notify_quoted: Set(true),
        notify_in_progress: Set(false),
        notify_ready: Set(true),
        notify_payment: Set(true),
        digest_email: Set(None),
        updated_at: Set(chrono::Utc::now()),
    };
    row.insert(db).await.map_err(Into::into)
}

/// Applies a partial update to the settings row.
pub async fn update_settings(
    db: &DatabaseConnection,
    changes: SettingsChanges,
) -> Result<settings::Model> {
    let existing = get_or_init(db).await?;

    let mut active: settings::ActiveModel = existing.into();
    if let Some(value) = changes.notify_quoted {
        active.notify_quoted = Set(value);
    }
    if let Some(value) = changes.notify_in_progress {
        active.notify_in_progress = Set(value);
    }
    if let Some(value) = changes.notify_ready {
        active.notify_ready = Set(value);
    }
    if let Some(value) = changes.notify_payment {
        active.notify_payment = Set(value);
    }
    if let Some(value) = changes.digest_email {
        active.digest_email = Set(value);
    }
    active.updated_at = Set(chrono::Utc::now());

    let updated = active.update(db).await?;

    crate::core::activity::record(
        db,
        "settings",
        i64::from(SETTINGS_ROW_ID),
        ActivityAction::Updated,
        "notification settings updated",
    )
    .await?;

    Ok(updated)
}
