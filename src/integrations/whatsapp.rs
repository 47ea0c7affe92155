//! WhatsApp message delivery.
//!
//! Notifications never block or fail the operation that triggered them:
//! `dispatch` spawns the send and only traces the outcome. When no API is
//! configured the send is a logged no-op and the UI can still fall back to
//! the `wa.me` deep link built by the core layer.

use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use serde_json::json;

/// Sends one WhatsApp message through the configured API.
pub async fn send_message(
    http: &reqwest::Client,
    config: &AppConfig,
    phone: &str,
    text: &str,
) -> Result<()> {
    let (Some(url), Some(key)) = (&config.whatsapp_api_url, &config.whatsapp_api_key) else {
        // No API configured; surface the deep link so the message can
        // still be sent manually
        match crate::core::notify::whatsapp_link(phone, text) {
            Some(link) => tracing::info!(link, "whatsapp API not configured, send manually"),
            None => tracing::debug!(phone, "whatsapp API not configured, skipping send"),
        }
        return Ok(());
    };

    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(Error::validation("client has no usable phone number"));
    }

    let payload = json!({
        "to": digits,
        "type": "text",
        "text": { "body": text },
    });

    let response = http
        .post(url)
        .header("Authorization", format!("Bearer {key}"))
        .json(&payload)
        .send()
        .await
        .map_err(|e| Error::Upstream {
            service: "whatsapp",
            message: format!("request failed: {e}"),
        })?;

    if !response.status().is_success() {
        return Err(Error::Upstream {
            service: "whatsapp",
            message: format!("API returned {}", response.status()),
        });
    }

    Ok(())
}

/// Fire and forget delivery. The triggering operation has already
/// succeeded; a failed send is traced and otherwise dropped.
pub fn dispatch(http: reqwest::Client, config: AppConfig, phone: String, text: String) {
    tokio::spawn(async move {
        match send_message(&http, &config, &phone, &text).await {
            Ok(()) => tracing::info!(phone, "whatsapp notification dispatched"),
            Err(e) => tracing::warn!(phone, error = %e, "whatsapp notification failed"),
        }
    });
}
