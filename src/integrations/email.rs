//! Transactional email delivery.
//!
//! Posts a JSON payload to the configured provider endpoint. When the
//! provider is unconfigured, sending is a logged no-op so the rest of the
//! system keeps working in development.

use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use serde_json::json;

/// Sends one email through the configured provider.
pub async fn send_email(
    http: &reqwest::Client,
    config: &AppConfig,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<()> {
    let (Some(url), Some(key)) = (&config.email_api_url, &config.email_api_key) else {
        tracing::debug!(to, subject, "email provider not configured, skipping send");
        return Ok(());
    };

    let payload = json!({
        "from": config.email_from,
        "to": to,
        "subject": subject,
        "text": body,
    });

    let response = http
        .post(url)
        .header("Authorization", format!("Bearer {key}"))
        .json(&payload)
        .send()
        .await
        .map_err(|e| Error::Upstream {
            service: "email provider",
            message: format!("request failed: {e}"),
        })?;

    if !response.status().is_success() {
        return Err(Error::Upstream {
            service: "email provider",
            message: format!("provider returned {}", response.status()),
        });
    }

    tracing::info!(to, subject, "sent email");
    Ok(())
}
