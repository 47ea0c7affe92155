//! Application configuration loaded from environment variables.
//!
//! Secrets and endpoints come from the environment (a `.env` file is loaded
//! non-fatally at startup); everything has a workable default except the
//! outbound integration endpoints, which stay `None` until configured and
//! make the corresponding feature a logged no-op or a 502.

use crate::errors::{Error, Result};

/// Typed application configuration, loaded once at startup and shared.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// SeaORM database URL
    pub database_url: String,
    /// Directory where uploaded PDFs are stored
    pub upload_dir: String,
    /// Base URL prefixed to stored file names to form public URLs
    pub public_base_url: String,
    /// Shop name used in outbound message templates
    pub shop_name: String,
    /// Payment gateway checkout endpoint
    pub gateway_url: Option<String>,
    /// Payment gateway access token
    pub gateway_token: Option<String>,
    /// Transactional email provider endpoint
    pub email_api_url: Option<String>,
    /// Transactional email provider API key
    pub email_api_key: Option<String>,
    /// Sender address for outbound email
    pub email_from: String,
    /// WhatsApp messaging API endpoint
    pub whatsapp_api_url: Option<String>,
    /// WhatsApp messaging API token
    pub whatsapp_api_key: Option<String>,
    /// Days after delivery before an unpaid order counts as overdue
    pub reminder_days: i64,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Loads the application configuration from the environment.
///
/// # Errors
/// Returns `Error::Config` when a numeric variable fails to parse.
pub fn load_app_configuration() -> Result<AppConfig> {
    let reminder_days = match env_opt("REMINDER_DAYS") {
        Some(raw) => raw.parse::<i64>().map_err(|e| Error::Config {
            message: format!("REMINDER_DAYS must be an integer: {e}"),
        })?,
        None => 7,
    };

    Ok(AppConfig {
        bind_addr: env_or("BIND_ADDR", "127.0.0.1:8080"),
        database_url: env_or("DATABASE_URL", "sqlite://data/adminblock.sqlite?mode=rwc"),
        upload_dir: env_or("UPLOAD_DIR", "data/uploads"),
        public_base_url: env_or("PUBLIC_BASE_URL", "http://127.0.0.1:8080"),
        shop_name: env_or("SHOP_NAME", "AdminBlock"),
        gateway_url: env_opt("GATEWAY_URL"),
        gateway_token: env_opt("GATEWAY_TOKEN"),
        email_api_url: env_opt("EMAIL_API_URL"),
        email_api_key: env_opt("EMAIL_API_KEY"),
        email_from: env_or("EMAIL_FROM", "noreply@adminblock.local"),
        whatsapp_api_url: env_opt("WHATSAPP_API_URL"),
        whatsapp_api_key: env_opt("WHATSAPP_API_KEY"),
        reminder_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Only assert on variables the test environment does not set
        let config = load_app_configuration().unwrap();
        assert!(!config.bind_addr.is_empty());
        assert!(!config.email_from.is_empty());
        assert!(config.reminder_days > 0);
    }
}
