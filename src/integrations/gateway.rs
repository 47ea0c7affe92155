//! Payment gateway checkout integration.
//!
//! Creates a hosted checkout for an order's outstanding balance and returns
//! the payment link to hand to the client. Failures surface as upstream
//! errors; the HTTP layer maps them to 502.

use crate::{
    config::AppConfig,
    core::payment,
    entities::order,
    errors::{Error, Result},
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    checkout_url: String,
}

/// Creates a checkout preference for the order's outstanding balance and
/// returns the payment link.
pub async fn create_checkout(
    http: &reqwest::Client,
    config: &AppConfig,
    order: &order::Model,
) -> Result<String> {
    let (Some(url), Some(token)) = (&config.gateway_url, &config.gateway_token) else {
        return Err(Error::Upstream {
            service: "payment gateway",
            message: "gateway is not configured".to_string(),
        });
    };

    let amount = payment::outstanding(order);
    if amount <= 0.0 {
        return Err(Error::validation("order has no outstanding balance"));
    }

    let body = json!({
        "external_reference": order.id.to_string(),
        "title": order.description,
        "amount": amount,
        "currency": "ARS",
    });

    let response = http
        .post(url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::Upstream {
            service: "payment gateway",
            message: format!("request failed: {e}"),
        })?;

    if !response.status().is_success() {
        return Err(Error::Upstream {
            service: "payment gateway",
            message: format!("gateway returned {}", response.status()),
        });
    }

    let parsed: CheckoutResponse = response.json().await.map_err(|e| Error::Upstream {
        service: "payment gateway",
        message: format!("invalid gateway response: {e}"),
    })?;

    tracing::info!(order_id = order.id, amount, "created gateway checkout");

    Ok(parsed.checkout_url)
}
