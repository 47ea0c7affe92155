//! Daily digest job.
//!
//! Summarizes today's activity (orders created, payments registered) and
//! emails it to the configured digest recipient. When no recipient is set
//! the job logs and exits without sending.

use crate::{
    config::AppConfig,
    core::settings,
    entities::{Order, Payment, order, payment},
    errors::Result,
    integrations::email,
};
use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseConnection, prelude::*};

/// Builds and sends today's digest.
pub async fn run(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    let settings = settings::get_or_init(db).await?;
    let Some(recipient) = settings.digest_email else {
        tracing::info!("no digest recipient configured, skipping digest");
        return Ok(());
    };

    let now = Utc::now();
    let midnight = now.date_naive().and_hms_opt(0, 0, 0).unwrap_or_default();
    let start = Utc.from_utc_datetime(&midnight);

    let new_orders = Order::find()
        .filter(order::Column::CreatedAt.gte(start))
        .all(db)
        .await?;
    let payments = Payment::find()
        .filter(payment::Column::RegisteredAt.gte(start))
        .all(db)
        .await?;
    let collected: f64 = payments.iter().map(|p| p.amount).sum();

    let mut body = format!(
        "Daily digest for {}\n\nNew orders: {}\n",
        now.date_naive(),
        new_orders.len()
    );
    for entry in &new_orders {
        body.push_str(&format!(
            "  #{} {} ({:.2})\n",
            entry.id, entry.description, entry.price
        ));
    }
    body.push_str(&format!(
        "\nPayments registered: {} totaling {:.2}\n",
        payments.len(),
        collected
    ));

    let subject = format!("{} daily digest", config.shop_name);
    let http = reqwest::Client::new();
    email::send_email(&http, config, &recipient, &subject, &body).await?;

    tracing::info!(
        orders = new_orders.len(),
        payments = payments.len(),
        "digest sent"
    );
    Ok(())
}
