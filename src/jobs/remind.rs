//! Overdue payment reminder job.
//!
//! Finds delivered orders that are still unpaid after the configured number
//! of days and emails one summary to the digest recipient. Nothing is sent
//! when no orders are overdue or no recipient is configured.

use crate::{
    config::AppConfig,
    core::{payment, settings},
    entities::{
        Client, Order,
        enums::{OrderStatus, PaymentStatus},
        order,
    },
    errors::Result,
    integrations::email,
};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, prelude::*};

/// Sweeps for overdue orders and sends the summary email. Returns how many
/// overdue orders were found.
pub async fn run(db: &DatabaseConnection, config: &AppConfig) -> Result<usize> {
    let cutoff = Utc::now() - Duration::days(config.reminder_days);

    let overdue = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Delivered))
        .filter(order::Column::PaymentStatus.ne(PaymentStatus::Paid))
        .filter(order::Column::IsArchived.eq(false))
        .filter(order::Column::UpdatedAt.lt(cutoff))
        .all(db)
        .await?;

    if overdue.is_empty() {
        tracing::info!("no overdue orders, skipping reminder email");
        return Ok(0);
    }

    let settings = settings::get_or_init(db).await?;
    let Some(recipient) = settings.digest_email else {
        tracing::warn!(
            count = overdue.len(),
            "overdue orders found but no digest recipient configured"
        );
        return Ok(overdue.len());
    };

    let mut body = format!(
        "Orders delivered more than {} day(s) ago and still unpaid:\n\n",
        config.reminder_days
    );
    for entry in &overdue {
        let client_name = Client::find_by_id(entry.client_id)
            .one(db)
            .await?
            .map_or_else(|| format!("client {}", entry.client_id), |c| c.name);
        body.push_str(&format!(
            "  #{} {} - {} - outstanding {:.2}\n",
            entry.id,
            client_name,
            entry.description,
            payment::outstanding(entry)
        ));
    }

    let subject = format!("{}: {} overdue order(s)", config.shop_name, overdue.len());
    let http = reqwest::Client::new();
    email::send_email(&http, config, &recipient, &subject, &body).await?;

    tracing::info!(count = overdue.len(), "reminder email sent");
    Ok(overdue.len())
}
