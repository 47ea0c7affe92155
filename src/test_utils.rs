//! Shared test utilities for `AdminBlock`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{client, order, quote},
    entities,
    entities::enums::{ClientKind, MarginKind},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test client with sensible defaults.
///
/// # Defaults
/// * `kind`: individual
/// * all contact fields: None
pub async fn create_test_client(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::client::Model> {
    client::create_client(
        db,
        client::NewClient {
            name: name.to_string(),
            kind: ClientKind::Individual,
            email: None,
            phone: None,
            address: None,
            tax_id: None,
            notes: None,
        },
    )
    .await
}

/// Creates a test order with sensible defaults.
///
/// # Defaults
/// * `description`: "Test order"
/// * `status`: pending quote
/// * no contact, service, or invoice fields
pub async fn create_test_order(
    db: &DatabaseConnection,
    client_id: i64,
    price: f64,
) -> Result<entities::order::Model> {
    order::create_order(
        db,
        order::NewOrder {
            client_id,
            contact_id: None,
            service_id: None,
            description: "Test order".to_string(),
            price,
            status: None,
            invoice_type: None,
            invoice_number: None,
        },
    )
    .await
}

/// Creates a test quote with sensible defaults.
///
/// # Defaults
/// * `description`: "Test quote"
/// * `margin`: 10 percent
/// * no outsourced cost, so the total starts at 0.0
pub async fn create_test_quote(
    db: &DatabaseConnection,
    client_id: Option<i64>,
) -> Result<entities::quote::Model> {
    quote::create_quote(
        db,
        quote::NewQuote {
            client_id,
            service_id: None,
            description: "Test quote".to_string(),
            outsourced_cost: None,
            margin_kind: MarginKind::Percent,
            margin_value: 10.0,
        },
    )
    .await
}
