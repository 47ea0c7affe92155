//! HTTP API layer.
//!
//! Thin axum handlers over `core`: extract, validate into core payloads,
//! call the business logic, serialize the model back out. Errors carry
//! their HTTP status in their kind; no handler inspects message text.

pub mod activity;
pub mod clients;
pub mod expenses;
pub mod materials;
pub mod orders;
pub mod payments;
pub mod quotes;
pub mod relationships;
pub mod reports;
pub mod services;
pub mod settings;
pub mod suppliers;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    core::notify::{self, NotifyEvent},
    entities::{client, order},
    errors::Error,
};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: Arc<DatabaseConnection>,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Shared HTTP client for outbound integrations
    pub http: reqwest::Client,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Error::Config { .. } | Error::Storage { .. } | Error::Database(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Checks the settings toggles and, when enabled, dispatches a WhatsApp
/// notification for an order event. Never fails the calling operation.
pub(crate) async fn maybe_notify(state: &AppState, order: &order::Model, event: NotifyEvent) {
    let settings = match crate::core::settings::get_or_init(&state.db).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "could not load settings, skipping notification");
            return;
        }
    };
    if !notify::should_notify(&settings, event) {
        return;
    }

    let client: Option<client::Model> =
        match crate::core::client::get_client_by_id(&state.db, order.client_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "could not load client, skipping notification");
                return;
            }
        };
    let Some(client) = client else { return };
    let Some(phone) = client.phone.clone() else {
        tracing::debug!(client_id = client.id, "client has no phone, skipping notification");
        return;
    };

    let text = notify::render_message(event, &client, &order.description, &state.config.shop_name);
    crate::integrations::whatsapp::dispatch(
        state.http.clone(),
        state.config.as_ref().clone(),
        phone,
        text,
    );
}

/// Builds the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let files = ServeDir::new(state.config.upload_dir.clone());

    Router::new()
        .route("/health", get(health))
        // Client directory
        .route("/clients", get(clients::list).post(clients::create))
        .route(
            "/clients/{id}",
            get(clients::fetch)
                .patch(clients::update)
                .delete(clients::remove),
        )
        // Person-company relationships
        .route(
            "/relationships",
            get(relationships::list).post(relationships::create),
        )
        .route("/relationships/{id}", delete(relationships::remove))
        // Orders
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{id}",
            get(orders::fetch)
                .patch(orders::update)
                .delete(orders::remove),
        )
        .route("/orders/{id}/archive", post(orders::archive))
        .route("/orders/{id}/checkout", post(orders::checkout))
        .route("/orders/{id}/attachment", post(payments::upload_attachment))
        .route(
            "/orders/{id}/payments",
            get(payments::list_for_order).post(payments::register),
        )
        // Quotes
        .route("/quotes", get(quotes::list).post(quotes::create))
        .route(
            "/quotes/{id}",
            get(quotes::fetch)
                .patch(quotes::update)
                .delete(quotes::remove),
        )
        .route(
            "/quotes/{id}/items",
            get(quotes::list_items).post(quotes::add_item),
        )
        .route("/quotes/{id}/items/{item_id}", delete(quotes::remove_item))
        .route("/quotes/{id}/promote", post(quotes::promote))
        // Catalogs
        .route("/materials", get(materials::list).post(materials::create))
        .route(
            "/materials/{id}",
            get(materials::fetch)
                .patch(materials::update)
                .delete(materials::deactivate),
        )
        .route("/suppliers", get(suppliers::list).post(suppliers::create))
        .route(
            "/suppliers/{id}",
            get(suppliers::fetch)
                .patch(suppliers::update)
                .delete(suppliers::deactivate),
        )
        .route("/suppliers/{id}/materials", get(suppliers::list_offers))
        .route(
            "/suppliers/{id}/materials/{material_id}",
            put(suppliers::set_offer),
        )
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/{id}",
            patch(services::update).delete(services::deactivate),
        )
        .route(
            "/services/{id}/materials",
            get(services::list_materials).post(services::add_material),
        )
        .route(
            "/services/{id}/materials/{material_id}",
            delete(services::remove_material),
        )
        // Expenses and reporting
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/{id}", delete(expenses::remove))
        .route("/reports/monthly", get(reports::monthly))
        // Audit trail and settings
        .route("/activity", get(activity::list))
        .route("/settings", get(settings::fetch).patch(settings::update))
        // Uploaded PDFs
        .nest_service("/files", files)
        // Room for the largest accepted PDF plus multipart framing
        .layer(DefaultBodyLimit::max(
            crate::integrations::storage::MAX_UPLOAD_BYTES + 64 * 1024,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
