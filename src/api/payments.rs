//! Payment registration and PDF upload endpoints.
//!
//! Both accept `multipart/form-data`: a payment carries an `amount` field
//! and an optional `receipt` PDF; an attachment upload carries a single
//! `file` part. Stored files are served back under `/files/{name}`.

use crate::{
    api::AppState,
    core::{notify::NotifyEvent, order, payment},
    entities::{order as order_entity, payment as payment_entity},
    errors::{Error, Result},
    integrations::storage,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub order: order_entity::Model,
    pub payment: payment_entity::Model,
}

async fn read_part_bytes(part: axum::extract::multipart::Field<'_>) -> Result<Vec<u8>> {
    part.bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| Error::validation(format!("could not read upload: {e}")))
}

/// Registers a payment against an order. Multipart fields: `amount`
/// (required, decimal) and `receipt` (optional PDF).
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<PaymentResponse>> {
    // The order must exist before any uploaded file is persisted, so a
    // rejected request leaves nothing behind in the upload directory
    order::get_order_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "order", id })?;

    let mut amount: Option<f64> = None;
    let mut receipt: Option<Vec<u8>> = None;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed multipart body: {e}")))?
    {
        match part.name() {
            Some("amount") => {
                let raw = part
                    .text()
                    .await
                    .map_err(|e| Error::validation(format!("could not read amount: {e}")))?;
                let parsed = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| Error::validation("amount must be a decimal number"))?;
                amount = Some(parsed);
            }
            Some("receipt") => {
                receipt = Some(read_part_bytes(part).await?);
            }
            _ => {}
        }
    }

    let amount = amount.ok_or_else(|| Error::validation("missing amount field"))?;

    // Store the receipt first so the payment row can reference it
    let receipt_url = match receipt {
        Some(bytes) => Some(storage::store_pdf(&state.config, &bytes).await?),
        None => None,
    };

    let outcome = payment::register_payment(&state.db, id, amount, receipt_url).await?;

    if outcome.newly_paid {
        crate::api::maybe_notify(&state, &outcome.order, NotifyEvent::PaymentConfirmed).await;
    }

    Ok(Json(PaymentResponse {
        order: outcome.order,
        payment: outcome.payment,
    }))
}

pub async fn list_for_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<payment_entity::Model>>> {
    order::get_order_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "order", id })?;
    let rows = payment::list_payments_for_order(&state.db, id).await?;
    Ok(Json(rows))
}

/// Uploads an order attachment PDF. Multipart field: `file`.
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<order_entity::Model>> {
    // Same ordering as payment registration: 404 before the file lands
    order::get_order_by_id(&state.db, id)
        .await?
        .ok_or(Error::NotFound { entity: "order", id })?;

    let mut file: Option<Vec<u8>> = None;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed multipart body: {e}")))?
    {
        if part.name() == Some("file") {
            file = Some(read_part_bytes(part).await?);
        }
    }

    let bytes = file.ok_or_else(|| Error::validation("missing file field"))?;
    let url = storage::store_pdf(&state.config, &bytes).await?;
    let updated = order::set_attachment(&state.db, id, url).await?;
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::api::{self, AppState};
    use crate::config::load_app_configuration;
    use crate::core::payment;
    use crate::errors::Result;
    use crate::test_utils::{create_test_client, create_test_order, setup_test_db};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use sea_orm::DatabaseConnection;
    use std::{path::PathBuf, sync::Arc};
    use tower::ServiceExt;
    use uuid::Uuid;

    const BOUNDARY: &str = "upload-test-boundary";

    async fn test_router() -> Result<(Router, Arc<DatabaseConnection>, PathBuf)> {
        let db = Arc::new(setup_test_db().await?);
        let upload_dir =
            std::env::temp_dir().join(format!("adminblock-api-test-{}", Uuid::new_v4()));

        let mut config = load_app_configuration()?;
        config.upload_dir = upload_dir.to_string_lossy().into_owned();

        let state = AppState {
            db: db.clone(),
            config: Arc::new(config),
            http: reqwest::Client::new(),
        };
        Ok((api::router(state), db, upload_dir))
    }

    fn payment_body(amount: &str, receipt: Option<&str>) -> String {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"amount\"\r\n\r\n\
             {amount}\r\n"
        );
        if let Some(receipt) = receipt {
            body.push_str(&format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"receipt\"; filename=\"r.pdf\"\r\n\
                 Content-Type: application/pdf\r\n\r\n\
                 {receipt}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn stored_file_count(dir: &PathBuf) -> usize {
        let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
            return 0;
        };
        let mut count = 0;
        while let Ok(Some(_)) = entries.next_entry().await {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_payment_on_missing_order_stores_no_file() -> Result<()> {
        let (router, _db, upload_dir) = test_router().await?;

        let body = payment_body("50", Some("%PDF-1.4 receipt"));
        let response = router
            .oneshot(multipart_request("/orders/999/payments", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        // The receipt must not have been persisted on the 404 path
        assert_eq!(stored_file_count(&upload_dir).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_attachment_on_missing_order_stores_no_file() -> Result<()> {
        let (router, _db, upload_dir) = test_router().await?;

        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"a.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 attachment\r\n\
             --{BOUNDARY}--\r\n"
        );
        let response = router
            .oneshot(multipart_request("/orders/999/attachment", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(stored_file_count(&upload_dir).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_with_receipt_stores_file() -> Result<()> {
        let (router, db, upload_dir) = test_router().await?;
        let client = create_test_client(&db, "Alice").await?;
        let order = create_test_order(&db, client.id, 100.0).await?;

        let body = payment_body("60", Some("%PDF-1.4 receipt"));
        let uri = format!("/orders/{}/payments", order.id);
        let response = router
            .oneshot(multipart_request(&uri, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stored_file_count(&upload_dir).await, 1);

        let rows = payment::list_payments_for_order(&db, order.id).await?;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].receipt_url.is_some());

        tokio::fs::remove_dir_all(&upload_dir).await?;
        Ok(())
    }
}
