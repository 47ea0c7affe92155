//! Filesystem-backed document storage.
//!
//! Uploaded PDFs (receipts, order attachments) land in `upload_dir` under a
//! random name and are served back by the HTTP layer at `/files/{name}`.
//! The returned value is the full public URL recorded on the owning row.

use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use uuid::Uuid;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Validates and persists a PDF, returning its public URL.
pub async fn store_pdf(config: &AppConfig, bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(Error::validation("uploaded file is empty"));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(Error::validation("uploaded file exceeds 10 MB"));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(Error::validation("uploaded file is not a PDF"));
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let name = format!("{}.pdf", Uuid::new_v4());
    let path = std::path::Path::new(&config.upload_dir).join(&name);
    tokio::fs::write(&path, bytes).await.map_err(|e| Error::Storage {
        message: format!("failed to write {}: {e}", path.display()),
    })?;

    tracing::debug!(file = %name, size = bytes.len(), "stored uploaded PDF");

    Ok(format!(
        "{}/files/{name}",
        config.public_base_url.trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::load_app_configuration;

    fn config_with_dir(dir: &std::path::Path) -> AppConfig {
        let mut config = load_app_configuration().unwrap();
        config.upload_dir = dir.to_string_lossy().into_owned();
        config.public_base_url = "http://shop.test".to_string();
        config
    }

    #[tokio::test]
    async fn test_store_pdf_returns_public_url() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("adminblock-test-{}", Uuid::new_v4()));
        let config = config_with_dir(&dir);

        let url = store_pdf(&config, b"%PDF-1.4 fake body").await?;
        assert!(url.starts_with("http://shop.test/files/"));
        assert!(url.ends_with(".pdf"));

        // The file actually exists under the upload dir
        let name = url.rsplit('/').next().unwrap();
        let on_disk = dir.join(name);
        assert!(tokio::fs::try_exists(&on_disk).await?);

        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_store_pdf_rejects_non_pdf() {
        let dir = std::env::temp_dir().join(format!("adminblock-test-{}", Uuid::new_v4()));
        let config = config_with_dir(&dir);

        let result = store_pdf(&config, b"GIF89a not a pdf").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        let result = store_pdf(&config, b"").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));
    }
}
