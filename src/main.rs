#![allow(clippy::result_large_err)]

//! `AdminBlock` server binary.
//!
//! With no arguments it boots the HTTP API. The first CLI argument selects
//! a one-shot job instead: `digest` or `remind`.

use std::{env, sync::Arc};

use adminblock::{
    api::{self, AppState},
    config,
    errors::{Error, Result},
    jobs,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    config::database::create_tables(&db).await?;
    config::database::seed_default_services(&db)
        .await
        .inspect_err(|e| error!("Failed to seed default services: {}", e))?;

    // 5. Jobs run to completion and exit; the default is the HTTP server
    match env::args().nth(1).as_deref() {
        Some("digest") => {
            jobs::digest::run(&db, &app_config).await?;
            return Ok(());
        }
        Some("remind") => {
            let overdue = jobs::remind::run(&db, &app_config).await?;
            info!(overdue, "reminder sweep finished");
            return Ok(());
        }
        Some(other) => {
            return Err(Error::Config {
                message: format!("unknown job '{other}', expected 'digest' or 'remind'"),
            });
        }
        None => {}
    }

    // 6. Serve the API
    let bind_addr = app_config.bind_addr.clone();
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(app_config),
        http: reqwest::Client::new(),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
