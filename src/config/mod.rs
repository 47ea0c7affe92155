/// Typed application configuration from environment variables
pub mod app;

/// Database connection, schema bootstrap, and catalog seeding
pub mod database;

pub use app::{AppConfig, load_app_configuration};
