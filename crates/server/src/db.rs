use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use crate::config::Settings;
use crate::mailgun::Mailer;
use crate::repo::Store;
use crate::storage::ObjectStore;

/// Shared application state passed to Axum handlers via `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// `None` when the `s3` feature flag is off; uploads are then refused.
    pub objects: Option<Arc<dyn ObjectStore>>,
    pub mailer: Arc<dyn Mailer>,
    pub settings: Arc<Settings>,
}

/// Create the connection pool. Uses `connect_lazy` so no connections open
/// until the first query.
pub fn create_pool(settings: &Settings) -> Result<Pool<Postgres>, String> {
    let database_url = settings
        .database_url
        .as_deref()
        .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

    PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(database_url)
        .map_err(|e| format!("Failed to create database pool: {e}"))
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
