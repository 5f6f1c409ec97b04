//! PostgreSQL storage bootstrap: connection pool and schema migrations

mod migrations;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::StorageConfig;
use crate::domain::DomainError;

pub use migrations::{account_migrations, run_account_migrations, Migration, PostgresMigrator};

/// Connect to PostgreSQL using the configured (or `DATABASE_URL`) URL
pub async fn connect(config: &StorageConfig) -> Result<PgPool, DomainError> {
    let database_url = config.resolved_database_url().ok_or_else(|| {
        DomainError::configuration(
            "storage.database_url or DATABASE_URL is required for the postgres backend",
        )
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&database_url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;
    info!("PostgreSQL connection established");

    Ok(pool)
}
