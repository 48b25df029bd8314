//! Database layer - storage trait and backends

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::InMemoryClinicStore;
pub use store::PostgresClinicStore;
pub use traits::ClinicStore;

use crate::{config::DatabaseConfig, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .connect(&config.url)
        .await?;

    tracing::info!(
        pool_min = config.pool_min_size,
        pool_max = config.pool_max_size,
        "Database pool connected"
    );

    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
