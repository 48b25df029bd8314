//! Shared application state

use crate::{
    auth::TokenService,
    config::Config,
    db::{self, ClinicStore, PostgresClinicStore},
    services::{PaymentGateway, StripeGateway},
    startup, Result,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ClinicStore>,
    pub payments: Arc<dyn PaymentGateway>,
    pub tokens: TokenService,
    /// Present when running against PostgreSQL.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Connect to PostgreSQL, apply migrations, seed the catalog and wire the
    /// Stripe gateway.
    pub async fn new(config: Config) -> Result<Self> {
        let pool = db::connect(&config.database).await?;
        if config.database.run_migrations {
            db::run_migrations(&pool).await?;
        }

        let store: Arc<dyn ClinicStore> = Arc::new(PostgresClinicStore::new(pool.clone()));
        startup::seed_catalog(store.as_ref(), &config.catalog).await?;

        let payments = Arc::new(StripeGateway::new(&config.payment)?);

        let mut state = Self::from_parts(config, store, payments);
        state.db_pool = Some(pool);
        Ok(state)
    }

    /// Build state around caller-provided backends.
    pub fn from_parts(
        config: Config,
        store: Arc<dyn ClinicStore>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let tokens = TokenService::new(&config.auth);
        Self {
            config: Arc::new(config),
            store,
            payments,
            tokens,
            db_pool: None,
        }
    }
}
