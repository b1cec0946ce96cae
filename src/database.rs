use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::{config::DatabaseConfig, repositories::Repositories};

static MIGRATOR: Migrator = sqlx::migrate!("./src/migrations");

// Пул соединений с Postgres, репозитории получают его клон
#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.url)
            .await?;

        info!(pool_size = config.pool_size, "Database pool created");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!(migrations = MIGRATOR.iter().count(), "Running database migrations");
        MIGRATOR.run(&self.pool).await
    }

    pub fn repositories(&self) -> Repositories {
        Repositories::postgres(self.pool.clone())
    }
}
