//! # Gatehouse DB
//!
//! Implementations of the [`UserStore`](gatehouse_models::UserStore) contract:
//!
//! - [`InMemoryUserStore`]: process-local, for tests and database-less runs
//! - [`PgUserStore`]: PostgreSQL via SQLx
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_db::{PgUserStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! let store = PgUserStore::new(pool);
//! ```

mod memory;
mod postgres;

use std::sync::Arc;

use gatehouse_config::DatabaseConfig;
use gatehouse_models::UserStore;
use sqlx::postgres::PgPoolOptions;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Creates a PostgreSQL connection pool.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies the bundled SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Picks the store for the given configuration: Postgres when a URL is
/// configured, in-memory otherwise.
pub async fn init_user_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    match &config.url {
        Some(url) => {
            let pool = init_db_pool(url, config.max_connections).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        None => Ok(Arc::new(InMemoryUserStore::new())),
    }
}
