//! # Cinetrack DB
//!
//! Database pool, migrations and storage backends for the Cinetrack API.
//!
//! The HTTP layer talks to [`UserStore`] and [`WatchlistStore`] trait objects.
//! [`PgStore`] implements them over PostgreSQL; [`MemoryStore`] keeps
//! everything in process for local runs without a database and for tests.
//!
//! # Example
//!
//! ```ignore
//! use cinetrack_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let store = std::sync::Arc::new(PgStore::new(pool));
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{UserStore, WatchlistStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool to `database_url`.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    info!("Connected to database");
    Ok(pool)
}

/// Applies the embedded migrations in `crates/cinetrack-db/migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
