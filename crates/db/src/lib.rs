//! Persistence for trips, participants, activities and links.
//!
//! - [`models`]: row structs and validated payload DTOs.
//! - [`repositories`]: zero-sized repos issuing SQL against a [`DbPool`].
//! - [`gateway`]: the [`PersistenceGateway`] seam and its PostgreSQL impl.
//! - [`memory`]: an in-process gateway for tests and local runs.

use sqlx::postgres::PgPoolOptions;

pub mod gateway;
pub mod memory;
pub mod models;
pub mod repositories;

pub use gateway::{PersistenceGateway, PgGateway, StoreError};
pub use memory::MemoryGateway;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
