//! Repository for the `links` table.

use planner_core::types::EntityId;
use sqlx::PgPool;

use crate::models::link::{CreateLink, Link};

const COLUMNS: &str = "id, trip_id, title, url, created_at";

/// Provides create/list operations for trip links.
pub struct LinkRepo;

impl LinkRepo {
    /// Insert a new link, returning its ID.
    pub async fn create(
        pool: &PgPool,
        trip_id: EntityId,
        input: &CreateLink,
    ) -> Result<EntityId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO links (trip_id, title, url) VALUES ($1, $2, $3) RETURNING id")
            .bind(trip_id)
            .bind(&input.title)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    /// List a trip's links in the order they were added.
    pub async fn list_by_trip(pool: &PgPool, trip_id: EntityId) -> Result<Vec<Link>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM links WHERE trip_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Link>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }
}
