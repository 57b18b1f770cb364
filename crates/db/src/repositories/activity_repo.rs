//! Repository for the `activities` table.

use planner_core::types::EntityId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, trip_id, title, occurs_at, created_at";

/// Provides create/list operations for trip activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity, returning its ID.
    pub async fn create(
        pool: &PgPool,
        trip_id: EntityId,
        input: &CreateActivity,
    ) -> Result<EntityId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO activities (trip_id, title, occurs_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(trip_id)
        .bind(&input.title)
        .bind(input.occurs_at)
        .fetch_one(pool)
        .await
    }

    /// List a trip's activities, ordered by occurrence then creation.
    pub async fn list_by_trip(
        pool: &PgPool,
        trip_id: EntityId,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities WHERE trip_id = $1 ORDER BY occurs_at, created_at"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }
}
