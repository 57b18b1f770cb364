//! Repository for the `trips` table.

use planner_core::types::EntityId;
use sqlx::PgPool;

use crate::models::trip::{CreateTrip, Trip, UpdateTrip};
use crate::repositories::ParticipantRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, destination, owner_name, owner_email, starts_at, ends_at, is_confirmed, created_at";

/// Provides CRUD operations for trips.
pub struct TripRepo;

impl TripRepo {
    /// Insert a trip and one participant per invited email, atomically.
    ///
    /// Returns the new trip's ID. Either both the trip and all invitees are
    /// stored, or nothing is.
    pub async fn create(pool: &PgPool, input: &CreateTrip) -> Result<EntityId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: EntityId = sqlx::query_scalar(
            "INSERT INTO trips (destination, owner_name, owner_email, starts_at, ends_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.destination)
        .bind(&input.owner_name)
        .bind(&input.owner_email)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(&mut *tx)
        .await?;

        let invited = ParticipantRepo::insert_many(&mut *tx, id, &input.emails_to_invite).await?;

        tx.commit().await?;
        tracing::debug!(trip_id = %id, invited = invited.len(), "Trip inserted");
        Ok(id)
    }

    /// Find a trip by its ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace destination and dates. `is_confirmed` is left untouched.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: EntityId, input: &UpdateTrip) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE trips SET destination = $2, starts_at = $3, ends_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&input.destination)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a trip as confirmed. Confirming twice is a no-op.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn confirm(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE trips SET is_confirmed = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
