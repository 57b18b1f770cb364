//! Repository for the `participants` table.

use planner_core::types::EntityId;
use sqlx::{PgExecutor, PgPool};

use crate::models::participant::Participant;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, trip_id, email, is_confirmed, created_at";

/// Provides read/write operations for trip participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Bulk-insert unconfirmed participants for a trip.
    ///
    /// Accepts any executor so trip creation can run it inside its
    /// transaction. Returns the inserted rows.
    pub async fn insert_many<'e, E>(
        executor: E,
        trip_id: EntityId,
        emails: &[String],
    ) -> Result<Vec<Participant>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "INSERT INTO participants (trip_id, email) \
             SELECT $1, email FROM UNNEST($2::text[]) AS invited(email) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(trip_id)
            .bind(emails)
            .fetch_all(executor)
            .await
    }

    /// Find a participant by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = $1");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every participant of a trip in invitation order.
    pub async fn list_by_trip(
        pool: &PgPool,
        trip_id: EntityId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants WHERE trip_id = $1 ORDER BY created_at, email"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(trip_id)
            .fetch_all(pool)
            .await
    }

    /// Flip `is_confirmed` to `true` if it is still `false`.
    ///
    /// Returns `false` when nothing changed: the row is missing or was
    /// already confirmed (possibly by a concurrent request).
    pub async fn confirm(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE participants SET is_confirmed = true WHERE id = $1 AND is_confirmed = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
