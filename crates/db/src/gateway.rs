//! The persistence seam consumed by the trip workflow.
//!
//! [`PersistenceGateway`] is the only way the workflow reads or mutates
//! durable state. [`PgGateway`] backs it with the repositories in this
//! crate; [`MemoryGateway`](crate::memory::MemoryGateway) backs it with
//! process memory for tests and database-less development.

use async_trait::async_trait;
use planner_core::types::EntityId;

use crate::models::activity::{Activity, CreateActivity};
use crate::models::link::{CreateLink, Link};
use crate::models::participant::Participant;
use crate::models::trip::{CreateTrip, Trip, UpdateTrip};
use crate::repositories::{ActivityRepo, LinkRepo, ParticipantRepo, TripRepo};
use crate::DbPool;

/// Failure reported by a [`PersistenceGateway`].
///
/// Lookups by id report [`StoreError::NotFound`]; everything else is an
/// opaque [`StoreError::Database`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub(crate) fn trip(id: EntityId) -> Self {
        Self::NotFound { entity: "Trip", id }
    }

    pub(crate) fn participant(id: EntityId) -> Self {
        Self::NotFound {
            entity: "Participant",
            id,
        }
    }
}

/// Durable CRUD for trips and everything they own. No business rules.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Store a new unconfirmed trip plus its initial invitees; returns its id.
    async fn create_trip(&self, input: &CreateTrip) -> Result<EntityId, StoreError>;

    async fn get_trip(&self, id: EntityId) -> Result<Trip, StoreError>;

    /// Replace destination and dates, leaving `is_confirmed` untouched.
    async fn update_trip(&self, id: EntityId, input: &UpdateTrip) -> Result<(), StoreError>;

    /// Set `is_confirmed` on a trip. Idempotent.
    async fn confirm_trip(&self, id: EntityId) -> Result<(), StoreError>;

    async fn get_participant(&self, id: EntityId) -> Result<Participant, StoreError>;

    async fn get_participants(&self, trip_id: EntityId) -> Result<Vec<Participant>, StoreError>;

    /// Conditionally confirm a participant.
    ///
    /// `Ok(false)` means the participant exists but was already confirmed.
    async fn confirm_participant(&self, id: EntityId) -> Result<bool, StoreError>;

    /// Bulk-insert unconfirmed participants; returns the stored rows.
    async fn invite_participants(
        &self,
        trip_id: EntityId,
        emails: &[String],
    ) -> Result<Vec<Participant>, StoreError>;

    async fn create_activity(
        &self,
        trip_id: EntityId,
        input: &CreateActivity,
    ) -> Result<EntityId, StoreError>;

    async fn get_activities_by_trip(&self, trip_id: EntityId) -> Result<Vec<Activity>, StoreError>;

    async fn create_link(&self, trip_id: EntityId, input: &CreateLink)
        -> Result<EntityId, StoreError>;

    async fn get_links_by_trip(&self, trip_id: EntityId) -> Result<Vec<Link>, StoreError>;
}

/// PostgreSQL implementation over a shared connection pool.
#[derive(Clone)]
pub struct PgGateway {
    pool: DbPool,
}

impl PgGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistenceGateway for PgGateway {
    async fn create_trip(&self, input: &CreateTrip) -> Result<EntityId, StoreError> {
        Ok(TripRepo::create(&self.pool, input).await?)
    }

    async fn get_trip(&self, id: EntityId) -> Result<Trip, StoreError> {
        TripRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::trip(id))
    }

    async fn update_trip(&self, id: EntityId, input: &UpdateTrip) -> Result<(), StoreError> {
        if TripRepo::update(&self.pool, id, input).await? {
            Ok(())
        } else {
            Err(StoreError::trip(id))
        }
    }

    async fn confirm_trip(&self, id: EntityId) -> Result<(), StoreError> {
        if TripRepo::confirm(&self.pool, id).await? {
            Ok(())
        } else {
            Err(StoreError::trip(id))
        }
    }

    async fn get_participant(&self, id: EntityId) -> Result<Participant, StoreError> {
        ParticipantRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::participant(id))
    }

    async fn get_participants(&self, trip_id: EntityId) -> Result<Vec<Participant>, StoreError> {
        Ok(ParticipantRepo::list_by_trip(&self.pool, trip_id).await?)
    }

    async fn confirm_participant(&self, id: EntityId) -> Result<bool, StoreError> {
        if ParticipantRepo::confirm(&self.pool, id).await? {
            return Ok(true);
        }
        // Nothing changed: tell "already confirmed" apart from "missing".
        self.get_participant(id).await.map(|_| false)
    }

    async fn invite_participants(
        &self,
        trip_id: EntityId,
        emails: &[String],
    ) -> Result<Vec<Participant>, StoreError> {
        Ok(ParticipantRepo::insert_many(&self.pool, trip_id, emails).await?)
    }

    async fn create_activity(
        &self,
        trip_id: EntityId,
        input: &CreateActivity,
    ) -> Result<EntityId, StoreError> {
        Ok(ActivityRepo::create(&self.pool, trip_id, input).await?)
    }

    async fn get_activities_by_trip(&self, trip_id: EntityId) -> Result<Vec<Activity>, StoreError> {
        Ok(ActivityRepo::list_by_trip(&self.pool, trip_id).await?)
    }

    async fn create_link(
        &self,
        trip_id: EntityId,
        input: &CreateLink,
    ) -> Result<EntityId, StoreError> {
        Ok(LinkRepo::create(&self.pool, trip_id, input).await?)
    }

    async fn get_links_by_trip(&self, trip_id: EntityId) -> Result<Vec<Link>, StoreError> {
        Ok(LinkRepo::list_by_trip(&self.pool, trip_id).await?)
    }
}
