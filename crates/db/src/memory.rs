//! In-process [`PersistenceGateway`] for tests and database-less runs.
//!
//! State lives behind a single `RwLock` and is lost when the process
//! exits. Listing order mirrors the SQL repositories: participants and
//! links in insertion order, activities by `occurs_at` then insertion.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use planner_core::types::EntityId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::gateway::{PersistenceGateway, StoreError};
use crate::models::activity::{Activity, CreateActivity};
use crate::models::link::{CreateLink, Link};
use crate::models::participant::Participant;
use crate::models::trip::{CreateTrip, Trip, UpdateTrip};

#[derive(Default)]
struct MemoryState {
    trips: HashMap<EntityId, Trip>,
    participants: Vec<Participant>,
    activities: Vec<Activity>,
    links: Vec<Link>,
}

impl MemoryState {
    fn ensure_trip(&self, trip_id: EntityId) -> Result<(), StoreError> {
        if self.trips.contains_key(&trip_id) {
            Ok(())
        } else {
            Err(StoreError::trip(trip_id))
        }
    }

    fn push_participants(&mut self, trip_id: EntityId, emails: &[String]) -> Vec<Participant> {
        let now = Utc::now();
        let inserted: Vec<Participant> = emails
            .iter()
            .map(|email| Participant {
                id: Uuid::new_v4(),
                trip_id,
                email: email.clone(),
                is_confirmed: false,
                created_at: now,
            })
            .collect();
        self.participants.extend(inserted.iter().cloned());
        inserted
    }
}

/// Volatile gateway backed by process memory.
#[derive(Default)]
pub struct MemoryGateway {
    state: RwLock<MemoryState>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn create_trip(&self, input: &CreateTrip) -> Result<EntityId, StoreError> {
        let mut state = self.state.write().await;
        let id = Uuid::new_v4();
        state.trips.insert(
            id,
            Trip {
                id,
                destination: input.destination.clone(),
                owner_name: input.owner_name.clone(),
                owner_email: input.owner_email.clone(),
                starts_at: input.starts_at,
                ends_at: input.ends_at,
                is_confirmed: false,
                created_at: Utc::now(),
            },
        );
        state.push_participants(id, &input.emails_to_invite);
        Ok(id)
    }

    async fn get_trip(&self, id: EntityId) -> Result<Trip, StoreError> {
        let state = self.state.read().await;
        state.trips.get(&id).cloned().ok_or_else(|| StoreError::trip(id))
    }

    async fn update_trip(&self, id: EntityId, input: &UpdateTrip) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let trip = state.trips.get_mut(&id).ok_or_else(|| StoreError::trip(id))?;
        trip.destination = input.destination.clone();
        trip.starts_at = input.starts_at;
        trip.ends_at = input.ends_at;
        Ok(())
    }

    async fn confirm_trip(&self, id: EntityId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let trip = state.trips.get_mut(&id).ok_or_else(|| StoreError::trip(id))?;
        trip.is_confirmed = true;
        Ok(())
    }

    async fn get_participant(&self, id: EntityId) -> Result<Participant, StoreError> {
        let state = self.state.read().await;
        state
            .participants
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::participant(id))
    }

    async fn get_participants(&self, trip_id: EntityId) -> Result<Vec<Participant>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .participants
            .iter()
            .filter(|p| p.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn confirm_participant(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let participant = state
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::participant(id))?;
        if participant.is_confirmed {
            return Ok(false);
        }
        participant.is_confirmed = true;
        Ok(true)
    }

    async fn invite_participants(
        &self,
        trip_id: EntityId,
        emails: &[String],
    ) -> Result<Vec<Participant>, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_trip(trip_id)?;
        Ok(state.push_participants(trip_id, emails))
    }

    async fn create_activity(
        &self,
        trip_id: EntityId,
        input: &CreateActivity,
    ) -> Result<EntityId, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_trip(trip_id)?;
        let id = Uuid::new_v4();
        state.activities.push(Activity {
            id,
            trip_id,
            title: input.title.clone(),
            occurs_at: input.occurs_at,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_activities_by_trip(&self, trip_id: EntityId) -> Result<Vec<Activity>, StoreError> {
        let state = self.state.read().await;
        let mut activities: Vec<Activity> = state
            .activities
            .iter()
            .filter(|a| a.trip_id == trip_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        activities.sort_by_key(|a| a.occurs_at);
        Ok(activities)
    }

    async fn create_link(
        &self,
        trip_id: EntityId,
        input: &CreateLink,
    ) -> Result<EntityId, StoreError> {
        let mut state = self.state.write().await;
        state.ensure_trip(trip_id)?;
        let id = Uuid::new_v4();
        state.links.push(Link {
            id,
            trip_id,
            title: input.title.clone(),
            url: input.url.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_links_by_trip(&self, trip_id: EntityId) -> Result<Vec<Link>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .links
            .iter()
            .filter(|l| l.trip_id == trip_id)
            .cloned()
            .collect())
    }
}
