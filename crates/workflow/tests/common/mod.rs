#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone, Utc};
use planner_core::types::{EntityId, Timestamp};
use planner_db::models::activity::{Activity, CreateActivity};
use planner_db::models::link::{CreateLink, Link};
use planner_db::models::participant::Participant;
use planner_db::models::trip::{CreateTrip, Trip, UpdateTrip};
use planner_db::{MemoryGateway, PersistenceGateway, StoreError};
use planner_notify::{NotificationDispatcher, Notifier, NotifyError, Recipient};
use planner_workflow::TripWorkflow;

// ---------------------------------------------------------------------------
// Spy gateway
// ---------------------------------------------------------------------------

/// In-memory gateway that counts every call made through it.
#[derive(Default)]
pub struct SpyGateway {
    inner: MemoryGateway,
    calls: AtomicUsize,
}

impl SpyGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> &MemoryGateway {
        self.calls.fetch_add(1, Ordering::SeqCst);
        &self.inner
    }
}

#[async_trait]
impl PersistenceGateway for SpyGateway {
    async fn create_trip(&self, input: &CreateTrip) -> Result<EntityId, StoreError> {
        self.hit().create_trip(input).await
    }

    async fn get_trip(&self, id: EntityId) -> Result<Trip, StoreError> {
        self.hit().get_trip(id).await
    }

    async fn update_trip(&self, id: EntityId, input: &UpdateTrip) -> Result<(), StoreError> {
        self.hit().update_trip(id, input).await
    }

    async fn confirm_trip(&self, id: EntityId) -> Result<(), StoreError> {
        self.hit().confirm_trip(id).await
    }

    async fn get_participant(&self, id: EntityId) -> Result<Participant, StoreError> {
        self.hit().get_participant(id).await
    }

    async fn get_participants(&self, trip_id: EntityId) -> Result<Vec<Participant>, StoreError> {
        self.hit().get_participants(trip_id).await
    }

    async fn confirm_participant(&self, id: EntityId) -> Result<bool, StoreError> {
        self.hit().confirm_participant(id).await
    }

    async fn invite_participants(
        &self,
        trip_id: EntityId,
        emails: &[String],
    ) -> Result<Vec<Participant>, StoreError> {
        self.hit().invite_participants(trip_id, emails).await
    }

    async fn create_activity(
        &self,
        trip_id: EntityId,
        input: &CreateActivity,
    ) -> Result<EntityId, StoreError> {
        self.hit().create_activity(trip_id, input).await
    }

    async fn get_activities_by_trip(&self, trip_id: EntityId) -> Result<Vec<Activity>, StoreError> {
        self.hit().get_activities_by_trip(trip_id).await
    }

    async fn create_link(&self, trip_id: EntityId, input: &CreateLink) -> Result<EntityId, StoreError> {
        self.hit().create_link(trip_id, input).await
    }

    async fn get_links_by_trip(&self, trip_id: EntityId) -> Result<Vec<Link>, StoreError> {
        self.hit().get_links_by_trip(trip_id).await
    }
}

// ---------------------------------------------------------------------------
// Recording notifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Owner(EntityId),
    Participant(EntityId, Recipient),
    Participants(EntityId, Vec<Recipient>),
}

/// Notifier that records every attempt and optionally fails all of them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(sent);
        if self.fail {
            return Err(NotifyError::Build("smtp unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_owner_confirmation(&self, trip_id: EntityId) -> Result<(), NotifyError> {
        self.record(Sent::Owner(trip_id))
    }

    async fn send_participant_confirmation(
        &self,
        recipient: &Recipient,
        trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        self.record(Sent::Participant(trip_id, recipient.clone()))
    }

    async fn send_participants_confirmation(
        &self,
        recipients: &[Recipient],
        trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        self.record(Sent::Participants(trip_id, recipients.to_vec()))
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub workflow: TripWorkflow,
    pub gateway: Arc<SpyGateway>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    /// Wait for every dispatched notification to finish.
    pub async fn settle(&self) {
        self.workflow.dispatcher().wait_idle().await;
    }
}

fn build(notifier: RecordingNotifier, offset: FixedOffset) -> Harness {
    let gateway = Arc::new(SpyGateway::default());
    let notifier = Arc::new(notifier);
    let workflow = TripWorkflow::new(
        gateway.clone(),
        NotificationDispatcher::new(notifier.clone()),
        offset,
    );
    Harness {
        workflow,
        gateway,
        notifier,
    }
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn harness() -> Harness {
    build(RecordingNotifier::default(), utc())
}

pub fn harness_with_offset(offset: FixedOffset) -> Harness {
    build(RecordingNotifier::default(), offset)
}

pub fn failing_notifier_harness() -> Harness {
    build(RecordingNotifier::failing(), utc())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

pub fn trip_to(destination: &str, emails: &[&str]) -> CreateTrip {
    CreateTrip {
        destination: destination.to_string(),
        starts_at: at(2024, 6, 1, 0, 0),
        ends_at: at(2024, 6, 10, 0, 0),
        emails_to_invite: emails.iter().map(|e| e.to_string()).collect(),
        owner_name: "Olivia".to_string(),
        owner_email: "olivia@example.com".to_string(),
    }
}

/// Gateway whose database is always unavailable.
pub struct BrokenGateway;

fn down<T>() -> Result<T, StoreError> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl PersistenceGateway for BrokenGateway {
    async fn create_trip(&self, _input: &CreateTrip) -> Result<EntityId, StoreError> {
        down()
    }

    async fn get_trip(&self, _id: EntityId) -> Result<Trip, StoreError> {
        down()
    }

    async fn update_trip(&self, _id: EntityId, _input: &UpdateTrip) -> Result<(), StoreError> {
        down()
    }

    async fn confirm_trip(&self, _id: EntityId) -> Result<(), StoreError> {
        down()
    }

    async fn get_participant(&self, _id: EntityId) -> Result<Participant, StoreError> {
        down()
    }

    async fn get_participants(&self, _trip_id: EntityId) -> Result<Vec<Participant>, StoreError> {
        down()
    }

    async fn confirm_participant(&self, _id: EntityId) -> Result<bool, StoreError> {
        down()
    }

    async fn invite_participants(
        &self,
        _trip_id: EntityId,
        _emails: &[String],
    ) -> Result<Vec<Participant>, StoreError> {
        down()
    }

    async fn create_activity(
        &self,
        _trip_id: EntityId,
        _input: &CreateActivity,
    ) -> Result<EntityId, StoreError> {
        down()
    }

    async fn get_activities_by_trip(&self, _trip_id: EntityId) -> Result<Vec<Activity>, StoreError> {
        down()
    }

    async fn create_link(&self, _trip_id: EntityId, _input: &CreateLink) -> Result<EntityId, StoreError> {
        down()
    }

    async fn get_links_by_trip(&self, _trip_id: EntityId) -> Result<Vec<Link>, StoreError> {
        down()
    }
}

pub fn broken_workflow(notifier: Arc<RecordingNotifier>) -> TripWorkflow {
    TripWorkflow::new(
        Arc::new(BrokenGateway),
        NotificationDispatcher::new(notifier),
        utc(),
    )
}
