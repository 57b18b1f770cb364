//! The trip workflow service.
//!
//! Every operation follows the same order: parse textual ids, validate the
//! payload, then talk to the gateway. A failure in either of the first two
//! steps returns [`CoreError::Validation`] without any gateway call.
//! Notifications are dispatched only after the durable write succeeded and
//! their outcome never affects the operation's result.

use std::sync::Arc;

use chrono::FixedOffset;
use planner_core::error::CoreError;
use planner_core::itinerary::group_by_day;
use planner_core::naming::display_name;
use planner_core::types::EntityId;
use planner_core::validation::{parse_id, validate_payload};
use planner_db::models::activity::CreateActivity;
use planner_db::models::link::{CreateLink, Link};
use planner_db::models::participant::{InviteParticipant, Participant};
use planner_db::models::trip::{CreateTrip, Trip, UpdateTrip};
use planner_db::PersistenceGateway;
use planner_notify::{Notification, NotificationDispatcher, Recipient};

use crate::error::from_store;
use crate::views::{ActivityDay, ParticipantView};

/// Orchestrates trips, participants, activities and links.
///
/// Holds no per-trip state; clones share the gateway and dispatcher.
#[derive(Clone)]
pub struct TripWorkflow {
    gateway: Arc<dyn PersistenceGateway>,
    dispatcher: NotificationDispatcher,
    itinerary_offset: FixedOffset,
}

impl TripWorkflow {
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        dispatcher: NotificationDispatcher,
        itinerary_offset: FixedOffset,
    ) -> Self {
        Self {
            gateway,
            dispatcher,
            itinerary_offset,
        }
    }

    /// The dispatcher running this workflow's notifications.
    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    // -----------------------------------------------------------------------
    // Trips
    // -----------------------------------------------------------------------

    /// Create an unconfirmed trip and its initial invitees, then ask the
    /// owner to confirm it.
    #[tracing::instrument(skip_all, fields(destination = %input.destination))]
    pub async fn create_trip(&self, input: &CreateTrip) -> Result<EntityId, CoreError> {
        validate_payload(input)?;

        let trip_id = self
            .gateway
            .create_trip(input)
            .await
            .map_err(|e| from_store(e, "create_trip", None))?;

        tracing::info!(
            %trip_id,
            invited = input.emails_to_invite.len(),
            "Trip created"
        );
        self.dispatcher
            .dispatch(Notification::OwnerConfirmation { trip_id });
        Ok(trip_id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_trip(&self, trip_id: &str) -> Result<Trip, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        self.load_trip(trip_id, "get_trip").await
    }

    /// Replace destination and dates. Confirmation state is left alone.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_trip(&self, trip_id: &str, input: &UpdateTrip) -> Result<(), CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        validate_payload(input)?;

        self.gateway
            .update_trip(trip_id, input)
            .await
            .map_err(|e| from_store(e, "update_trip", Some(trip_id)))?;
        tracing::info!(%trip_id, "Trip updated");
        Ok(())
    }

    /// Mark the trip confirmed and invite every participant to confirm.
    ///
    /// Idempotent: confirming again succeeds and sends the invitations
    /// again. Participants whose email yields no display name are skipped.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_trip(&self, trip_id: &str) -> Result<(), CoreError> {
        let trip_id = parse_id("trip", trip_id)?;

        self.gateway
            .confirm_trip(trip_id)
            .await
            .map_err(|e| from_store(e, "confirm_trip", Some(trip_id)))?;

        let participants = self
            .gateway
            .get_participants(trip_id)
            .await
            .map_err(|e| from_store(e, "get_participants", Some(trip_id)))?;

        let recipients: Vec<Recipient> = participants
            .into_iter()
            .filter_map(|p| match display_name(&p.email) {
                Some(name) => Some(Recipient {
                    participant_id: p.id,
                    name: name.to_string(),
                    email: p.email,
                }),
                None => {
                    tracing::warn!(
                        %trip_id,
                        participant_id = %p.id,
                        "Skipping participant without a usable email local part"
                    );
                    None
                }
            })
            .collect();

        tracing::info!(%trip_id, recipients = recipients.len(), "Trip confirmed");
        self.dispatcher.dispatch(Notification::ParticipantsConfirmation {
            trip_id,
            recipients,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Activities
    // -----------------------------------------------------------------------

    /// Activities of a trip grouped by calendar day, earliest day first.
    #[tracing::instrument(skip(self))]
    pub async fn list_activities(&self, trip_id: &str) -> Result<Vec<ActivityDay>, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        self.load_trip(trip_id, "list_activities").await?;

        let activities = self
            .gateway
            .get_activities_by_trip(trip_id)
            .await
            .map_err(|e| from_store(e, "get_activities_by_trip", Some(trip_id)))?;

        Ok(
            group_by_day(activities, self.itinerary_offset, |a| a.occurs_at)
                .into_iter()
                .map(|(date, activities)| ActivityDay { date, activities })
                .collect(),
        )
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_activity(
        &self,
        trip_id: &str,
        input: &CreateActivity,
    ) -> Result<EntityId, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        validate_payload(input)?;
        self.load_trip(trip_id, "create_activity").await?;

        let activity_id = self
            .gateway
            .create_activity(trip_id, input)
            .await
            .map_err(|e| from_store(e, "create_activity", Some(trip_id)))?;
        tracing::info!(%trip_id, %activity_id, "Activity created");
        Ok(activity_id)
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn list_links(&self, trip_id: &str) -> Result<Vec<Link>, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        self.load_trip(trip_id, "list_links").await?;

        self.gateway
            .get_links_by_trip(trip_id)
            .await
            .map_err(|e| from_store(e, "get_links_by_trip", Some(trip_id)))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_link(&self, trip_id: &str, input: &CreateLink) -> Result<EntityId, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        validate_payload(input)?;
        self.load_trip(trip_id, "create_link").await?;

        let link_id = self
            .gateway
            .create_link(trip_id, input)
            .await
            .map_err(|e| from_store(e, "create_link", Some(trip_id)))?;
        tracing::info!(%trip_id, %link_id, "Link created");
        Ok(link_id)
    }

    // -----------------------------------------------------------------------
    // Participants
    // -----------------------------------------------------------------------

    /// Add one unconfirmed participant and send them an invitation.
    ///
    /// Returns the new participant's id.
    #[tracing::instrument(skip(self, input))]
    pub async fn invite_participant(
        &self,
        trip_id: &str,
        input: &InviteParticipant,
    ) -> Result<EntityId, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        validate_payload(input)?;
        let name = display_name(&input.email)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid input: email: cannot derive a display name from '{}'",
                    input.email
                ))
            })?
            .to_string();
        self.load_trip(trip_id, "invite_participant").await?;

        let participant = self
            .gateway
            .invite_participants(trip_id, std::slice::from_ref(&input.email))
            .await
            .map_err(|e| from_store(e, "invite_participants", Some(trip_id)))?
            .pop()
            .ok_or_else(|| CoreError::Storage("invite_participants returned no row".to_string()))?;

        tracing::info!(%trip_id, participant_id = %participant.id, "Participant invited");
        self.dispatcher.dispatch(Notification::ParticipantConfirmation {
            trip_id,
            recipient: Recipient {
                participant_id: participant.id,
                name,
                email: participant.email,
            },
        });
        Ok(participant.id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_participants(&self, trip_id: &str) -> Result<Vec<ParticipantView>, CoreError> {
        let trip_id = parse_id("trip", trip_id)?;
        self.load_trip(trip_id, "list_participants").await?;

        let participants = self
            .gateway
            .get_participants(trip_id)
            .await
            .map_err(|e| from_store(e, "get_participants", Some(trip_id)))?;
        Ok(participants.into_iter().map(ParticipantView::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_participant(&self, participant_id: &str) -> Result<ParticipantView, CoreError> {
        let participant_id = parse_id("participant", participant_id)?;
        self.load_participant(participant_id, "get_participant")
            .await
            .map(ParticipantView::from)
    }

    /// Confirm a participant's place on their trip.
    ///
    /// Fails with [`CoreError::Conflict`] if they already confirmed. Of two
    /// concurrent confirmations exactly one succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_participant(&self, participant_id: &str) -> Result<(), CoreError> {
        let participant_id = parse_id("participant", participant_id)?;

        let changed = self
            .gateway
            .confirm_participant(participant_id)
            .await
            .map_err(|e| from_store(e, "confirm_participant", Some(participant_id)))?;
        if !changed {
            return Err(CoreError::Conflict(format!(
                "participant {participant_id} is already confirmed"
            )));
        }

        tracing::info!(%participant_id, "Participant confirmed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn load_trip(&self, trip_id: EntityId, operation: &'static str) -> Result<Trip, CoreError> {
        self.gateway
            .get_trip(trip_id)
            .await
            .map_err(|e| from_store(e, operation, Some(trip_id)))
    }

    async fn load_participant(
        &self,
        participant_id: EntityId,
        operation: &'static str,
    ) -> Result<Participant, CoreError> {
        self.gateway
            .get_participant(participant_id)
            .await
            .map_err(|e| from_store(e, operation, Some(participant_id)))
    }
}
