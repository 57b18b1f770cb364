//! The notification capability consumed by the trip workflow.

use async_trait::async_trait;
use planner_core::types::EntityId;
use planner_db::StoreError;

/// Someone who should receive a participant confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub participant_id: EntityId,
    /// Display name derived from the email's local part.
    pub name: String,
    pub email: String,
}

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The trip the message is about could not be loaded.
    #[error("Trip lookup failed: {0}")]
    Lookup(#[from] StoreError),

    /// Some messages of a batch were not delivered.
    #[error("{failed} of {total} emails failed to send")]
    Partial { failed: usize, total: usize },
}

/// Sends "confirm your trip" style messages.
///
/// Calls are awaited by a background task, never by a request handler.
/// Implementations may fail; the caller only logs the failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask the trip owner to confirm a freshly created trip.
    async fn send_owner_confirmation(&self, trip_id: EntityId) -> Result<(), NotifyError>;

    /// Invite one participant to confirm their place on a trip.
    async fn send_participant_confirmation(
        &self,
        recipient: &Recipient,
        trip_id: EntityId,
    ) -> Result<(), NotifyError>;

    /// Invite every listed participant to confirm their place on a trip.
    async fn send_participants_confirmation(
        &self,
        recipients: &[Recipient],
        trip_id: EntityId,
    ) -> Result<(), NotifyError>;
}
