//! Fire-and-forget execution of notifier calls.
//!
//! [`NotificationDispatcher::dispatch`] returns immediately; the notifier
//! runs on a task owned by a [`TaskTracker`]. Each notification is attempted
//! at most once. Failures are logged with the trip id and operation name and
//! never reach the caller. On shutdown the tracker is closed and drained for
//! a bounded grace period.

use std::sync::Arc;
use std::time::Duration;

use planner_core::types::EntityId;
use tokio_util::task::TaskTracker;

use crate::notifier::{Notifier, NotifyError, Recipient};

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// One unit of outbound work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    OwnerConfirmation {
        trip_id: EntityId,
    },
    ParticipantConfirmation {
        trip_id: EntityId,
        recipient: Recipient,
    },
    ParticipantsConfirmation {
        trip_id: EntityId,
        recipients: Vec<Recipient>,
    },
}

impl Notification {
    /// Operation name used in failure logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::OwnerConfirmation { .. } => "send_owner_confirmation",
            Self::ParticipantConfirmation { .. } => "send_participant_confirmation",
            Self::ParticipantsConfirmation { .. } => "send_participants_confirmation",
        }
    }

    pub fn trip_id(&self) -> EntityId {
        match self {
            Self::OwnerConfirmation { trip_id }
            | Self::ParticipantConfirmation { trip_id, .. }
            | Self::ParticipantsConfirmation { trip_id, .. } => *trip_id,
        }
    }

    async fn deliver(&self, notifier: &dyn Notifier) -> Result<(), NotifyError> {
        match self {
            Self::OwnerConfirmation { trip_id } => notifier.send_owner_confirmation(*trip_id).await,
            Self::ParticipantConfirmation { trip_id, recipient } => {
                notifier
                    .send_participant_confirmation(recipient, *trip_id)
                    .await
            }
            Self::ParticipantsConfirmation {
                trip_id,
                recipients,
            } => {
                notifier
                    .send_participants_confirmation(recipients, *trip_id)
                    .await
            }
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

/// Spawns notifier calls as detached, tracked tasks.
///
/// Cheap to clone; clones share the notifier and the task tracker.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    tracker: TaskTracker,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            tracker: TaskTracker::new(),
        }
    }

    /// Queue `notification` and return without waiting for delivery.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, notification: Notification) {
        let notifier = Arc::clone(&self.notifier);
        self.tracker.spawn(async move {
            if let Err(e) = notification.deliver(notifier.as_ref()).await {
                tracing::error!(
                    error = %e,
                    trip_id = %notification.trip_id(),
                    operation = notification.operation(),
                    "Notification failed",
                );
            }
        });
    }

    /// Number of notifications still in flight.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every notification dispatched so far has finished.
    ///
    /// The dispatcher keeps accepting work afterwards.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Close the dispatcher and drain in-flight notifications for at most
    /// `grace`.
    ///
    /// Returns `false` if some tasks were still running when the grace
    /// period ran out; those are abandoned with the runtime.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        let drained = tokio::time::timeout(grace, self.tracker.wait()).await.is_ok();
        if drained {
            tracing::info!("Notification dispatcher drained");
        } else {
            tracing::warn!(
                in_flight = self.tracker.len(),
                grace_ms = grace.as_millis() as u64,
                "Notification dispatcher drain timed out",
            );
        }
        drained
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
