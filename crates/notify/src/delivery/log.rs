//! Log-only notifier used when SMTP is not configured.

use async_trait::async_trait;
use planner_core::types::EntityId;

use crate::notifier::{Notifier, NotifyError, Recipient};

/// Records each notification at `info` level and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_owner_confirmation(&self, trip_id: EntityId) -> Result<(), NotifyError> {
        tracing::info!(%trip_id, "Email delivery disabled, owner confirmation not sent");
        Ok(())
    }

    async fn send_participant_confirmation(
        &self,
        recipient: &Recipient,
        trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            %trip_id,
            participant_id = %recipient.participant_id,
            name = %recipient.name,
            "Email delivery disabled, participant invitation not sent"
        );
        Ok(())
    }

    async fn send_participants_confirmation(
        &self,
        recipients: &[Recipient],
        trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            %trip_id,
            recipients = recipients.len(),
            "Email delivery disabled, participant invitations not sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn every_call_succeeds() {
        let notifier = LogNotifier;
        let trip_id = Uuid::new_v4();
        let recipient = Recipient {
            participant_id: Uuid::new_v4(),
            name: "bob".to_string(),
            email: "bob@x.com".to_string(),
        };

        assert!(notifier.send_owner_confirmation(trip_id).await.is_ok());
        assert!(notifier
            .send_participant_confirmation(&recipient, trip_id)
            .await
            .is_ok());
        assert!(notifier
            .send_participants_confirmation(&[recipient], trip_id)
            .await
            .is_ok());
    }
}
