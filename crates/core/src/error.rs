use crate::types::EntityId;

/// Domain error returned by every workflow operation.
///
/// `Storage` carries operator-facing context only; the transport layer
/// must never render its message to a client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on a trip.
    pub fn trip_not_found(id: EntityId) -> Self {
        Self::NotFound { entity: "Trip", id }
    }

    /// Shorthand for a [`CoreError::NotFound`] on a participant.
    pub fn participant_not_found(id: EntityId) -> Self {
        Self::NotFound {
            entity: "Participant",
            id,
        }
    }
}
