//! Participant entity model and DTOs.

use planner_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `participants` table.
///
/// `is_confirmed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Participant {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub email: String,
    pub is_confirmed: bool,
    pub created_at: Timestamp,
}

/// DTO for inviting one person to a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteParticipant {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}
