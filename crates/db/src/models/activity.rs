//! Activity entity model and DTOs.

use planner_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `activities` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Activity {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub title: String,
    pub occurs_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for scheduling an activity on a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivity {
    #[validate(custom(function = "planner_core::validation::not_blank"))]
    pub title: String,
    pub occurs_at: Timestamp,
}
