//! Link entity model and DTOs.

use planner_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `links` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Link {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub title: String,
    pub url: String,
    pub created_at: Timestamp,
}

/// DTO for attaching a reference link to a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLink {
    #[validate(custom(function = "planner_core::validation::not_blank"))]
    pub title: String,
    #[validate(url(message = "must be an absolute URL"))]
    pub url: String,
}
