//! Trip entity model and DTOs.
//!
//! A trip is the aggregate root: participants, activities and links all
//! hang off exactly one trip.

use planner_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `trips` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Trip {
    pub id: EntityId,
    pub destination: String,
    pub owner_name: String,
    pub owner_email: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub is_confirmed: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a trip together with its initial invitees.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateTrip {
    #[validate(custom(function = "planner_core::validation::not_blank"))]
    pub destination: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    #[serde(default)]
    #[validate(custom(function = "planner_core::validation::email_list"))]
    pub emails_to_invite: Vec<String>,
    #[validate(custom(function = "planner_core::validation::not_blank"))]
    pub owner_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub owner_email: String,
}

/// DTO for replacing a trip's destination and dates.
///
/// Has no confirmation field; updates never touch `is_confirmed`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateTrip {
    #[validate(custom(function = "planner_core::validation::not_blank"))]
    pub destination: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

fn validate_create_dates(input: &CreateTrip) -> Result<(), ValidationError> {
    planner_core::validation::date_range(&input.starts_at, &input.ends_at)
}

fn validate_update_dates(input: &UpdateTrip) -> Result<(), ValidationError> {
    planner_core::validation::date_range(&input.starts_at, &input.ends_at)
}
