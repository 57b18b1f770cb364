//! Read models returned by the workflow.

use chrono::NaiveDate;
use planner_core::naming::display_name;
use planner_core::types::{EntityId, Timestamp};
use planner_db::models::activity::Activity;
use planner_db::models::participant::Participant;
use serde::Serialize;

/// Activities falling on one calendar day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

/// A participant together with the name used to address them.
///
/// `name` is `None` when the email has no usable local part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantView {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub name: Option<String>,
    pub email: String,
    pub is_confirmed: bool,
    pub created_at: Timestamp,
}

impl From<Participant> for ParticipantView {
    fn from(p: Participant) -> Self {
        Self {
            name: display_name(&p.email).map(str::to_string),
            id: p.id,
            trip_id: p.trip_id,
            email: p.email,
            is_confirmed: p.is_confirmed,
            created_at: p.created_at,
        }
    }
}
