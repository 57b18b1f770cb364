//! Route definitions for trips and the resources they own.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{activities, links, participants, trips};
use crate::state::AppState;

/// Trip routes mounted at `/trips`.
///
/// ```text
/// POST   /                            -> create_trip
/// GET    /{trip_id}                   -> get_trip
/// PUT    /{trip_id}                   -> update_trip
/// GET    /{trip_id}/confirm           -> confirm_trip
/// GET    /{trip_id}/activities        -> list_activities
/// POST   /{trip_id}/activities        -> create_activity
/// POST   /{trip_id}/invites           -> invite_participant
/// GET    /{trip_id}/links             -> list_links
/// POST   /{trip_id}/links             -> create_link
/// GET    /{trip_id}/participants      -> list_participants
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(trips::create_trip))
        .route("/{trip_id}", get(trips::get_trip).put(trips::update_trip))
        .route("/{trip_id}/confirm", get(trips::confirm_trip))
        .route(
            "/{trip_id}/activities",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route("/{trip_id}/invites", post(participants::invite_participant))
        .route(
            "/{trip_id}/links",
            get(links::list_links).post(links::create_link),
        )
        .route("/{trip_id}/participants", get(participants::list_participants))
}
