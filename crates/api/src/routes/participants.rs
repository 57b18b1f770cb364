use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::participants;
use crate::state::AppState;

/// Participant routes mounted at `/participants`.
///
/// ```text
/// GET    /{participant_id}            -> get_participant
/// PATCH  /{participant_id}/confirm    -> confirm_participant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{participant_id}", get(participants::get_participant))
        .route(
            "/{participant_id}/confirm",
            patch(participants::confirm_participant),
        )
}
