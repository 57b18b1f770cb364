pub mod health;
pub mod participants;
pub mod trips;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /trips                                   create
/// /trips/{trip_id}                         get, update
/// /trips/{trip_id}/confirm                 confirm (GET, linked from email)
/// /trips/{trip_id}/activities              list by day, create
/// /trips/{trip_id}/invites                 invite one participant
/// /trips/{trip_id}/links                   list, create
/// /trips/{trip_id}/participants            list
///
/// /participants/{participant_id}           get
/// /participants/{participant_id}/confirm   confirm (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/trips", trips::router())
        .nest("/participants", participants::router())
}
