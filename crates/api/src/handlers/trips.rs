//! Handlers for the trip aggregate: create, read, update, confirm.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use planner_db::models::trip::{CreateTrip, UpdateTrip};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::{DataResponse, TripCreated};
use crate::state::AppState;

/// POST /api/v1/trips
///
/// Create an unconfirmed trip with its initial invitees. The owner
/// confirmation email is sent in the background.
pub async fn create_trip(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTrip>,
) -> AppResult<impl IntoResponse> {
    let trip_id = state.workflow.create_trip(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TripCreated { trip_id },
        }),
    ))
}

/// GET /api/v1/trips/{trip_id}
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let trip = state.workflow.get_trip(&trip_id).await?;

    Ok(Json(DataResponse { data: trip }))
}

/// PUT /api/v1/trips/{trip_id}
///
/// Replace destination and dates. Confirmation state is not affected.
pub async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    AppJson(input): AppJson<UpdateTrip>,
) -> AppResult<impl IntoResponse> {
    state.workflow.update_trip(&trip_id, &input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/trips/{trip_id}/confirm
///
/// A GET so the link in the owner's email works when clicked. Invitation
/// emails go out in the background; their failure does not change the
/// response.
pub async fn confirm_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.workflow.confirm_trip(&trip_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
