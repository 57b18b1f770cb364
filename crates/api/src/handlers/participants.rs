//! Handlers for trip participants and their confirmation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use planner_db::models::participant::InviteParticipant;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/trips/{trip_id}/invites
///
/// Invite one person. Responds 201 with an empty body; the invitation
/// email is sent in the background.
pub async fn invite_participant(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    AppJson(input): AppJson<InviteParticipant>,
) -> AppResult<impl IntoResponse> {
    state.workflow.invite_participant(&trip_id, &input).await?;

    Ok(StatusCode::CREATED)
}

/// GET /api/v1/trips/{trip_id}/participants
pub async fn list_participants(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let participants = state.workflow.list_participants(&trip_id).await?;

    Ok(Json(DataResponse { data: participants }))
}

/// GET /api/v1/participants/{participant_id}
pub async fn get_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let participant = state.workflow.get_participant(&participant_id).await?;

    Ok(Json(DataResponse { data: participant }))
}

/// PATCH /api/v1/participants/{participant_id}/confirm
///
/// 409 if the participant already confirmed.
pub async fn confirm_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.workflow.confirm_participant(&participant_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
