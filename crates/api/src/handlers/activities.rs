use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use planner_db::models::activity::CreateActivity;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::{ActivityCreated, DataResponse};
use crate::state::AppState;

/// GET /api/v1/trips/{trip_id}/activities
///
/// Activities grouped per calendar day, earliest day first.
pub async fn list_activities(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let days = state.workflow.list_activities(&trip_id).await?;

    Ok(Json(DataResponse { data: days }))
}

/// POST /api/v1/trips/{trip_id}/activities
pub async fn create_activity(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    AppJson(input): AppJson<CreateActivity>,
) -> AppResult<impl IntoResponse> {
    let activity_id = state.workflow.create_activity(&trip_id, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ActivityCreated { activity_id },
        }),
    ))
}
