use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use planner_db::models::link::CreateLink;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::{DataResponse, LinkCreated};
use crate::state::AppState;

/// GET /api/v1/trips/{trip_id}/links
pub async fn list_links(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let links = state.workflow.list_links(&trip_id).await?;

    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/trips/{trip_id}/links
pub async fn create_link(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    AppJson(input): AppJson<CreateLink>,
) -> AppResult<impl IntoResponse> {
    let link_id = state.workflow.create_link(&trip_id, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: LinkCreated { link_id },
        }),
    ))
}
