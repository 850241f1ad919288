use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use commute_planner::{
    input::CommuteForm, results_board::SortKey, route_result::ResultId, run_state::RunSnapshot,
};
use geojson::GeoJson;
use serde::Deserialize;
use tracing::info;

use crate::{error::ApiError, state::AppState};

pub struct MapResponse(GeoJson);

impl IntoResponse for MapResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBody {
    sort_key: SortKey,
}

#[derive(Deserialize)]
pub struct VisibilityBody {
    visible: bool,
}

/// Starts a new run; any run still in flight is superseded.
pub async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<CommuteForm>,
) -> Result<Json<RunSnapshot>, ApiError> {
    let snapshot = state.planner.calculate_routes(&form).await?;
    Ok(Json(snapshot))
}

pub async fn snapshot_handler(State(state): State<Arc<AppState>>) -> Json<RunSnapshot> {
    Json(state.planner.snapshot())
}

pub async fn sort_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SortBody>,
) -> Json<RunSnapshot> {
    Json(state.planner.sort_results(body.sort_key))
}

pub async fn visibility_handler(
    State(state): State<Arc<AppState>>,
    Path(result_id): Path<String>,
    Json(body): Json<VisibilityBody>,
) -> Result<Json<RunSnapshot>, ApiError> {
    let id: ResultId = result_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid result id: {}", result_id)))?;

    state
        .planner
        .set_visibility(id, body.visible)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No result with id {}", id)))
}

pub async fn map_handler(State(state): State<Arc<AppState>>) -> MapResponse {
    MapResponse(state.planner.map_geojson())
}

pub async fn clear_handler(State(state): State<Arc<AppState>>) -> Json<RunSnapshot> {
    info!("Clearing results");
    Json(state.planner.clear())
}
