//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tracing::debug;

use crate::domain::{LineId, StationId};
use crate::network::NetworkError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", post(create_station).get(list_stations))
        .route("/stations/:id", delete(remove_station))
        .route("/lines", post(create_line).get(list_lines))
        .route(
            "/lines/:id",
            get(show_line).put(update_line).delete(remove_line),
        )
        .route(
            "/lines/:id/sections",
            post(add_section).delete(remove_section),
        )
        .route("/paths", get(shortest_path))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Register a station.
async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<CreateStationRequest>,
) -> impl IntoResponse {
    let mut network = state.network.write().await;
    let station = network.create_station(req.name);

    (
        StatusCode::CREATED,
        Json(StationResponse::from_station(&station)),
    )
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let network = state.network.read().await;
    Json(
        network
            .stations()
            .map(StationResponse::from_station)
            .collect(),
    )
}

/// Delete a station record.
async fn remove_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network.remove_station(StationId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a line with its first section.
async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<CreateLineRequest>,
) -> Result<Response, AppError> {
    let mut network = state.network.write().await;
    let line = network.create_line(
        req.name,
        req.color,
        StationId(req.up_station_id),
        StationId(req.down_station_id),
        req.distance,
    )?;

    Ok((StatusCode::CREATED, Json(LineResponse::from_line(line))).into_response())
}

/// List all lines with their stations.
async fn list_lines(State(state): State<AppState>) -> Json<Vec<LineResponse>> {
    let network = state.network.read().await;
    Json(network.lines().map(LineResponse::from_line).collect())
}

/// Show one line with its stations.
async fn show_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let network = state.network.read().await;
    let line = network.line(LineId(id))?;
    Ok(Json(LineResponse::from_line(line)))
}

/// Rename or recolor a line.
async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateLineRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let mut network = state.network.write().await;
    network.update_line(LineId(id), req.name, req.color)?;
    Ok(Json(LineResponse::from_line(network.line(LineId(id))?)))
}

/// Delete a line.
async fn remove_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network.remove_line(LineId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a section to a line.
async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<AddSectionRequest>,
) -> Result<Response, AppError> {
    let mut network = state.network.write().await;
    network.add_section(
        LineId(id),
        StationId(req.up_station_id),
        StationId(req.down_station_id),
        req.distance,
    )?;

    let line = network.line(LineId(id))?;
    Ok((StatusCode::CREATED, Json(LineResponse::from_line(line))).into_response())
}

/// Remove a station from a line.
async fn remove_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<RemoveSectionParams>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network.remove_section(LineId(id), StationId(params.station_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Find the shortest route between two stations.
async fn shortest_path(
    State(state): State<AppState>,
    Query(params): Query<PathParams>,
) -> Result<Json<PathResponse>, AppError> {
    let network = state.network.read().await;
    let path = network.shortest_path(StationId(params.source), StationId(params.target))?;
    Ok(Json(PathResponse::from_path(&path)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        match &e {
            NetworkError::UnknownStation(_) | NetworkError::UnknownLine(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
        };

        debug!(status = %status, message = message.as_str(), "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
