//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an endpoint and delegates to
//! [`EphemerisService`](crate::ephemeris::EphemerisService).

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, warn};

use super::dto::{options_document, ChartQuery, HealthResponse, StarsQuery};
use super::error::AppError;
use super::state::AppState;
use crate::ephemeris::{EphemerisError, HouseRecord, PlanetRecord, RecordKind, StarRecord};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Service Info
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        binary: state.service.binary().to_string(),
    }))
}

/// GET /options
///
/// Describes the available endpoints and their parameters.
pub async fn get_options() -> Json<serde_json::Value> {
    Json(options_document())
}

// =============================================================================
// Ephemeris Queries
// =============================================================================

/// GET /run-planets
pub async fn run_planets(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> HandlerResult<Vec<PlanetRecord>> {
    let request = query.into_request()?;
    let records = state
        .service
        .planets(&request)
        .await
        .map_err(|e| pipeline_failure(RecordKind::Planets, e))?;

    info!(count = records.len(), "planets query succeeded");
    Ok(Json(records))
}

/// GET /run-houses
pub async fn run_houses(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> HandlerResult<Vec<HouseRecord>> {
    let request = query.into_request()?;
    let records = state
        .service
        .houses(&request)
        .await
        .map_err(|e| pipeline_failure(RecordKind::Houses, e))?;

    info!(count = records.len(), "houses query succeeded");
    Ok(Json(records))
}

/// GET /run-star
///
/// Runs one lookup per star. Any failure fails the whole request.
pub async fn run_star(
    State(state): State<AppState>,
    Query(query): Query<StarsQuery>,
) -> HandlerResult<Vec<StarRecord>> {
    let request = query.into_request()?;
    let records = state
        .service
        .stars(&request)
        .await
        .map_err(|e| pipeline_failure(RecordKind::Star, e))?;

    info!(count = records.len(), "star query succeeded");
    Ok(Json(records))
}

/// Log a pipeline error, including any stdout captured before the process failed.
fn pipeline_failure(kind: RecordKind, err: EphemerisError) -> AppError {
    if err.is_client_error() {
        info!(%kind, error = %err, "rejected request");
    } else if let Some(stdout) = err.captured_stdout() {
        warn!(%kind, error = %err, captured = %stdout, "ephemeris process failed");
    } else {
        warn!(%kind, error = %err, "ephemeris query failed");
    }
    AppError::Ephemeris(err)
}
