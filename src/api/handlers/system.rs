//! System health and status handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::{ErrorResponse, HandlerError, internal_error};
use crate::api::AppState;
use crate::store::PreferenceRepository;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
    /// Number of stored preferences
    #[schema(example = 12)]
    pub preferences: usize,
    /// Number of connected MCP stream clients
    #[schema(example = 1)]
    pub active_streams: usize,
}

/// Health check endpoint
///
/// Returns the current health status of the API
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<S: PreferenceRepository>(
    State(state): State<AppState<S>>,
) -> Result<Json<HealthResponse>, HandlerError> {
    let preferences = state.store().count().map_err(internal_error)?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        preferences,
        active_streams: state.streams().len(),
    }))
}
