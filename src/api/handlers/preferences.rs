//! Preference management handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use super::{ErrorResponse, HandlerError, clamp_limit, default_limit, internal_error};
use crate::api::AppState;
use crate::store::{NewPreference, Preference, PreferenceRepository};

// =============================================================================
// DTOs
// =============================================================================

/// Stored preference
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreferenceResponse {
    /// Server-assigned identifier
    #[schema(example = "pref_1")]
    pub id: String,
    #[schema(example = "Retry wrapper")]
    pub title: String,
    #[schema(example = "Wraps flaky calls with exponential backoff")]
    pub description: String,
    #[schema(example = "def f(): pass")]
    pub code: String,
    #[schema(example = "python")]
    pub language: String,
    #[schema(example = "fastapi")]
    pub framework: Option<String>,
    #[schema(example = "3.12")]
    pub version: Option<String>,
    #[schema(example = json!(["reliability"]))]
    pub tags: Vec<String>,
    #[schema(example = json!(["tenacity"]))]
    pub dependencies: Vec<String>,
    pub setup_instructions: Option<String>,
    pub example_usage: Option<String>,
    pub best_practices: Option<String>,
}

impl From<Preference> for PreferenceResponse {
    fn from(p: Preference) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            code: p.code,
            language: p.language,
            framework: p.framework,
            version: p.version,
            tags: p.tags,
            dependencies: p.dependencies,
            setup_instructions: p.setup_instructions,
            example_usage: p.example_usage,
            best_practices: p.best_practices,
        }
    }
}

/// Create preference request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePreferenceRequest {
    /// Ignored; the server assigns ids
    #[schema(example = "pref_99")]
    pub id: Option<String>,
    #[schema(example = "Retry wrapper")]
    pub title: String,
    #[schema(example = "Wraps flaky calls with exponential backoff")]
    pub description: String,
    #[schema(example = "def f(): pass")]
    pub code: String,
    #[schema(example = "python")]
    pub language: String,
    pub framework: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub setup_instructions: Option<String>,
    pub example_usage: Option<String>,
    pub best_practices: Option<String>,
}

impl From<CreatePreferenceRequest> for NewPreference {
    fn from(r: CreatePreferenceRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            code: r.code,
            language: r.language,
            framework: r.framework,
            version: r.version,
            tags: r.tags,
            dependencies: r.dependencies,
            setup_instructions: r.setup_instructions,
            example_usage: r.example_usage,
            best_practices: r.best_practices,
        }
    }
}

/// Keyword search request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchPreferencesRequest {
    /// Case-insensitive substring matched against title, description, code and tags
    #[schema(example = "retry")]
    pub query: String,
    /// Maximum number of results; zero or negative returns nothing
    #[serde(default = "default_limit")]
    #[schema(example = 5, default = 5)]
    pub limit: i64,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/preferences",
    tag = "preferences",
    request_body = CreatePreferenceRequest,
    responses(
        (status = 200, description = "Preference stored", body = PreferenceResponse),
        (status = 422, description = "Missing or malformed fields"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn add_preference<S: PreferenceRepository>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreatePreferenceRequest>,
) -> Result<Json<PreferenceResponse>, HandlerError> {
    if let Some(id) = &req.id {
        debug!(supplied_id = %id, "Ignoring client-supplied preference id");
    }

    let stored = state.store().add(req.into()).map_err(internal_error)?;
    info!(id = %stored.id, title = %stored.title, "Added preference");

    Ok(Json(PreferenceResponse::from(stored)))
}

#[utoipa::path(
    get,
    path = "/preferences",
    tag = "preferences",
    responses(
        (status = 200, description = "All preferences in insertion order", body = Vec<PreferenceResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_preferences<S: PreferenceRepository>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<PreferenceResponse>>, HandlerError> {
    let preferences = state.store().list().map_err(internal_error)?;

    Ok(Json(
        preferences
            .into_iter()
            .map(PreferenceResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/preferences/search",
    tag = "preferences",
    request_body = SearchPreferencesRequest,
    responses(
        (status = 200, description = "First matching preferences in insertion order", body = Vec<PreferenceResponse>),
        (status = 422, description = "Missing or malformed fields"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_preferences<S: PreferenceRepository>(
    State(state): State<AppState<S>>,
    Json(req): Json<SearchPreferencesRequest>,
) -> Result<Json<Vec<PreferenceResponse>>, HandlerError> {
    let results = state
        .store()
        .search(&req.query, clamp_limit(req.limit))
        .map_err(internal_error)?;

    Ok(Json(
        results.into_iter().map(PreferenceResponse::from).collect(),
    ))
}
