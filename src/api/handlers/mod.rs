//! HTTP handlers.

mod mcp;
mod preferences;
mod system;


use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

pub use mcp::*;
pub use preferences::*;
pub use system::*;

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Preference store lock poisoned during search")]
    pub error: String,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn internal_error(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Convert a client-supplied limit to a result count; negatives mean zero.
pub(crate) fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

pub(crate) fn default_limit() -> i64 {
    crate::store::DEFAULT_SEARCH_LIMIT as i64
}
