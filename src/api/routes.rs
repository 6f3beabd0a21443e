//! API route configuration.

use axum::Router;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreatePreferenceRequest, ErrorResponse, HealthResponse, PreferenceResponse,
    SearchPreferencesRequest, ToolSearchRequest, ToolSearchResponse,
};
use super::state::AppState;
use crate::store::PreferenceRepository;

/// Build routes with generic store type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the PreferenceRepository trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($S:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$S>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Prefs API",
        version = "0.1.0",
        description = "Coding preference store with keyword search and an MCP keep-alive stream",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::add_preference,
        handlers::list_preferences,
        handlers::search_preferences,
        handlers::open_stream,
        handlers::tool_search,
    ),
    components(
        schemas(
            HealthResponse,
            PreferenceResponse,
            CreatePreferenceRequest,
            SearchPreferencesRequest,
            ToolSearchRequest,
            ToolSearchResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "preferences", description = "Coding preference storage and search"),
        (name = "mcp", description = "MCP client stream and tool endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<S: PreferenceRepository + 'static>(state: AppState<S>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = routes!(S => {
        get "/health" => handlers::health,
    });

    let preference_routes = routes!(S => {
        get "/preferences" => handlers::list_preferences,
        post "/preferences" => handlers::add_preference,
        post "/preferences/search" => handlers::search_preferences,
    });

    let mcp_routes = routes!(S => {
        get "/sse" => handlers::open_stream,
        post "/mcp/tools/search" => handlers::tool_search,
    });

    system_routes
        .merge(preference_routes)
        .merge(mcp_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
