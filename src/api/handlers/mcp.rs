//! MCP stream and tool handlers.

use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    response::sse::{Event, Sse},
};
use futures_util::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use super::{
    ErrorResponse, HandlerError, PreferenceResponse, clamp_limit, default_limit, internal_error,
};
use crate::api::AppState;
use crate::mcp::KEEPALIVE_EVENT;
use crate::store::PreferenceRepository;

/// Tool search arguments; both keys are optional
#[derive(Debug, Deserialize, ToSchema)]
pub struct ToolSearchRequest {
    #[serde(default)]
    #[schema(example = "retry", default = "")]
    pub query: String,
    #[serde(default = "default_limit")]
    #[schema(example = 5, default = 5)]
    pub limit: i64,
}

/// Tool search result envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToolSearchResponse {
    pub results: Vec<PreferenceResponse>,
    #[schema(example = 1)]
    pub count: usize,
}

/// Server-sent event stream for MCP clients
///
/// Sends a `keepalive` event immediately and then every five seconds until
/// the client disconnects.
#[utoipa::path(
    get,
    path = "/sse",
    tag = "mcp",
    responses(
        (status = 200, description = "Server-Sent Events stream", content_type = "text/event-stream")
    )
)]
#[instrument(skip(state))]
pub async fn open_stream<S: PreferenceRepository>(
    State(state): State<AppState<S>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let registry = state.streams().clone();
    let client = registry.open();
    let cancel = state.shutdown().child_token();
    // Dropping the response stream (client gone) cancels the loop.
    let disconnect = cancel.clone().drop_guard();
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let client_id = client.id().to_string();
        let end = registry.run(client, tx, cancel).await;
        info!(client_id = %client_id, ?end, "MCP stream ended");
    });

    let events = stream::unfold((rx, disconnect), |(mut rx, disconnect)| async move {
        let keepalive = rx.recv().await?;
        let event = Event::default()
            .event(KEEPALIVE_EVENT)
            .json_data(&keepalive)
            .unwrap_or_else(|e| {
                warn!("Failed to encode keep-alive: {}", e);
                Event::default().event(KEEPALIVE_EVENT)
            });
        Some((Ok::<_, Infallible>(event), (rx, disconnect)))
    });

    Sse::new(events)
}

/// Search tool for MCP clients
///
/// Same matching as `/preferences/search`; `query` defaults to `""` and
/// `limit` to 5. A body that is not a JSON object is rejected with 422. Any
/// other failure, including bad values inside the object, is reported as a
/// 500 carrying the failure description.
#[utoipa::path(
    post,
    path = "/mcp/tools/search",
    tag = "mcp",
    request_body = ToolSearchRequest,
    responses(
        (status = 200, description = "Matching preferences", body = ToolSearchResponse),
        (status = 422, description = "Arguments are not a JSON object"),
        (status = 500, description = "Search failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state, args))]
pub async fn tool_search<S: PreferenceRepository>(
    State(state): State<AppState<S>>,
    Json(args): Json<Map<String, Value>>,
) -> Result<Json<ToolSearchResponse>, HandlerError> {
    let tool_search_failed = |e: &dyn std::fmt::Display| {
        warn!("Tool search failed: {}", e);
        internal_error(e)
    };

    let req: ToolSearchRequest =
        serde_json::from_value(Value::Object(args)).map_err(|e| tool_search_failed(&e))?;

    let results = state
        .store()
        .search(&req.query, clamp_limit(req.limit))
        .map_err(|e| tool_search_failed(&e))?;

    let results: Vec<PreferenceResponse> =
        results.into_iter().map(PreferenceResponse::from).collect();

    Ok(Json(ToolSearchResponse {
        count: results.len(),
        results,
    }))
}
