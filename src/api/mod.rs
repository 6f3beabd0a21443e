//! HTTP API for the preference server.
//!
//! Routes preference, search and MCP stream requests to the store and the
//! stream registry held in [`AppState`].

mod handlers;
mod routes;
mod state;


use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::mcp::StreamRegistry;
use crate::store::PreferenceRepository;

pub use handlers::{
    CreatePreferenceRequest, ErrorResponse, HealthResponse, PreferenceResponse,
    SearchPreferencesRequest, ToolSearchRequest, ToolSearchResponse,
};
pub use routes::{ApiDoc, create_router};
pub use state::AppState;

/// Port used when neither the CLI nor the environment sets one.
pub const DEFAULT_PORT: u16 = 8080;

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(prefs::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(prefs::api::serve))]
    Serve(#[source] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Create config from defaults overridden by `PREFS_HOST` / `PREFS_PORT`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn new() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("PREFS_HOST") {
            match host.parse() {
                Ok(host) => config.host = host,
                Err(_) => warn!("Ignoring invalid PREFS_HOST value: {}", host),
            }
        }

        if let Ok(port) = std::env::var("PREFS_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid PREFS_PORT value: {}", port),
            }
        }

        config
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prefs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and store.
///
/// Open MCP streams are cancelled on Ctrl-C so the graceful shutdown does
/// not wait on them forever.
pub async fn run<S: PreferenceRepository + 'static>(
    config: Config,
    store: S,
) -> Result<(), ApiError> {
    let shutdown = CancellationToken::new();
    let state = AppState::new(store, StreamRegistry::new(), shutdown.clone());

    let app = create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(ApiError::Serve)?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, only an external cancel stops the server.
        shutdown.cancelled().await;
        return;
    }
    info!("Shutdown requested, closing MCP streams");
    shutdown.cancel();
}
