//! Application state for the API server.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::mcp::StreamRegistry;
use crate::store::PreferenceRepository;

/// Shared application state.
///
/// Generic over `S: PreferenceRepository` so handlers can run against any
/// backend (the in-memory store in production, mocks in tests). The store and
/// the stream registry are built once at startup and injected here.
pub struct AppState<S: PreferenceRepository> {
    store: Arc<S>,
    streams: StreamRegistry,
    shutdown: CancellationToken,
}

// Manual Clone impl - only the Arc is cloned, S need not be Clone
impl<S: PreferenceRepository> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            streams: self.streams.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<S: PreferenceRepository> AppState<S> {
    /// Create a new AppState.
    ///
    /// - `store`: Preference storage
    /// - `streams`: Registry of connected MCP stream clients
    /// - `shutdown`: Cancelled when the server stops; stream loops run on
    ///   child tokens of it
    pub fn new(store: S, streams: StreamRegistry, shutdown: CancellationToken) -> Self {
        Self {
            store: Arc::new(store),
            streams,
            shutdown,
        }
    }

    /// Get a reference to the preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the stream registry.
    pub fn streams(&self) -> &StreamRegistry {
        &self.streams
    }

    /// Get the server-wide shutdown token.
    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}
