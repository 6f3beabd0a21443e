//! Registry of connected MCP stream clients.
//!
//! Each client gets an id when its stream opens and a keep-alive loop that
//! runs until the client goes away. The loop removes its id on every exit
//! path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::{DashMap, mapref::entry::Entry};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Time between keep-alive events.
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(5);

/// SSE event name for keep-alive frames.
pub const KEEPALIVE_EVENT: &str = "keepalive";

const KEEPALIVE_MESSAGE: &str = "Connected to MCP server";

/// Payload of a keep-alive event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepAlive {
    pub message: String,
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self {
            message: KEEPALIVE_MESSAGE.to_string(),
        }
    }
}

/// Why a keep-alive loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The cancellation token fired.
    Cancelled,
    /// The receiving half of the sink was dropped.
    Disconnected,
    /// The client id was closed through the registry.
    Closed,
}

/// A registered stream client.
///
/// Ids can be reused once a client has closed, so each registration also
/// carries a generation unique to that `open` call. Only the loop holding the
/// current generation for an id may emit for it or remove it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamClient {
    id: String,
    generation: u64,
}

impl StreamClient {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for StreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

impl PartialEq<&str> for StreamClient {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}

/// Tracks active stream clients and drives their keep-alive loops.
///
/// Cheap to clone; clones share the same set of client ids.
#[derive(Debug, Clone)]
pub struct StreamRegistry {
    clients: Arc<DashMap<String, u64>>,
    generations: Arc<AtomicU64>,
    interval: Duration,
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamRegistry {
    /// Create a registry emitting keep-alives every [`KEEPALIVE_INTERVAL`].
    pub fn new() -> Self {
        Self::with_interval(KEEPALIVE_INTERVAL)
    }

    /// Create a registry with a custom keep-alive interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            clients: Arc::new(DashMap::new()),
            generations: Arc::new(AtomicU64::new(0)),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register a new client.
    ///
    /// The id is derived from the active count plus one. If that id is still
    /// held by another client the next free number is used instead, so the
    /// returned id is never one that is currently active.
    pub fn open(&self) -> StreamClient {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let mut candidate = self.clients.len() + 1;
        loop {
            let id = candidate.to_string();
            if let Entry::Vacant(slot) = self.clients.entry(id.clone()) {
                slot.insert(generation);
                info!(client_id = %id, active = self.clients.len(), "Stream client opened");
                return StreamClient { id, generation };
            }
            candidate += 1;
        }
    }

    /// Remove a client by id, whichever registration holds it. Returns
    /// `false` if it was not registered.
    pub fn close(&self, client_id: &str) -> bool {
        let removed = self.clients.remove(client_id).is_some();
        if removed {
            info!(client_id = %client_id, active = self.clients.len(), "Stream client closed");
        }
        removed
    }

    pub fn is_active(&self, client_id: &str) -> bool {
        self.clients.contains_key(client_id)
    }

    /// Whether `client` is still the registration holding its id.
    pub fn is_current(&self, client: &StreamClient) -> bool {
        self.clients
            .get(&client.id)
            .is_some_and(|generation| *generation == client.generation)
    }

    /// Number of active clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn release(&self, client: &StreamClient) {
        let removed = self
            .clients
            .remove_if(&client.id, |_, generation| *generation == client.generation)
            .is_some();
        if removed {
            info!(client_id = %client.id, active = self.clients.len(), "Stream client closed");
        }
    }

    /// Keep-alive loop for one client.
    ///
    /// Emits a [`KeepAlive`] into `sink` immediately, then once per interval,
    /// for as long as `client` stays the current registration for its id.
    /// Stops when `cancel` fires, when the sink's receiver is dropped, or when
    /// the client is closed. On exit the registration is removed, unless the
    /// id has already been handed to a newer client.
    pub async fn run(
        &self,
        client: StreamClient,
        sink: mpsc::Sender<KeepAlive>,
        cancel: CancellationToken,
    ) -> StreamEnd {
        let _registration = Registration {
            registry: self,
            client: &client,
        };

        let end = loop {
            if !self.is_current(&client) {
                break StreamEnd::Closed;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break StreamEnd::Cancelled,
                sent = sink.send(KeepAlive::default()) => {
                    if sent.is_err() {
                        break StreamEnd::Disconnected;
                    }
                    debug!(client_id = %client.id, "Sent keep-alive");
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break StreamEnd::Cancelled,
                _ = sink.closed() => break StreamEnd::Disconnected,
                _ = tokio::time::sleep(self.interval) => {}
            }
        };

        debug!(client_id = %client.id, ?end, "Keep-alive loop finished");
        end
    }
}

/// Releases the client's registration when dropped.
struct Registration<'a> {
    registry: &'a StreamRegistry,
    client: &'a StreamClient,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.release(self.client);
    }
}
