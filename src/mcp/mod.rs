//! MCP stream support.
//!
//! Companion MCP clients hold a server-sent event stream open and receive a
//! keep-alive frame every few seconds. [`StreamRegistry`] tracks which
//! clients are connected and runs the per-client keep-alive loop. No MCP
//! tool-call protocol is spoken over the stream.

mod registry;


pub use registry::{
    KEEPALIVE_EVENT, KEEPALIVE_INTERVAL, KeepAlive, StreamClient, StreamEnd, StreamRegistry,
};
