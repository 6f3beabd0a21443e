//! Coding preference server.
//!
//! - [`store`]: preference records, id assignment and keyword search
//! - [`mcp`]: registry and keep-alive loop for MCP stream clients
//! - [`api`]: HTTP routes wiring both together

pub mod api;
pub mod mcp;
pub mod store;
